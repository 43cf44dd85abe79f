//! Prisma backend library modules.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] holds the
//! entities, services and port traits; [`inbound`] adapts HTTP requests onto
//! the driving ports; [`outbound`] implements the driven ports against the
//! identity, data and mail APIs.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
