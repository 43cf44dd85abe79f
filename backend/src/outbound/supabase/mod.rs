//! Backend-as-a-service adapters.
//!
//! [`SupabaseIdentityProvider`] talks to the auth API and
//! [`SupabaseRestRepository`] to the data API. Both share one pooled
//! [`SupabaseClient`].

mod auth;
mod client;
mod dto;
mod rest;

pub use auth::SupabaseIdentityProvider;
pub use client::{SupabaseClient, SupabaseConfig};
pub use rest::SupabaseRestRepository;
