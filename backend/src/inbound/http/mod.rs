//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod catalogue;
pub mod contact;
pub mod error;
pub mod health;
pub mod onboarding;
pub mod portfolio;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
