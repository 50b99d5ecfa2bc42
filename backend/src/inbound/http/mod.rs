//! HTTP inbound adapter exposing REST endpoints.

pub mod activities;
pub mod directory;
pub mod dto;
pub mod error;
pub mod health;
pub mod schemas;
pub mod shifts;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
