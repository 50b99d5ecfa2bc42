//! Request middleware.
//!
//! Purpose: Define middleware components for request lifecycle concerns such as
//! tracing and authentication.

pub mod api_key;
pub mod trace;

pub use api_key::ApiKeyAuth;
pub use trace::Trace;
