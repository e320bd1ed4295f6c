//! Request and response types for the HTTP API

pub mod error;
pub mod generate;
pub mod json;
pub mod user;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use generate::{GenerateRequest, TemplatesResponse};
pub use json::Json;
pub use user::CredentialsRequest;
