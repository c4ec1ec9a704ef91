pub mod auth;

pub use auth::{resolve_caller_or_response, AuthenticatedUser};
