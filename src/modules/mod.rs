pub mod admin;
pub mod auth;
pub mod listing;
pub mod multimedia;
