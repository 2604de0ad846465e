pub mod adaptors;
pub mod aggregate;
pub mod auth;
