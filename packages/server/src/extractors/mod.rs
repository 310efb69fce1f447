pub mod auth;
pub mod body;
pub mod role;
