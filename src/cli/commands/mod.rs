pub mod api;
pub mod auth;
pub mod data;
pub mod route;
