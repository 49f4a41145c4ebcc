//! HTTP request handlers for the conneg API.

pub mod health;
pub mod landing;
pub mod resources;
