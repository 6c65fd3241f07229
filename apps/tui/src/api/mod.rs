pub mod client;
pub mod models;

pub use client::{endpoints, ApiClient, ApiError};
