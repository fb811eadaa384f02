mod client;
mod error;
pub mod types;

pub use client::{API_BASE, ApiClient};
pub use error::FetchError;
