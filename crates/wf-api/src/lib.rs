pub mod auth;
pub mod client;

pub use auth::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};
pub use client::{ApiClient, ApiError, RequestOptions};
