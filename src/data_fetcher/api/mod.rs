pub mod urls;
pub mod http_client;
mod fetch_utils;
mod core;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::*;
// Re-export status mapping and quota headers
pub use fetch_utils::{QuotaInfo, map_status_error};
// Re-export the odds client
pub use core::*;
