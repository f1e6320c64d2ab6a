pub mod types;
pub mod query_cache;

// Re-export cache types
pub use types::*;
// Re-export the query cache
pub use query_cache::*;
