pub mod api;
pub mod cache;
pub mod models;
pub mod queries;

pub use api::{InitState, OddsApi, QuotaInfo};
pub use models::{Event, OddsConfig, Sport, SportConfig};
pub use queries::{OddsQueries, QueryOptions, QueryState};
