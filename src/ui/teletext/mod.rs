pub mod colors;
pub mod loading_indicator;

pub use loading_indicator::LoadingIndicator;
