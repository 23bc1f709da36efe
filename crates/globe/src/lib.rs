pub mod config;
pub mod fetch;
pub mod session;

pub use config::{ConfigError, GlobeConfig};
pub use fetch::{DatasetSource, FetchError, fetch_collection};
pub use session::{GlobeData, GlobeSession};
