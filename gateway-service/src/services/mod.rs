pub mod datastore;
pub mod metrics;
pub mod providers;

pub use datastore::{DataStore, DataStoreError};
pub use metrics::{get_metrics, init_metrics};
pub use providers::{ProviderError, ProviderResponse, TextProvider};
