pub mod async_util;
pub mod dataset;
pub mod error;
pub mod settings;
pub mod worker_pool;

pub use dataset::{ReadSummary, read_records, sample, write_enriched};
pub use error::DatasetError;
pub use settings::EnrichSettings;
pub use worker_pool::WorkerPool;
