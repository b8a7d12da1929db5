mod error;
pub mod parser;
mod processor;
pub mod source;
pub mod tracing;
pub mod types;

pub use error::Error;
pub use processor::{builder::TrendingProcessorBuilder, TrendingProcessor};
pub use types::{VideoRecord, WorkflowState};
