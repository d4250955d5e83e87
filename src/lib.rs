pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod table;
pub mod tools;
pub mod types;

pub use error::{JobsError, RecordIssue, Result};
pub use normalize::{NormalizationOutcome, NormalizerSettings, RecordNormalizer};
pub use pipeline::{Pipeline, PipelineResult};
pub use types::{NormalizedJobRecord, RawJobRecord};
