//! Table utilities that sit around the normalizer: combining collector
//! outputs and spotting repeated postings.

pub mod combine;
pub mod duplicates;

pub use combine::{combine_csv_files, CombineResult};
pub use duplicates::{check_duplicates, DuplicateGroup, DuplicateReport};
