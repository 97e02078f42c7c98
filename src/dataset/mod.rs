//! Helpers for turning dictionary records into language-model training data
//! and back.
//!
//! - [`split`]: hash-based, order-independent dataset splits
//! - [`example`]: trainable text and cache naming
//! - [`generated`]: parsing and filtering generated samples

pub mod example;
pub mod generated;
pub mod split;

pub use example::{cache_file_name, title_markup, training_body, TrainingText};
pub use generated::{collect_generated, parse_generated, GeneratedFilter};
pub use split::{bucket, SplitConfig};
