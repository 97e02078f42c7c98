//! Core Apple dictionary reader module

pub mod codec;
pub mod format;
pub mod grammar;
pub mod iter;
pub mod markup;
pub mod reader;
pub mod types;
mod utils;

pub use reader::AppleDictReader;
pub use types::error::{AppleDictError, Result};
