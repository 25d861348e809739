pub mod cli;
pub mod error;
pub mod map;
pub mod models;
pub mod processors;
pub mod readers;
pub mod scale;
pub mod sources;
pub mod utils;
pub mod writers;

pub use error::{ProcessingError, Result};
