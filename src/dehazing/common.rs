//! Common utilities module
//!
//! This module contains shared utilities used across the dehazing pipeline.

pub mod error;

pub use error::{DehazeError, Result};
