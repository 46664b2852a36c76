//! Pipeline orchestration module
//!
//! Validates input, runs the six dehazing stages in order and wires the
//! result through the reader/writer seams.

mod dehaze;


pub use dehaze::{restore, DehazePipeline, DehazeReport};
