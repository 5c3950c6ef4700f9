pub mod engine;
pub mod input;
pub mod result;
pub mod round;
pub mod stats;
