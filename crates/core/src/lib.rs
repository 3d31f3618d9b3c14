#![forbid(unsafe_code)]

pub mod model;
pub mod navigation;
pub mod scoring;

pub use navigation::{Direction, navigate};
pub use scoring::{GradedAnswer, grade, score};
