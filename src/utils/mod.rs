//! contains utils used in loading sketches and parameters

pub mod files;
pub mod parameters;

pub use files::*;
pub use parameters::*;
