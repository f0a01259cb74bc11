pub mod axes;
pub mod core;
pub mod error;
