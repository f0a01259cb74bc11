pub mod model;
pub mod names;
