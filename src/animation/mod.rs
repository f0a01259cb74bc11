pub mod ease;
pub mod transition;
