pub(crate) mod builder;
pub mod coalesce;
pub mod context;
pub mod fill_gap;
pub mod lines;
pub mod multi_row;
pub mod padding;
pub mod pipeline;
pub mod rollup;
