pub mod smatch;
pub mod aggregation;
