pub mod data_structure;
pub mod random;
pub mod prelude;
