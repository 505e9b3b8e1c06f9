pub use data_structure::graph::*;
pub use random::CDF;
