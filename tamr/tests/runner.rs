extern crate tamr;
extern crate serde;
extern crate serde_json;
#[macro_use]
extern crate serde_derive;

pub mod evaluation_metrics;
