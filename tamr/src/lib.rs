// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate serde_yaml;
extern crate algorithm;
extern crate fnv;
extern crate itertools;
#[macro_use]
extern crate log;
#[macro_use]
extern crate error_chain;
extern crate rand;
extern crate rayon;
extern crate regex;
#[macro_use]
extern crate lazy_static;
extern crate time;

pub mod errors;
pub mod penman;
pub mod evaluation_metrics;
pub mod settings;
pub mod dataset;
pub mod utils;
pub mod prelude;
