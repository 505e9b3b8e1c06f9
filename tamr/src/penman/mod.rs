//! Reading PENMAN notation into normalized graphs.

mod parser;
mod normalizer;

pub use self::parser::{parse_raw, RawGraph, RawEdge, RawValue};
pub use self::normalizer::{normalize, forward_role, Amr, PenmanTriple, INSTANCE_ROLE};

use errors::*;

/// Parse and normalize a PENMAN string
pub fn parse(text: &str) -> Result<Amr> {
    Ok(normalize(parse_raw(text)?))
}
