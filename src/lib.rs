pub mod cli;
pub mod codegen;
pub mod fuzzing;
pub mod interp;
pub mod parse;
pub mod semantic;
pub mod tokenize;

use crate::parse::{Node, Parser};
use crate::tokenize::tokenize;

/// Tokenizes and parses a whole program into a top-level sequence.
pub fn parse_source(source: &str) -> anyhow::Result<Node> {
    let tokens = tokenize(source)?;
    Ok(Parser::new(tokens).parse()?)
}
