use std::{path::PathBuf, str::FromStr as _};

use clap::{ArgAction, Parser};

use crate::codegen::DEFAULT_PRINT_SYMBOL;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Print the token stream.
    #[arg(long, short, group = "mode")]
    pub lex: bool,
    /// Print the syntax tree.
    #[arg(long, short, group = "mode")]
    pub parse: bool,
    /// Print only the generated instructions, without the surrounding function.
    #[arg(long, short, group = "mode")]
    pub codegen: bool,
    /// Print a complete assembly file (the default).
    #[arg(long, short = 'S', group = "mode")]
    pub assembly: bool,
    /// Run the program with the reference interpreter.
    #[arg(long, short, group = "mode")]
    pub interpret: bool,
    /// Print a random valid program.
    #[arg(long, group = "mode")]
    pub fuzz: bool,

    /// Symbol of the generated function.
    #[arg(long, default_value = "basic_main")]
    pub entry: String,
    /// Runtime routine called by PRINT with the value in %rdi.
    #[arg(long, default_value = DEFAULT_PRINT_SYMBOL)]
    pub print_symbol: String,

    /// -v for stage dumps, -vv for code generation decisions.
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(value_parser = path_exists, required_unless_present = "fuzz")]
    pub input_path: Option<PathBuf>,
}

pub fn path_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from_str(s).map_err(|e| format!("Invalid path: {}", e))?;
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("Path does not exist: {}", s))
    }
}
