use std::{fs, io};

use anyhow::{Context, Error};
use clap::Parser as _;
use tbc::{
    cli::Args,
    codegen::{Codegen, asm::AsmWriter, label::LabelAllocator},
    fuzzing,
    interp::Interpreter,
    parse_source,
    semantic::validate,
    tokenize::tokenize,
};
use tracing::{Level, debug};

fn main() -> anyhow::Result<(), Error> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.fuzz {
        print!("{}", fuzzing::generate());
        return Ok(());
    }

    let input_path = args
        .input_path
        .as_ref()
        .context("an input file is required")?;
    let source = fs::read_to_string(input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    debug!(?source, "read input");

    if args.lex {
        for token in tokenize(&source)? {
            println!("{:?}", token.kind);
        }
        return Ok(());
    }

    let ast = parse_source(&source)?;
    debug!(?ast, "parsed");
    if args.parse {
        println!("{ast:#?}");
        return Ok(());
    }

    validate(&ast)?;

    if args.interpret {
        Interpreter::new(io::stdout().lock()).run(&ast)?;
        return Ok(());
    }

    let mut labels = LabelAllocator::new();
    let mut codegen = Codegen::new(&mut labels).with_print_symbol(&args.print_symbol);
    codegen.compile(&ast)?;
    let instructions = codegen.finish();
    debug!(count = instructions.len(), "generated instructions");

    let mut writer = AsmWriter::new(io::stdout().lock());
    if args.codegen {
        writer.emit_listing(&instructions)?;
    } else {
        writer.emit_program(&args.entry, &instructions)?;
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
