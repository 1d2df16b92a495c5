use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use sic_assembler::directive::DirectiveTable;
use sic_assembler::opcode::OpcodeTable;
use sic_assembler::scoff::write_records;
use sic_assembler::{pass1, pass2};

const DEFAULT_OPCODES: &str = include_str!("../res/sic_opcodes.txt");

/// Two-pass SIC/XE assembler, emitting SCOFF object files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// SIC assembly source file
    source: PathBuf,

    /// Output object file (defaults to the source file with a .obj extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Opcode descriptor file (defaults to the built-in SIC/XE table)
    #[arg(long)]
    opcodes: Option<PathBuf>,

    /// Allow SIC/XE-only instructions
    #[arg(long)]
    xe: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.source) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("failed to read {}: {err}", cli.source.display());
            return ExitCode::FAILURE;
        }
    };

    let descriptor = match &cli.opcodes {
        Some(path) => match fs::read_to_string(path) {
            Ok(descriptor) => descriptor,
            Err(err) => {
                eprintln!("failed to read {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_OPCODES.to_string(),
    };

    let opcodes = match OpcodeTable::parse(&descriptor) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let directives = DirectiveTable::new();

    let first = match pass1::run(&source, &opcodes, &directives, cli.xe) {
        Ok(first) => first,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    debug!(
        "pass 1 complete: program {:?}, {} symbol(s), start {:?}",
        first.program_name,
        first.symbol_table.len(),
        first.symbol_table.start_address()
    );

    let records = match pass2::run(
        &source,
        &opcodes,
        &directives,
        &first.symbol_table,
        &first.program_name,
    ) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let output_path = cli
        .output
        .unwrap_or_else(|| cli.source.with_extension("obj"));
    if let Err(err) = fs::write(&output_path, write_records(records.as_slice())) {
        eprintln!("failed to write {}: {err}", output_path.display());
        return ExitCode::FAILURE;
    }

    debug!("wrote {}", output_path.display());
    ExitCode::SUCCESS
}
