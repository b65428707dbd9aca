use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use pike_regex::{State, compile, execute_with, read_program, write_program};

/// Compile a regex to Pike VM bytecode and run it over inputs.
///
/// PROGRAM is tried as the path of an assembly listing first; if no such
/// file exists it is compiled as a regular expression. Either way the
/// program is dumped as assembly, then matched against each INPUT.
/// Diagnostics are prefixed with ";;" so the whole output can be saved
/// back as a listing.
#[derive(Parser)]
#[command(name = "pike-regex", version)]
struct Args {
    /// A regular expression, or the path of an assembly listing to replay
    program: String,
    /// Subject strings to match
    inputs: Vec<String>,
    /// Verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => log::Level::Warn,
        1 => log::Level::Debug,
        _ => log::Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!(";; failed to initialize logging: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(";; error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let program = match fs::read_to_string(&args.program) {
        Ok(text) => {
            debug!("reading program from file {:?}", args.program);
            writeln!(out, ";; Program: {}", args.program)?;
            let program = read_program(&text)?;
            writeln!(out, ";; BEGIN READ CODE:")?;
            program
        }
        Err(_) => {
            writeln!(out, ";; Regex: \"{}\"", args.program)?;
            let program = compile(&args.program)?;
            writeln!(out, ";; BEGIN GENERATED CODE:")?;
            program
        }
    };
    write_program(&program, &mut out)?;

    writeln!(out, ";; BEGIN TEST RUNS:")?;
    let mut state = State::new(&program);
    for input in &args.inputs {
        match execute_with(&program, input, &mut state) {
            Some(m) => {
                write!(out, ";; \"{}\": match({})", input, m.len)?;
                for pair in m.saved.chunks_exact(2) {
                    write!(out, " ({}, {})", pair[0], pair[1])?;
                }
                writeln!(out)?;
            }
            None => writeln!(out, ";; \"{}\": no match", input)?,
        }
    }
    Ok(())
}
