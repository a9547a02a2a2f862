use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use simplelog::{Config, SimpleLogger};

use crate::config::TargetConfig;
use crate::result::Result;

// Exit Codes for different types of errors
pub const ERR_READER_ERROR: i32 = 1;
pub const ERR_CONFIG_ERROR: i32 = 2;
pub const ERR_IO_ERROR: i32 = 3;
pub const ERR_LOWERING_ERROR: i32 = 4;
pub const ERR_EXECUTION_FAULT: i32 = 5;
pub const ERR_VERIFY_MISMATCH: i32 = 6;

pub fn print_errs<E: std::fmt::Display>(errs: &[E]) {
    for e in errs {
        eprintln!("{}", e);
    }
}

fn input_arg() -> Arg<'static, 'static> {
    Arg::with_name("input")
        .short("i")
        .long("input")
        .takes_value(true)
        .required(true)
        .help("Assembly source file")
}

fn target_args() -> Vec<Arg<'static, 'static>> {
    vec![
        Arg::with_name("target")
            .short("t")
            .long("target")
            .takes_value(true)
            .help("YAML file describing the target machine (registers, memory_size, max_iterations)"),
        Arg::with_name("registers")
            .short("r")
            .long("registers")
            .takes_value(true)
            .help("Number of registers in the register file, including the reserved register 0"),
        Arg::with_name("memory-size")
            .long("memory-size")
            .takes_value(true)
            .help("Number of memory cells available to the reference interpreter"),
        Arg::with_name("max-iterations")
            .long("max-iterations")
            .takes_value(true)
            .help("Number of instructions the reference interpreter runs before giving up"),
    ]
}

fn log_arg() -> Arg<'static, 'static> {
    Arg::with_name("log")
        .long("log-level")
        .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
        .takes_value(true)
        .help("Set the level of log messages printed while working. The debug level traces the register residency after every instruction.")
}

pub fn configure_cli() -> clap::App<'static, 'static> {
    App::new("ROM Cross Assembler")
        .version("0.1.0")
        .about("Lowers memory addressed assembly onto the register file of the ROM CPU and writes the ROM image as a VHDL constant")
        .arg(input_arg())
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File that the VHDL ROM image is written to"),
        )
        .args(&target_args())
        .arg(
            Arg::with_name("listing")
                .long("listing")
                .help("Print every generated instruction next to the index of the source instruction it came from"),
        )
        .arg(
            Arg::with_name("listing-json")
                .long("listing-json")
                .takes_value(true)
                .help("Write the listing and the lowering diagnostics to a JSON file"),
        )
        .arg(
            Arg::with_name("verify")
                .long("verify")
                .help("Run the source and the lowered program in the reference interpreter and compare their final memory"),
        )
        .arg(log_arg())
}

pub fn configure_run_cli() -> clap::App<'static, 'static> {
    App::new("ROM Reference Interpreter")
        .version("0.1.0")
        .about("Executes an assembly program and prints its output and final memory")
        .arg(input_arg())
        .arg(
            Arg::with_name("lower")
                .long("lower")
                .help("Lower the program onto the register file before running it"),
        )
        .args(&target_args())
        .arg(log_arg())
}

pub fn get_log_level(args: &ArgMatches) -> Option<LevelFilter> {
    match args.value_of("log") {
        Some("off") => Some(LevelFilter::Off),
        Some("error") => Some(LevelFilter::Error),
        Some("warn") => Some(LevelFilter::Warn),
        Some("info") => Some(LevelFilter::Info),
        Some("debug") => Some(LevelFilter::Debug),
        Some("trace") => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn configure_logging(level: LevelFilter) -> std::result::Result<(), log::SetLoggerError> {
    SimpleLogger::init(level, Config::default())
}

/// Builds the target description from `--target` and then applies any
/// individual overrides given on the command line.
pub fn get_target(args: &ArgMatches) -> Result<TargetConfig> {
    let mut target = match args.value_of("target") {
        Some(path) => {
            let mut file = std::fs::File::open(path).map_err(|e| format!("{}: {}", path, e))?;
            TargetConfig::read(&mut file).map_err(|e| format!("{}: {}", path, e))?
        }
        None => TargetConfig::default(),
    };

    if let Some(n) = parse_arg(args, "registers")? {
        target.registers = n;
    }
    if let Some(n) = parse_arg(args, "memory-size")? {
        target.memory_size = n;
    }
    if let Some(n) = parse_arg(args, "max-iterations")? {
        target.max_iterations = n;
    }

    target.validate().map_err(|e| format!("{}", e))?;
    Ok(target)
}

fn parse_arg<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> Result<Option<T>> {
    match args.value_of(name) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| format!("--{} expects a number but got {}", name, v)),
    }
}
