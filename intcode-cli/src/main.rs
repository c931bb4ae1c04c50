//! Intcode CLI: run, chain, network and disassemble programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage, I/O or parse error
//! - 2: Machine left waiting for input
//! - 3: Runtime fault

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "intcode", about = "Run Intcode programs")]
struct Cli {
    /// Raise the log level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program on one machine.
    Run(RunArgs),
    /// Pass a signal through a chain of amplifier stages.
    Amplify(AmplifyArgs),
    /// Boot a network of peers and watch the sink.
    Network(NetworkArgs),
    /// Print a linear-sweep listing of a program.
    Disasm {
        /// Program file.
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Program file.
    pub file: PathBuf,

    /// Input values, comma separated.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub input: Vec<i64>,

    /// Line of text queued as character codes after `--input`.
    #[arg(long = "ascii-input", value_name = "LINE")]
    pub ascii_input: Vec<String>,

    /// Print output as text, with non-ASCII values on their own lines.
    #[arg(long)]
    pub ascii: bool,

    /// Value of memory cells never written.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub fill: i64,

    /// Suspend after every output value.
    #[arg(long)]
    pub pause_on_output: bool,

    /// Patch memory before running.
    #[arg(long, value_name = "ADDR=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(usize, i64)>,

    /// Print a memory cell after running.
    #[arg(long, value_name = "ADDR")]
    pub peek: Vec<usize>,

    /// Report executed instructions and the final state on stderr.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args)]
pub struct AmplifyArgs {
    /// Program file.
    pub file: PathBuf,

    /// Phase setting for each stage, comma separated.
    #[arg(long, required = true, value_delimiter = ',', allow_negative_numbers = true)]
    pub phases: Vec<i64>,

    /// Signal fed to the first stage.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub signal: i64,

    /// Feed the last stage back into the first until it halts.
    #[arg(long)]
    pub feedback: bool,
}

#[derive(Args)]
pub struct NetworkArgs {
    /// Program file.
    pub file: PathBuf,

    /// Number of peers.
    #[arg(long, default_value_t = 50)]
    pub size: usize,

    /// Peer woken by the sink when the network goes idle.
    #[arg(long, default_value_t = 0)]
    pub wake_target: usize,

    /// When to stop.
    #[arg(long, value_enum, default_value_t = Until::Sink)]
    pub until: Until,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Until {
    /// First packet captured by the sink.
    Sink,
    /// First wake-up repeating the previous one's `y`.
    Repeat,
}

fn parse_assignment(s: &str) -> Result<(usize, i64), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got '{s}'"))?;
    let addr = addr
        .trim()
        .parse()
        .map_err(|e| format!("bad address '{addr}': {e}"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|e| format!("bad value '{value}': {e}"))?;
    Ok((addr, value))
}

/// Writes log records to stderr.
struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&Logger).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_logger(cli.verbose);

    let result = match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Amplify(args) => commands::amplify(args),
        Command::Network(args) => commands::network(args),
        Command::Disasm { file } => commands::disasm(file),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parses() {
        assert_eq!(parse_assignment("1=12"), Ok((1, 12)));
        assert_eq!(parse_assignment(" 2 = -3 "), Ok((2, -3)));
    }

    #[test]
    fn assignment_rejects_garbage() {
        assert!(parse_assignment("12").is_err());
        assert!(parse_assignment("-1=4").is_err());
        assert!(parse_assignment("1=x").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
