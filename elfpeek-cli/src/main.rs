use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use elfpeek_core::{Binary, DecodeError, LoadError, Report, render, verdict};
use std::io::{self, Write};
use std::process::ExitCode;

const EXIT_CODES: &str = "\
Exit codes:
  0  header decoded and printed (including non-ELF input)
  1  usage error
  2  file could not be opened or read
  3  file shorter than an ELF64 header
  4  --strict checks failed";

/// Minimal ELF header inspector
#[derive(Parser, Debug)]
#[command(
    name = "elfpeek",
    about = "Decode and print the 64-byte ELF file header",
    version,
    author,
    after_help = EXIT_CODES
)]
struct Cli {
    /// Path to binary file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Check header sizes and table bounds against the file
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success = 0,
    Usage = 1,
    Io = 2,
    Truncated = 3,
    Strict = 4,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Status {
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::Decode(DecodeError::Truncated { .. })) => Status::Truncated,
            _ => Status::Io,
        }
    }
}

fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Status> {
    let bin = Binary::open(&cli.path)?;

    match cli.format {
        Format::Text => {
            write!(out, "{}", render(&bin.header))?;
            writeln!(out, "{}", verdict(&bin.header))?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, &Report::new(&bin.header))?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    if cli.strict {
        if !bin.is_elf() {
            log::warn!("{}: not an ELF file, nothing to check", bin.path);
        }
        let violations = bin.check();
        if !violations.is_empty() {
            for v in &violations {
                eprintln!("{} {}: {v}", "strict:".yellow().bold(), bin.path);
            }
            return Ok(Status::Strict);
        }
    }

    Ok(Status::Success)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                Status::Usage.into()
            } else {
                Status::Success.into()
            };
        }
    };

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            Status::for_error(&err).into()
        }
    }
}
