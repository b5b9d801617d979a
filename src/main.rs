//! fixgen: create, read and hash random fixture files.

mod report;
mod transcript;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fixture_files::{FixtureDir, TransferConfig, DEFAULT_CHUNK_SIZE};

use crate::report::{write_report, Operation, Report};
use crate::transcript::Transcript;

const DEFAULT_DIR: &str = ".";

/// CLI arguments for the fixture generator.
#[derive(Parser, Debug)]
#[command(
    name = "fixgen",
    version,
    about = "Create and hash random fixture files"
)]
struct Args {
    /// Fixture root directory; file names are resolved relative to it
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DIR, global = true)]
    dir: PathBuf,

    /// Bytes moved per chunk by the chunked operations
    #[arg(
        long,
        value_name = "BYTES",
        env = "FIXGEN_CHUNK_SIZE",
        default_value_t = DEFAULT_CHUNK_SIZE,
        global = true
    )]
    chunk_size: u64,

    /// Print a JSON report on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "FILE", global = true)]
    report: Option<PathBuf>,

    /// Print a transcript of each step on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write SIZE random bytes in a single transfer
    Create { name: String, size: usize },
    /// Read exactly SIZE bytes back
    Read { name: String, size: usize },
    /// Write SIZE random bytes chunk by chunk
    Random { name: String, size: u64 },
    /// Write SIZE random bytes and print the SHA-512 of the first HASH_SIZE
    Hashed {
        name: String,
        size: u64,
        /// Number of leading bytes to hash (defaults to SIZE)
        #[arg(long, value_name = "BYTES")]
        hash_size: Option<u64>,
    },
    /// Stream SIZE bytes of a file through SHA-512
    ReadHashed { name: String, size: u64 },
    /// Load a file into memory and hash its first SIZE bytes
    Hash {
        name: String,
        /// Number of leading bytes to hash (defaults to the file length)
        #[arg(long, value_name = "BYTES")]
        size: Option<usize>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    run(args)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute one fixture operation and emit its report.
fn run(args: Args) -> Result<()> {
    let mut transcript = Transcript::new(args.verbose);
    let config = TransferConfig::new(args.chunk_size).context("invalid --chunk-size")?;
    fs::create_dir_all(&args.dir)
        .with_context(|| format!("create fixture dir {}", args.dir.display()))?;
    let fixtures = FixtureDir::new(&args.dir).with_config(config);
    let chunk_size = config.chunk_size();
    transcript.note(format!(
        "fixture root {} (chunk size {chunk_size})",
        fixtures.root().display()
    ));

    let root = fixtures.root();
    let report = match args.command {
        Command::Create { name, size } => {
            transcript.note(format!("creating {name} with {size} bytes"));
            let data = fixtures
                .create_file(&name, size)
                .with_context(|| format!("create {name}"))?;
            Report::new(Operation::Create, &root.join(&name), data.len() as u64, chunk_size)
        }
        Command::Read { name, size } => {
            transcript.note(format!("reading {size} bytes from {name}"));
            let data = fixtures
                .read_file(&name, size)
                .with_context(|| format!("read {name}"))?;
            Report::new(Operation::Read, &root.join(&name), data.len() as u64, chunk_size)
        }
        Command::Random { name, size } => {
            transcript.note(format!("writing {size} random bytes to {name}"));
            let written = fixtures
                .create_random_file(&name, size)
                .with_context(|| format!("create random {name}"))?;
            Report::new(Operation::Random, &root.join(&name), written, chunk_size)
        }
        Command::Hashed {
            name,
            size,
            hash_size,
        } => {
            let hash_size = hash_size.unwrap_or(size);
            transcript.note(format!(
                "writing {size} random bytes to {name}, hashing {hash_size}"
            ));
            let (written, digest) = fixtures
                .create_random_hashed_file_with_hash_size(&name, size, hash_size)
                .with_context(|| format!("create hashed {name}"))?;
            transcript.digest("write", &digest);
            Report::new(Operation::Hashed, &root.join(&name), written, chunk_size)
                .with_digest(hash_size, digest)
        }
        Command::ReadHashed { name, size } => {
            transcript.note(format!("hashing {size} bytes of {name}"));
            let (read, digest) = fixtures
                .read_hashed_file(&name, size)
                .with_context(|| format!("read hashed {name}"))?;
            transcript.digest("read", &digest);
            Report::new(Operation::ReadHashed, &root.join(&name), read, chunk_size)
                .with_digest(read, digest)
        }
        Command::Hash { name, size } => {
            let size = match size {
                Some(size) => size,
                None => {
                    let path = fixtures.path(&name)?;
                    let len = fs::metadata(&path)
                        .with_context(|| format!("stat {}", path.display()))?
                        .len();
                    usize::try_from(len).context("file too large to hash in memory")?
                }
            };
            transcript.note(format!("hashing {size} bytes of {name} in memory"));
            let digest = fixtures
                .hash_file_prefix(&name, size)
                .with_context(|| format!("hash {name}"))?;
            transcript.digest("memory", &digest);
            Report::new(Operation::Hash, &root.join(&name), size as u64, chunk_size)
                .with_digest(size as u64, digest)
        }
    };

    if let Some(report_path) = &args.report {
        write_report(report_path, &report)?;
        transcript.note(format!("report written to {}", report_path.display()));
    }
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}: {} bytes", report.path, report.bytes);
        if let Some(digest) = &report.sha512 {
            println!("sha512: {digest}");
        }
    }
    Ok(())
}
