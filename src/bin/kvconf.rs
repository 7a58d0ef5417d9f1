//! kvconf CLI
//!
//! Command-line interface for reading and editing settings files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kvconf::{Config, ConfError, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// kvconf settings file tool
#[derive(Parser, Debug)]
#[command(name = "kvconf")]
#[command(about = "Read and edit key = value settings files")]
#[command(version)]
struct Args {
    /// Settings file
    file: PathBuf,

    /// Line reader chunk size in bytes
    #[arg(long, default_value = "1024")]
    chunk_size: usize,

    /// Fraction digits for floats written by set-float
    #[arg(long)]
    float_precision: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value of a key
    Get {
        /// The key to get
        key: String,

        /// Printed when the key is absent
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Set a key to a text value
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Set a key to an integer value
    SetInt {
        key: String,

        #[arg(allow_hyphen_values = true)]
        value: i64,
    },

    /// Set a key to a float value
    SetFloat {
        key: String,

        #[arg(allow_hyphen_values = true)]
        value: f64,
    },

    /// Remove a key
    Remove {
        /// The key to remove
        key: String,
    },

    /// Print every entry in file order
    List,

    /// Rewrite the file in canonical form
    Normalize,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Config::builder().chunk_size(args.chunk_size);
    if let Some(digits) = args.float_precision {
        builder = builder.float_precision(digits);
    }
    let mut store = Store::with_config(builder.build());

    match run(&mut store, &args.file, args.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &mut Store, file: &Path, command: Commands) -> kvconf::Result<ExitCode> {
    match command {
        Commands::Get { key, default } => {
            store.load(file)?;
            match (store.find(&key), default) {
                (Some(entry), _) => println!("{}", entry.value()),
                (None, Some(default)) => println!("{}", default),
                (None, None) => return Ok(ExitCode::FAILURE),
            }
        }
        Commands::Set { key, value } => {
            load_or_empty(store, file)?;
            store.set_string(&key, &value)?;
            store.save(file)?;
        }
        Commands::SetInt { key, value } => {
            load_or_empty(store, file)?;
            store.set_int(&key, value)?;
            store.save(file)?;
        }
        Commands::SetFloat { key, value } => {
            load_or_empty(store, file)?;
            store.set_float(&key, value)?;
            store.save(file)?;
        }
        Commands::Remove { key } => {
            store.load(file)?;
            if !store.remove(&key) {
                return Ok(ExitCode::FAILURE);
            }
            store.save(file)?;
        }
        Commands::List => {
            store.load(file)?;
            store.save_to(std::io::stdout().lock())?;
        }
        Commands::Normalize => {
            let stats = store.load(file)?;
            tracing::info!(skipped = stats.lines_skipped, "normalizing");
            store.save(file)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Load `file`, treating a missing file as an empty store
fn load_or_empty(store: &mut Store, file: &Path) -> kvconf::Result<()> {
    match store.load(file) {
        Ok(_) => Ok(()),
        Err(ConfError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
