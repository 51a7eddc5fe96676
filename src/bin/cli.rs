//! kvqueue CLI
//!
//! Runs one command against a file-backed in-memory store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use kvqueue::command::{CommandKind, CommandOptions, QueueOrder};
use kvqueue::{Config, MemoryStore, Request, SerializedSession};
use tracing_subscriber::{fmt, EnvFilter};

/// kvqueue CLI
#[derive(Parser, Debug)]
#[command(name = "kvqueue-cli")]
#[command(about = "Queue and key/value commands against a kvqueue store")]
#[command(version)]
struct Args {
    /// Snapshot file holding the store
    #[arg(short, long, default_value = "./kvqueue.state")]
    state: PathBuf,

    /// Don't write the store back after the command
    #[arg(long)]
    no_persist: bool,

    /// Pop newest elements first
    #[arg(long, global = true)]
    lifo: bool,

    /// Skip the parent-attribute check
    #[arg(long, global = true)]
    no_parent_check: bool,

    /// Access password
    #[arg(short, long, global = true)]
    password: Option<String>,

    /// Expiration in seconds (0 = never)
    #[arg(short, long, default_value = "0", allow_negative_numbers = true, global = true)]
    expire: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add an element to a queue
    Qpush {
        prefix: String,
        value: Option<String>,
    },

    /// Remove elements from a queue
    Qpop {
        prefix: String,
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Add a key/value pair to a keyed queue
    Kqpush {
        prefix: String,
        key: String,
        value: Option<String>,
    },

    /// Remove key/value pairs from a keyed queue
    Kqpop {
        prefix: String,
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
    },

    /// Get a value by key
    Get { key: String },

    /// Set a key-value pair
    Set {
        key: String,
        value: Option<String>,
        /// Drop the key's subkey list
        #[arg(long)]
        clear_subkeys: bool,
    },

    /// Delete a key
    Del {
        key: String,
        /// Delete its subkeys too
        #[arg(long)]
        subkeys: bool,
    },

    /// Rename a key
    Rename {
        key: String,
        new_key: String,
        /// Parent whose subkey list holds the key
        #[arg(long)]
        parent: Option<String>,
    },

    /// Add a subkey under a key
    SubkeyAdd {
        key: String,
        subkey: String,
        value: Option<String>,
    },

    /// List the subkeys of a key
    Subkeys { key: String },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = Config::builder()
        .state_path(&args.state)
        .persist(!args.no_persist)
        .defaults(CommandOptions {
            order: if args.lifo { QueueOrder::Lifo } else { QueueOrder::Fifo },
            check_parent_attrs: !args.no_parent_check,
            password: args.password.clone(),
            expiration_secs: args.expire,
        })
        .build();

    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run(args.command, &config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute one command; `Ok(false)` when the store rejected it
fn run(command: Commands, config: &Config) -> kvqueue::Result<bool> {
    config.validate()?;
    let request = to_request(command, config.defaults.clone());
    let command = request.into_command()?;

    let store = if config.state_path.exists() {
        MemoryStore::load(&config.state_path)?
    } else {
        tracing::info!("Creating new store at {}", config.state_path.display());
        MemoryStore::new()
    };
    let session = SerializedSession::new(store);

    let result = command.execute(&session)?;
    println!("{}", result);

    if config.persist {
        session.transport().save(&config.state_path)?;
    }

    Ok(result.is_success())
}

fn to_request(command: Commands, options: CommandOptions) -> Request {
    let request = match command {
        Commands::Qpush { prefix, value } => {
            with_value(Request::new(CommandKind::QueueAdd, prefix), value)
        }
        Commands::Qpop { prefix, count } => {
            Request::new(CommandKind::QueueRemove, prefix).count(count)
        }
        Commands::Kqpush { prefix, key, value } => {
            with_value(Request::new(CommandKind::KeyQueueAdd, prefix).aux(key), value)
        }
        Commands::Kqpop { prefix, count } => {
            Request::new(CommandKind::KeyQueueRemove, prefix).count(count)
        }
        Commands::Get { key } => Request::new(CommandKind::Get, key),
        Commands::Set {
            key,
            value,
            clear_subkeys,
        } => with_value(Request::new(CommandKind::Set, key).subkeys(clear_subkeys), value),
        Commands::Del { key, subkeys } => Request::new(CommandKind::Remove, key).subkeys(subkeys),
        Commands::Rename {
            key,
            new_key,
            parent,
        } => {
            let request = Request::new(CommandKind::Rename, key).aux(new_key);
            match parent {
                Some(parent) => request.parent(parent),
                None => request,
            }
        }
        Commands::SubkeyAdd { key, subkey, value } => {
            with_value(Request::new(CommandKind::AddSubkey, key).aux(subkey), value)
        }
        Commands::Subkeys { key } => Request::new(CommandKind::GetSubkeys, key),
    };
    request.options(options)
}

/// Missing values are left for the factory to reject
fn with_value(request: Request, value: Option<String>) -> Request {
    match value {
        Some(value) => request.value(value),
        None => request,
    }
}
