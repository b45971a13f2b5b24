//! Command-line interface.

pub mod completions;
pub mod delete;
pub mod info;
pub mod ls;
pub mod output;
pub mod read;
pub mod register;
pub mod session;
pub mod share;
pub mod write;

use clap::{ArgAction, Parser, Subcommand};

/// e3db-cli - command line client for the e3db encrypted record store.
#[derive(Parser)]
#[command(
    name = "e3db-cli",
    about = "E3DB Command Line Interface",
    version,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// e3db configuration profile
    #[arg(
        short,
        long,
        env = "E3DB_PROFILE",
        default_value = "",
        hide_default_value = true
    )]
    pub profile: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Register a client
    Register {
        /// Client e-mail address
        email: String,
        /// e3db api base url
        #[arg(long, value_name = "URL")]
        api: Option<String>,
        /// e3db auth service base url
        #[arg(long, value_name = "URL")]
        auth: Option<String>,
        /// Allow other clients to find you by email
        #[arg(long)]
        public: bool,
    },

    /// Get client information
    Info {
        /// Client unique id or email
        client_id: Option<String>,
    },

    /// List records
    Ls {
        /// Include data in JSON format
        #[arg(short, long)]
        data: bool,
        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
        /// Record content types
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        types: Vec<String>,
        /// Record IDs
        #[arg(short = 'r', long = "record", value_name = "RECORD_ID")]
        records: Vec<String>,
        /// Record writer IDs or email addresses
        #[arg(short = 'w', long = "writer", value_name = "WRITER")]
        writers: Vec<String>,
        /// Record user IDs
        #[arg(short = 'u', long = "user", value_name = "USER_ID")]
        users: Vec<String>,
    },

    /// Read records
    Read {
        /// Record IDs to read
        #[arg(required = true, value_name = "RECORD_ID")]
        record_ids: Vec<String>,
    },

    /// Write a record
    Write {
        /// Type of record to write
        #[arg(value_name = "TYPE")]
        record_type: String,
        /// JSON formatted record data
        data: String,
    },

    /// Delete records
    Delete {
        /// Record IDs to delete
        #[arg(required = true, value_name = "RECORD_ID")]
        record_ids: Vec<String>,
    },

    /// Share records with another client
    Share {
        /// Type of records to share
        #[arg(value_name = "TYPE")]
        record_type: String,
        /// Client unique id or email
        client_id: String,
    },

    /// Stop sharing records with another client
    Unshare {
        /// Type of records to stop sharing
        #[arg(value_name = "TYPE")]
        record_type: String,
        /// Client unique id or email
        client_id: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Global settings, fixed once at startup and handed to every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Profile name; empty selects the default profile
    pub profile: String,
    /// Verbose client logging
    pub debug: bool,
}

impl Options {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            profile: cli.profile.clone(),
            debug: cli.debug,
        }
    }
}

/// Execute a command.
pub fn execute(command: Command, opts: &Options) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Register {
            email,
            api,
            auth,
            public,
        } => register::execute(opts, &email, api, auth, public),
        Info { client_id } => info::execute(opts, client_id.as_deref()),
        Ls {
            data,
            json,
            types,
            records,
            writers,
            users,
        } => ls::execute(
            opts,
            ls::ListArgs {
                data,
                json,
                types,
                records,
                writers,
                users,
            },
        ),
        Read { record_ids } => read::execute(opts, &record_ids),
        Write { record_type, data } => write::execute(opts, &record_type, &data),
        Delete { record_ids } => delete::execute(opts, &record_ids),
        Share {
            record_type,
            client_id,
        } => share::share(opts, &record_type, &client_id),
        Unshare {
            record_type,
            client_id,
        } => share::unshare(opts, &record_type, &client_id),
        Completions { shell } => completions::execute(shell),
    }
}
