use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::scan_submission::domain::{DEFAULT_MAX_TOKENS, DEFAULT_PROMPT, DEFAULT_TEMPERATURE};

/// Submit documents to a remote malware classification service
#[derive(Parser, Debug)]
#[command(name = "docscan")]
#[command(version)]
#[command(
    about = "Submit documents to a remote malware classification service",
    long_about = None
)]
pub struct Args {
    /// Path to a config file (defaults to ./docscan.config.yml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the classification service
    #[arg(long, global = true, value_name = "URL", env = "DOCSCAN_API_BASE_URL")]
    pub api_url: Option<String>,

    /// Where the login session is stored
    #[arg(long, global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upload a document and print the verdict
    Scan {
        /// Document to scan (.pdf, .docx, .doc or .json by default)
        file: PathBuf,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Log in and store the session
    Login {
        /// Account e-mail or user name
        #[arg(short, long)]
        username: String,

        /// Password (read from DOCSCAN_PASSWORD when omitted)
        #[arg(
            short,
            long,
            env = "DOCSCAN_PASSWORD",
            hide_env_values = true
        )]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show scan statistics and recent activity
    Dashboard {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show model evaluation figures
    Analysis {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Save the evaluation image to this path
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
    },

    /// Ask the service's assistant
    #[command(visible_alias = "ask")]
    Ai {
        /// Prompt text
        #[arg(default_value = DEFAULT_PROMPT)]
        prompt: String,

        /// Upper bound on the reply length in tokens
        #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
        max_tokens: u32,

        /// Sampling temperature
        #[arg(long, default_value_t = DEFAULT_TEMPERATURE, allow_negative_numbers = true)]
        temperature: f32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
