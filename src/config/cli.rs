use crate::config::{toml_config::TomlConfig, ClientConfig};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "clinic-client")]
#[command(about = "Clinic patient client: account, profile and doctor binding")]
pub struct CliArgs {
    /// Optional TOML config file (endpoints, allow-list)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL override
    #[arg(long)]
    pub api_base: Option<String>,

    /// Session token file
    #[arg(long, default_value = ".clinic_session.json")]
    pub session_file: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a patient account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        symptoms: Option<String>,
        #[arg(long)]
        assigned_doctor_id: Option<i64>,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Show the current patient profile
    Info,
    /// Update profile fields (mobile, address, symptoms)
    Update {
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        symptoms: Option<String>,
    },
    /// List available doctors
    Doctors,
    /// Log out and discard the stored token
    Logout,
    /// Bind a doctor from scanned code content
    Bind {
        /// Scanned code content (JSON); read from stdin when omitted
        scan: Option<String>,
    },
}

impl CliArgs {
    /// defaults <- config file <- CLI flags
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::default();
        if let Some(path) = &self.config {
            config = TomlConfig::from_file(path)?.merge_into(config);
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        Ok(config)
    }
}
