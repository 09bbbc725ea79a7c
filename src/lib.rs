pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliArgs, Command};

pub use crate::adapters::{CliNavigator, ConsoleNotifier, FileSessionStore, TextScanner};
pub use crate::config::ClientConfig;
pub use crate::core::api::ApiClient;
pub use crate::core::bind::DoctorBinder;
pub use crate::core::trust::{AllowList, TrustValidator};
pub use crate::domain::model::BindingOutcome;
pub use crate::utils::error::{ClientError, Result};
