pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::CliConfig;
pub use crate::core::session::{EnrollmentSession, SubmitOutcome};
pub use crate::core::wizard::{Advance, Step, Wizard};
pub use crate::utils::error::{EnrollError, Result};
