pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{Settings, TomlConfig};

pub use adapters::{CsvReportSink, DryRunMover, FsMover, LogSink, MemorySink};
pub use core::{organizer::Organizer, resolver::DateResolver};
pub use domain::model::{DateOrigin, OrganizeEvent, OrganizeSummary, ResolvedDate};
pub use utils::error::{Result, SorterError};
