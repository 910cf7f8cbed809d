// Adapters layer: concrete implementations of the domain ports.

pub mod exif_source;
pub mod mover;
pub mod mtime_source;
pub mod sinks;

pub use exif_source::ExifDateSource;
pub use mover::{DryRunMover, FsMover};
pub use mtime_source::ModifiedTimeSource;
pub use sinks::{CsvReportSink, LogSink, MemorySink};
