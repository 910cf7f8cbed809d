// Application layer: wires settings, adapters and the organizer into one run.

use crate::adapters::{CsvReportSink, DryRunMover, FsMover, LogSink};
use crate::config::Settings;
use crate::core::organizer::Organizer;
use crate::core::resolver::DateResolver;
use crate::domain::model::OrganizeSummary;
use crate::domain::ports::{Mover, ReportSink};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use crate::utils::validation::validate_root;
use std::path::Path;

/// Runs one organize pass over `root` with the standard date chain.
///
/// Per-file problems end up in the summary; the returned error is reserved for
/// an invalid root or an unwritable report.
pub fn run(settings: &Settings, root: &Path) -> Result<OrganizeSummary> {
    run_with_sink(settings, root, LogSink::new(!settings.json))
}

pub fn run_with_sink<S: ReportSink>(settings: &Settings, root: &Path, sink: S) -> Result<OrganizeSummary> {
    // Nothing, not even the report file, is created for a bad root.
    validate_root(root)?;

    let mover: Box<dyn Mover> = if settings.dry_run {
        Box::new(DryRunMover::new())
    } else {
        Box::new(FsMover::new())
    };

    let report = settings
        .report_path
        .as_ref()
        .map(|path| CsvReportSink::create(path))
        .transpose()?;

    let mut organizer = Organizer::new(DateResolver::standard(), mover)
        .with_monitor(RunMonitor::new(settings.monitor));
    if let Some(report) = &report {
        organizer = organizer.exclude(report.path());
    }

    let mut sink = (sink, report);
    let summary = organizer.organize(root, &mut sink)?;
    sink.finish()?;

    Ok(summary)
}
