use crate::core::resolver::DateResolver;
use crate::domain::model::{OrganizeEvent, OrganizeSummary};
use crate::domain::ports::{Mover, ReportSink};
use crate::utils::error::{Result, SorterError};
use crate::utils::monitor::RunMonitor;
use crate::utils::validation::validate_root;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Sorts every file under a root into `root/<year>/<MM>/`.
pub struct Organizer<M: Mover> {
    resolver: DateResolver,
    mover: M,
    monitor: RunMonitor,
    excluded: Vec<PathBuf>,
}

impl<M: Mover> Organizer<M> {
    pub fn new(resolver: DateResolver, mover: M) -> Self {
        Self {
            resolver,
            mover,
            monitor: RunMonitor::default(),
            excluded: Vec::new(),
        }
    }

    /// Leave `path` alone even if it lives under the root (the run's own report file).
    pub fn exclude(mut self, path: &Path) -> Self {
        match path.canonicalize() {
            Ok(path) => self.excluded.push(path),
            Err(e) => tracing::debug!("not excluding {}: {}", path.display(), e),
        }
        self
    }

    pub fn with_monitor(mut self, monitor: RunMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Single forward pass. Only an invalid root aborts; everything else is
    /// reported per file through `sink`.
    pub fn organize<S: ReportSink>(&mut self, root: &Path, sink: &mut S) -> Result<OrganizeSummary> {
        let started = Instant::now();
        validate_root(root)?;

        let mut summary = OrganizeSummary {
            root: root.to_path_buf(),
            dry_run: self.mover.is_dry_run(),
            ..Default::default()
        };

        tracing::info!(
            "Organizing {}{}",
            root.display(),
            if summary.dry_run { " (dry run)" } else { "" }
        );
        tracing::debug!("Date sources: {}", self.resolver.describe());

        // Snapshot first so files moved during the pass are not visited again.
        let entries: Vec<_> = collect_files(root)
            .into_iter()
            .filter(|entry| !self.is_excluded(entry))
            .collect();
        tracing::info!("Found {} files", entries.len());
        self.monitor.log_stats("Enumeration");

        for entry in entries {
            let event = match entry {
                Ok(path) => self.organize_file(root, &path),
                Err(e) => OrganizeEvent::Failed {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                    reason: SorterError::from(e).to_string(),
                },
            };
            summary.tally(&event);
            sink.record(&event);
        }

        summary.elapsed_ms = started.elapsed().as_millis();
        self.monitor.log_final_stats(summary.files_seen());
        tracing::info!(
            "Done: {} moved, {} already in place, {} hidden skipped, {} failed",
            summary.moved,
            summary.already_in_place,
            summary.skipped_hidden,
            summary.failed
        );

        Ok(summary)
    }

    fn is_excluded(&self, entry: &std::result::Result<PathBuf, walkdir::Error>) -> bool {
        match entry {
            Ok(path) if !self.excluded.is_empty() => path
                .canonicalize()
                .map(|p| self.excluded.contains(&p))
                .unwrap_or(false),
            _ => false,
        }
    }

    fn organize_file(&self, root: &Path, path: &Path) -> OrganizeEvent {
        if is_hidden(path) {
            return OrganizeEvent::SkippedHidden {
                path: path.to_path_buf(),
            };
        }

        let Some(name) = path.file_name() else {
            return OrganizeEvent::Failed {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            };
        };

        let date = self.resolver.resolve(path);
        let folder = date.folder_under(root);
        let destination = folder.join(name);

        if destination == path {
            return OrganizeEvent::AlreadyInPlace {
                path: path.to_path_buf(),
            };
        }

        let placed = self
            .mover
            .ensure_dir(&folder)
            .and_then(|()| self.mover.relocate(path, &destination));

        match placed {
            Ok(()) => OrganizeEvent::Moved {
                from: path.to_path_buf(),
                to: destination,
                date,
            },
            Err(e) => OrganizeEvent::Failed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        }
    }
}

/// Every non-directory entry under `root`, sorted by name. Symlinks to
/// directories are neither followed nor moved.
fn collect_files(root: &Path) -> Vec<std::result::Result<PathBuf, walkdir::Error>> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => {
                let file_type = entry.file_type();
                if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
                    None
                } else {
                    Some(Ok(entry.into_path()))
                }
            }
            Err(e) => Some(Err(e)),
        })
        .collect()
}
