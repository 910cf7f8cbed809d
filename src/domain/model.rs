use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrigin {
    Metadata,
    ModifiedTime,
    Now,
}

impl fmt::Display for DateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateOrigin::Metadata => "metadata",
            DateOrigin::ModifiedTime => "modified_time",
            DateOrigin::Now => "now",
        };
        f.write_str(label)
    }
}

/// The effective date of one file: calendar fields plus an `HH-MM-SS` time string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: String,
    pub origin: DateOrigin,
}

impl ResolvedDate {
    pub fn from_datetime(dt: NaiveDateTime, origin: DateOrigin) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            time: format!("{:02}-{:02}-{:02}", dt.hour(), dt.minute(), dt.second()),
            origin,
        }
    }

    pub fn month_folder(&self) -> String {
        format!("{:02}", self.month)
    }

    /// `root/<year>/<MM>`
    pub fn folder_under(&self, root: &Path) -> PathBuf {
        root.join(self.year.to_string()).join(self.month_folder())
    }
}

/// One report entry per file visited by the organizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrganizeEvent {
    Moved {
        from: PathBuf,
        to: PathBuf,
        date: ResolvedDate,
    },
    AlreadyInPlace {
        path: PathBuf,
    },
    SkippedHidden {
        path: PathBuf,
    },
    Failed {
        path: PathBuf,
        reason: String,
    },
}

impl OrganizeEvent {
    pub fn path(&self) -> &Path {
        match self {
            OrganizeEvent::Moved { from, .. } => from,
            OrganizeEvent::AlreadyInPlace { path }
            | OrganizeEvent::SkippedHidden { path }
            | OrganizeEvent::Failed { path, .. } => path,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OrganizeEvent::Moved { .. } => "moved",
            OrganizeEvent::AlreadyInPlace { .. } => "already_in_place",
            OrganizeEvent::SkippedHidden { .. } => "skipped_hidden",
            OrganizeEvent::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizeSummary {
    pub root: PathBuf,
    pub dry_run: bool,
    pub moved: usize,
    pub already_in_place: usize,
    pub skipped_hidden: usize,
    pub failed: usize,
    pub elapsed_ms: u128,
}

impl OrganizeSummary {
    pub fn tally(&mut self, event: &OrganizeEvent) {
        match event {
            OrganizeEvent::Moved { .. } => self.moved += 1,
            OrganizeEvent::AlreadyInPlace { .. } => self.already_in_place += 1,
            OrganizeEvent::SkippedHidden { .. } => self.skipped_hidden += 1,
            OrganizeEvent::Failed { .. } => self.failed += 1,
        }
    }

    pub fn files_seen(&self) -> usize {
        self.moved + self.already_in_place + self.skipped_hidden + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_resolved_date_components() {
        let date = ResolvedDate::from_datetime(at(2021, 7, 4, 10, 15, 30), DateOrigin::Metadata);
        assert_eq!(date.year, 2021);
        assert_eq!(date.month, 7);
        assert_eq!(date.day, 4);
        assert_eq!(date.time, "10-15-30");
        assert_eq!(date.month_folder(), "07");
    }

    #[test]
    fn test_folder_under_root() {
        let date = ResolvedDate::from_datetime(at(2022, 11, 2, 8, 0, 0), DateOrigin::ModifiedTime);
        assert_eq!(
            date.folder_under(Path::new("/photos")),
            Path::new("/photos").join("2022").join("11")
        );
        assert_eq!(date.time, "08-00-00");
    }

    #[test]
    fn test_summary_tally() {
        let mut summary = OrganizeSummary::default();
        summary.tally(&OrganizeEvent::SkippedHidden {
            path: PathBuf::from(".DS_Store"),
        });
        summary.tally(&OrganizeEvent::Failed {
            path: PathBuf::from("a.jpg"),
            reason: "denied".to_string(),
        });
        assert_eq!(summary.skipped_hidden, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.files_seen(), 2);
    }
}
