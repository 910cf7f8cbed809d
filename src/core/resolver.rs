use crate::adapters::{ExifDateSource, ModifiedTimeSource};
use crate::domain::model::{DateOrigin, ResolvedDate};
use crate::domain::ports::DateSource;
use chrono::Local;
use std::path::Path;

/// Ordered chain of date sources; the first one with an answer wins.
pub struct DateResolver {
    sources: Vec<Box<dyn DateSource>>,
}

impl DateResolver {
    pub fn new(sources: Vec<Box<dyn DateSource>>) -> Self {
        Self { sources }
    }

    /// Image metadata first, then the modification time.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(ExifDateSource::new()),
            Box::new(ModifiedTimeSource::new()),
        ])
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn describe(&self) -> String {
        self.source_names().join(" -> ")
    }

    /// Never fails. When every source comes up empty the current local time is used.
    pub fn resolve(&self, path: &Path) -> ResolvedDate {
        for source in &self.sources {
            match source.date_for(path) {
                Ok(Some(dt)) => return ResolvedDate::from_datetime(dt, source.origin()),
                Ok(None) => {
                    tracing::debug!("{}: no date for {}", source.name(), path.display());
                }
                Err(e) => {
                    tracing::debug!("{}: skipping {}: {}", source.name(), path.display(), e);
                }
            }
        }

        tracing::warn!(
            "No date source answered for {}, using the current time",
            path.display()
        );
        ResolvedDate::from_datetime(Local::now().naive_local(), DateOrigin::Now)
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, SorterError};
    use chrono::{NaiveDate, NaiveDateTime};

    struct Fixed(Option<NaiveDateTime>, DateOrigin);

    impl DateSource for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn origin(&self) -> DateOrigin {
            self.1
        }

        fn date_for(&self, _path: &Path) -> Result<Option<NaiveDateTime>> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl DateSource for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn origin(&self) -> DateOrigin {
            DateOrigin::Metadata
        }

        fn date_for(&self, _path: &Path) -> Result<Option<NaiveDateTime>> {
            Err(SorterError::MissingCaptureDate)
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_first_answer_wins() {
        let resolver = DateResolver::new(vec![
            Box::new(Fixed(Some(at(2021, 7, 4)), DateOrigin::Metadata)),
            Box::new(Fixed(Some(at(2000, 1, 1)), DateOrigin::ModifiedTime)),
        ]);
        let date = resolver.resolve(Path::new("x.jpg"));
        assert_eq!((date.year, date.month, date.day), (2021, 7, 4));
        assert_eq!(date.origin, DateOrigin::Metadata);
    }

    #[test]
    fn test_errors_and_empty_answers_fall_through() {
        let resolver = DateResolver::new(vec![
            Box::new(Broken),
            Box::new(Fixed(None, DateOrigin::Metadata)),
            Box::new(Fixed(Some(at(2000, 1, 1)), DateOrigin::ModifiedTime)),
        ]);
        let date = resolver.resolve(Path::new("x.jpg"));
        assert_eq!(date.year, 2000);
        assert_eq!(date.origin, DateOrigin::ModifiedTime);
    }

    #[test]
    fn test_exhausted_chain_uses_now() {
        let resolver = DateResolver::new(vec![Box::new(Broken)]);
        let date = resolver.resolve(Path::new("x.jpg"));
        assert_eq!(date.origin, DateOrigin::Now);
    }

    #[test]
    fn test_standard_chain_order() {
        assert_eq!(
            DateResolver::standard().source_names(),
            vec!["exif", "modified_time"]
        );
        assert_eq!(DateResolver::standard().describe(), "exif -> modified_time");
    }
}
