pub mod organizer;
pub mod resolver;

pub use crate::domain::model::{DateOrigin, OrganizeEvent, OrganizeSummary, ResolvedDate};
pub use crate::domain::ports::{DateSource, Mover, ReportSink};
pub use crate::utils::error::Result;
