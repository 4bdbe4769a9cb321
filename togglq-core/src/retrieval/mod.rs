//! Report retrieval: request options, the request queue and the coordinator
//! that ties them to the report cache.

mod coordinator;
mod directory;
mod export;
mod options;
mod queue;
mod source;

pub use coordinator::ReportCoordinator;
pub use directory::Directory;
pub use export::{ExportSource, ReportExport};
pub use options::ReportOptions;
pub use queue::{Deferred, RequestQueue};
pub use source::{ReportPage, ReportSource};
