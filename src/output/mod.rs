//! Output module
//! Terminal panels, export artifacts and shareable links

pub mod console;
pub mod report;
pub mod share;

pub use console::{ConsoleFormatter, Panel};
pub use report::{ExportKind, ReportGenerator};
