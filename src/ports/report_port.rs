//! Report output port trait.

use std::path::PathBuf;

use crate::domain::error::MacdError;
use crate::domain::table::AnalysisTable;

/// Port for writing artifacts derived from a finished analysis.
pub trait ReportPort {
    /// Write the artifacts and return the paths that were created.
    fn write(&self, table: &AnalysisTable) -> Result<Vec<PathBuf>, MacdError>;
}
