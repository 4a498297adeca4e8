//! Report generation port trait.

use std::path::Path;

use crate::domain::backtest::UniverseResult;
use crate::domain::error::OmxtraderError;
use crate::domain::strategy::Strategy;

/// Port for writing run artifacts.
pub trait ReportPort {
    /// Writes the full set of report files into `output_dir`, creating the
    /// directory if needed.
    fn write_report(
        &self,
        result: &UniverseResult,
        strategy: &Strategy,
        output_dir: &Path,
    ) -> Result<(), OmxtraderError>;
}
