//! File-system boundary consumed by the planner.
//!
//! Every call is async so a front end can stay responsive while the disk
//! works. Implementations own real file access; tests substitute fakes.

use std::future::Future;
use std::path::Path;

use crate::core::planner_day::PlannerDay;
use crate::error::{PlannerError, Result};
use crate::format::parser::PlannerParser;
use crate::format::writer::PlannerWriter;

pub trait PlannerStore: Send + Sync {
    fn check_file_exists(&self, path: &Path) -> impl Future<Output = Result<bool>> + Send;

    /// Read and parse a planner file. Fails on I/O or UTF-8 decode errors.
    fn read_planner_file(&self, path: &Path) -> impl Future<Output = Result<PlannerDay>> + Send;

    /// Serialize `day` and replace the file contents.
    fn write_planner_file(
        &self,
        path: &Path,
        day: &PlannerDay,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// User-cancelable folder chooser. `None` means the user backed out.
pub trait FolderPicker: Send + Sync {
    fn select_folder(&self) -> impl Future<Output = Option<String>> + Send;
}

/// Planner files on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl PlannerStore for FsStore {
    async fn check_file_exists(&self, path: &Path) -> Result<bool> {
        tokio::fs::try_exists(path)
            .await
            .map_err(|e| PlannerError::read(path, e))
    }

    async fn read_planner_file(&self, path: &Path) -> Result<PlannerDay> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PlannerError::read(path, e))?;
        Ok(PlannerParser::parse(&content))
    }

    async fn write_planner_file(&self, path: &Path, day: &PlannerDay) -> Result<()> {
        let content = PlannerWriter::write_day(day);
        tokio::fs::write(path, content)
            .await
            .map_err(|e| PlannerError::write(path, e))
    }
}
