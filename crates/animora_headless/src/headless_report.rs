//! Report output model for headless scenario runs.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

/// Report status for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a headless run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Frames on which the engine actually ran
    pub delivered_frames: u64,
    /// Effects the engine dropped, as `step N: description`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_effects: Vec<String>,
}

/// Counters copied into every report
#[derive(Debug, Clone, Copy, Default)]
pub struct RunTotals {
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    pub delivered_frames: u64,
}

impl HeadlessReport {
    pub fn passed(totals: RunTotals, skipped_effects: Vec<String>) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            elapsed_frames: totals.elapsed_frames,
            elapsed_ms: totals.elapsed_ms,
            delivered_frames: totals.delivered_frames,
            skipped_effects,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        totals: RunTotals,
        skipped_effects: Vec<String>,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            elapsed_frames: totals.elapsed_frames,
            elapsed_ms: totals.elapsed_ms,
            delivered_frames: totals.delivered_frames,
            skipped_effects,
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let payload = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(payload)
    }

    pub fn write_to_path(&self, path: &Path, pretty: bool) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = self.to_json(pretty)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, payload)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<()> {
        let payload = self.to_json(pretty)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
