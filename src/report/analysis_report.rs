//! Machine-readable analysis report and artifact bundle
//!
//! The JSON report records the run metadata, dataset shape, the three
//! statistic tables and the list of rendered artifacts. The bundle packs
//! every artifact (plus the report when present) into one zip archive.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::Analysis;
use crate::render::Artifact;
use crate::report::StatTable;

pub const REPORT_FILE_NAME: &str = "analysis_report.json";
pub const BUNDLE_FILE_NAME: &str = "eda_artifacts.zip";

/// Run metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub tool_version: String,
    pub input_file: String,
    pub dpi: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetShape {
    pub rows: usize,
    pub columns: usize,
    pub alcohol_values_filled: usize,
    pub missing_after_cleaning: usize,
}

/// A rendered image as listed in the report
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl From<&Artifact> for ArtifactEntry {
    fn from(artifact: &Artifact) -> Self {
        Self {
            file_name: artifact.file_name.clone(),
            width: artifact.width,
            height: artifact.height,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub dataset: DatasetShape,
    pub summary_statistics: StatTable,
    pub cost_by_age_group: StatTable,
    pub chronic_by_bmi: StatTable,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactEntry>,
}

impl AnalysisReport {
    pub fn new(
        input: &Path,
        dpi: u32,
        shape: (usize, usize),
        analysis: &Analysis,
        artifacts: &[Artifact],
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: input.display().to_string(),
                dpi,
            },
            dataset: DatasetShape {
                rows: shape.0,
                columns: shape.1,
                alcohol_values_filled: analysis.alcohol_rewritten,
                missing_after_cleaning: analysis.missing_after_cleaning,
            },
            summary_statistics: analysis.summary.clone(),
            cost_by_age_group: analysis.age_group_table(),
            chronic_by_bmi: analysis.bmi_chronic_table(),
            artifacts: artifacts.iter().map(ArtifactEntry::from).collect(),
        }
    }
}

/// Export the analysis report to a JSON file
pub fn export_analysis_report(report: &AnalysisReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize analysis report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write analysis report to {}", output_path.display()))?;

    Ok(())
}

/// Package the artifacts, and the report file when given, into a zip archive.
///
/// Artifacts are taken from memory; the individual files are left in place.
pub fn package_artifacts(
    artifacts: &[Artifact],
    report_path: Option<&Path>,
    zip_path: &Path,
) -> Result<()> {
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let zip_file = std::fs::File::create(zip_path)
        .with_context(|| format!("Failed to create zip file: {}", zip_path.display()))?;

    let mut zip = ZipWriter::new(zip_file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut add_entry = |name: &str, content: &[u8]| -> Result<()> {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to add {} to zip", name))?;
        zip.write_all(content)?;
        Ok(())
    };

    for artifact in artifacts {
        add_entry(&artifact.file_name, &artifact.bytes)?;
    }

    if let Some(path) = report_path {
        let content = std::fs::read(path)
            .with_context(|| format!("Failed to open file: {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(REPORT_FILE_NAME);
        add_entry(name, &content)?;
    }

    zip.finish().context("Failed to finalize zip file")?;

    Ok(())
}
