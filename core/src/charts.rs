use anyhow::Result;
use serde_json::Value;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};

use crate::error::TalentError;

/// Which aggregation a chart artifact visualizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SkillDistribution,
    SalaryComparison,
    RegionalDistribution,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SkillDistribution => "skill_distribution",
            Self::SalaryComparison => "salary_comparison",
            Self::RegionalDistribution => "regional_distribution",
        }
    }
}

/// Consumer of aggregation payloads. The engine only hands data across this
/// seam; whatever rendering happens lives behind it.
pub trait ChartSink {
    fn render(&self, kind: ChartKind, job_title: &str, payload: &Value) -> Result<()>;
}

/// Discards every payload. For callers that only want the data back.
pub struct NullChartSink;

impl ChartSink for NullChartSink {
    fn render(&self, _kind: ChartKind, _job_title: &str, _payload: &Value) -> Result<()> {
        Ok(())
    }
}

/// Writes each aggregation payload as pretty JSON under a directory, named
/// `{stem}_{kind}.json` where `stem` is the sanitized job title.
pub struct JsonChartSink {
    root: PathBuf,
}

impl JsonChartSink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ChartSink for JsonChartSink {
    fn render(&self, kind: ChartKind, job_title: &str, payload: &Value) -> Result<()> {
        let stem = sanitize_identifier(job_title)?;
        create_dir_all(&self.root)?;
        let path = self.root.join(format!("{stem}_{}.json", kind.as_str()));
        fs::write(&path, serde_json::to_string_pretty(payload)?)?;
        tracing::info!(path = %path.display(), "chart payload written");
        Ok(())
    }
}

/// Reduce a caller-supplied job title to a file stem that cannot traverse
/// paths. ASCII alphanumerics, `-` and `_` pass through; any other run of
/// characters (spaces, `/`, `..`, NULs) collapses to a single `_`. A title
/// with nothing usable in it is rejected.
pub fn sanitize_identifier(identifier: &str) -> Result<String, TalentError> {
    let mut stem = String::with_capacity(identifier.len());
    for c in identifier.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            stem.push(c);
        } else if !stem.ends_with('_') && !stem.is_empty() {
            stem.push('_');
        }
    }
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        return Err(TalentError::UnsafeIdentifier(identifier.to_string()));
    }
    Ok(stem.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_collapses_unsafe_runs() {
        assert_eq!(sanitize_identifier("Web Developer").unwrap(), "Web_Developer");
        assert_eq!(sanitize_identifier("../../etc/passwd").unwrap(), "etc_passwd");
        assert_eq!(sanitize_identifier("Data\0Analyst").unwrap(), "Data_Analyst");
    }

    #[test]
    fn sanitize_rejects_titles_with_no_usable_characters() {
        assert!(sanitize_identifier("../..").is_err());
        assert!(sanitize_identifier("///").is_err());
        assert!(sanitize_identifier("").is_err());
    }

    #[test]
    fn json_sink_writes_inside_its_root() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonChartSink::new(dir.path());
        sink.render(
            ChartKind::SkillDistribution,
            "Web/Developer",
            &json!({"Python": 3}),
        )
        .unwrap();
        let expected = dir.path().join("Web_Developer_skill_distribution.json");
        assert!(expected.exists());
        let text = std::fs::read_to_string(expected).unwrap();
        assert!(text.contains("\"Python\""));
    }
}
