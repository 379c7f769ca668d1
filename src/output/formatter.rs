use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::cli::OutputFormat;

use super::{ArtifactReport, IdentifierReport};

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn identifier(report: &IdentifierReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Text => {
                let mut out = format!("{}\n", report.identifier);
                for segment in &report.segments {
                    writeln!(out, "  {:<10} {}", segment.segment_type(), segment.value())?;
                }
                Ok(out.trim_end().to_string())
            }
        }
    }

    pub fn artifact(report: &ArtifactReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Text => {
                let mut out = format!("{}\n", report.identifier);
                writeln!(out, "  kind       {}", report.kind)?;
                writeln!(out, "  container  {}", report.container)?;
                if let Some(executable) = &report.executable {
                    writeln!(
                        out,
                        "  executable {executable}({})",
                        report.parameters.join(", ")
                    )?;
                }
                Ok(out.trim_end().to_string())
            }
        }
    }

    fn json<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}
