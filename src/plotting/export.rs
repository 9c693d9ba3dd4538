// plotting/export.rs
// Export of sweep series for the chart and for spreadsheets

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::SweepSeries;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    /// `[{ "x": "1.0", "y": 0.0466 }, ...]` as the chart consumes it
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

pub fn write_series<W: Write>(
    series: &SweepSeries,
    format: ExportFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        ExportFormat::Csv => write_delimited(series, ',', writer),
        ExportFormat::Tsv => write_delimited(series, '\t', writer),
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &series.chart_points())?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn write_delimited<W: Write>(series: &SweepSeries, sep: char, writer: &mut W) -> Result<()> {
    writeln!(writer, "# Title: {}", series.title)?;
    writeln!(writer, "# Swept: {} ({})", series.spec.field, series.spec.field.unit())?;
    for (key, value) in &series.metadata {
        writeln!(writer, "# {}: {}", key, value)?;
    }
    writeln!(writer, "{}{}tan_alpha", series.spec.field, sep)?;
    for p in &series.points {
        writeln!(writer, "{}{}{}", p.x, sep, p.y)?;
    }
    Ok(())
}

pub fn export_series(series: &SweepSeries, format: ExportFormat) -> Result<String> {
    let mut buf = Vec::new();
    write_series(series, format, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the series under `dir`, creating it if needed. Returns the file path.
pub fn save_series(series: &SweepSeries, format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let filename = format!(
        "trend_{}.{}",
        series.title.replace(char::is_whitespace, "_"),
        format.extension()
    );
    let path = dir.join(filename);
    let mut file = std::fs::File::create(&path)?;
    write_series(series, format, &mut file)?;
    Ok(path)
}
