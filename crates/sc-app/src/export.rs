//! Writing pipeline results as CSV, JSON or a plain-text table.

use crate::chart::ChartData;
use crate::error::AppResult;
use sc_core::ChartRow;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn write<W: Write>(self, writer: &mut W, data: &ChartData) -> AppResult<()> {
        match self {
            Self::Table => write_table(writer, data),
            Self::Csv => write_csv(writer, &data.rows),
            Self::Json => write_json(writer, data),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "txt" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Long format: `temperature_c,property,value`, one line per chart row.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[ChartRow]) -> AppResult<()> {
    writeln!(writer, "temperature_c,property,value")?;
    for row in rows {
        writeln!(
            writer,
            "{},{},{}",
            row.temperature_c,
            row.property.label(),
            row.value
        )?;
    }
    Ok(())
}

pub fn write_json<W: Write>(writer: &mut W, data: &ChartData) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *writer, data)?;
    writeln!(writer)?;
    Ok(())
}

/// Wide format, one line per temperature.
pub fn write_table<W: Write>(writer: &mut W, data: &ChartData) -> AppResult<()> {
    writeln!(
        writer,
        "{:>8}  {:>14}  {:>14}",
        "T [°C]", "Yield [MPa]", "Tensile [MPa]"
    )?;
    for row in &data.table {
        writeln!(
            writer,
            "{:>8}  {:>14.1}  {:>14.1}",
            row.temperature_c, row.yield_mpa, row.tensile_mpa
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::PredictionRow;
    use sc_core::{PredictionPair, melt};

    fn data() -> ChartData {
        let temps = [20.0, 40.0];
        let preds = [
            PredictionPair::new(300.0, 450.0),
            PredictionPair::new(290.5, 440.25),
        ];
        ChartData {
            rows: melt(&temps, &preds).unwrap(),
            table: temps
                .iter()
                .zip(&preds)
                .map(|(&t, p)| PredictionRow {
                    temperature_c: t,
                    yield_mpa: p.yield_mpa,
                    tensile_mpa: p.tensile_mpa,
                })
                .collect(),
        }
    }

    #[test]
    fn csv_is_long_format() {
        let mut out = Vec::new();
        write_csv(&mut out, &data().rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "temperature_c,property,value");
        assert_eq!(lines[1], "20,Yield Strength (MPa),300");
        assert_eq!(lines[4], "40,Tensile Strength (MPa),440.25");
    }

    #[test]
    fn json_contains_rows_and_table() {
        let mut out = Vec::new();
        write_json(&mut out, &data()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
        assert_eq!(value["rows"][0]["property"], "Yield Strength (MPa)");
        assert_eq!(value["table"][1]["tensile_mpa"], 440.25);
    }

    #[test]
    fn table_has_one_line_per_temperature() {
        let mut out = Vec::new();
        ExportFormat::Table.write(&mut out, &data()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("290.5"));
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
