//! Chart data produced by one pipeline run.

use crate::config::ChartConfig;
use sc_core::{ChartRow, Property};
use serde::Serialize;

/// Static chart presentation: titles, labels and the fixed strength axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub y_range: (f64, f64),
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl ChartSpec {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            title: "Steel Strength Calculator".to_string(),
            x_label: "Temperature [°C]".to_string(),
            y_label: "Strength [MPa]".to_string(),
            legend_title: "Property".to_string(),
            y_range: (config.y_min, config.y_max),
        }
    }

    /// Plot window as `(min, max)` corners.
    ///
    /// The strength axis is always `y_range`, whatever the data. The
    /// temperature axis spans the plotted points.
    pub fn bounds(&self, data: &ChartData) -> ([f64; 2], [f64; 2]) {
        let (y_min, y_max) = self.y_range;
        let (x_min, x_max) = data
            .rows
            .iter()
            .map(|r| r.temperature_c)
            .fold(None, |acc: Option<(f64, f64)>, t| match acc {
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
                None => Some((t, t)),
            })
            .unwrap_or((0.0, 1.0));
        ([x_min, y_min], [x_max, y_max])
    }
}

/// One line of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub property: Property,
    /// `[temperature_c, value]`, ascending temperature
    pub points: Vec<[f64; 2]>,
}

/// Wide view of one prediction, for tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRow {
    pub temperature_c: f64,
    pub yield_mpa: f64,
    pub tensile_mpa: f64,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Long format, grouped by property
    pub rows: Vec<ChartRow>,
    /// Wide format, one row per temperature
    pub table: Vec<PredictionRow>,
}

impl ChartData {
    /// One series per property, each sorted by temperature.
    ///
    /// Points are never shared between series, so a line is only drawn
    /// between points of the same property.
    pub fn series(&self) -> Vec<ChartSeries> {
        Property::ALL
            .into_iter()
            .map(|property| {
                let mut points: Vec<[f64; 2]> = self
                    .rows
                    .iter()
                    .filter(|r| r.property == property)
                    .map(|r| [r.temperature_c, r.value])
                    .collect();
                points.sort_by(|a, b| a[0].total_cmp(&b[0]));
                ChartSeries { property, points }
            })
            .filter(|s| !s.points.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
