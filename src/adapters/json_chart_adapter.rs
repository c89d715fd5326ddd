//! JSON chart document writer.
//!
//! Flattens a [`ChartSpec`] into the document a plotting backend reads:
//! dates and OHLCV columns for the candles, then one entry per drawn series
//! with its panel and style. Undefined points become `null`; saturated
//! oscillator points are written at the indicator's ceiling.

use crate::domain::chart_spec::{ChartSpec, DrawKind, DrawStyle};
use crate::domain::error::ChartError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::layout::PRICE_PANEL;
use crate::ports::chart_port::ChartPort;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ChartDocument<'a> {
    pub code: &'a str,
    pub style: &'static str,
    pub figure: Figure<'a>,
    pub candles: Candles,
    pub series: Vec<SeriesEntry>,
}

#[derive(Debug, Serialize)]
pub struct Figure<'a> {
    pub width: u32,
    pub height: u32,
    pub panel_ratios: &'a [u32],
    pub volume_panel: Option<usize>,
    pub market_colors: MarketColorsDoc,
}

#[derive(Debug, Serialize)]
pub struct MarketColorsDoc {
    pub up: &'static str,
    pub down: &'static str,
    pub edge: &'static str,
    pub wick_up: &'static str,
    pub wick_down: &'static str,
    pub volume: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Candles {
    pub dates: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<i64>,
    /// Close at or above open; picks the up/down market colors.
    pub up: Vec<bool>,
}

#[derive(Debug, Serialize)]
pub struct SeriesEntry {
    pub name: String,
    pub panel: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ylabel: Option<&'static str>,
    pub values: Vec<Option<f64>>,
}

impl SeriesEntry {
    fn new(series: &IndicatorSeries, panel: usize, style: &DrawStyle) -> Self {
        Self {
            name: series.indicator_type.to_string(),
            panel,
            kind: match style.kind {
                DrawKind::Line => "line",
                DrawKind::Bar => "bar",
            },
            color: style.color,
            width: style.width,
            alpha: style.alpha,
            ylabel: style.ylabel,
            values: series.plot_values(),
        }
    }
}

impl<'a> ChartDocument<'a> {
    pub fn from_spec(spec: &'a ChartSpec) -> Self {
        let colors = &spec.market_colors;
        let candles = Candles {
            dates: spec.bars.iter().map(|b| b.date.to_string()).collect(),
            open: spec.bars.iter().map(|b| b.open).collect(),
            high: spec.bars.iter().map(|b| b.high).collect(),
            low: spec.bars.iter().map(|b| b.low).collect(),
            close: spec.bars.iter().map(|b| b.close).collect(),
            volume: spec.bars.iter().map(|b| b.volume).collect(),
            up: spec.bars.iter().map(|b| b.is_up()).collect(),
        };

        let series = spec
            .main_averages
            .iter()
            .map(|(series, style)| SeriesEntry::new(series, PRICE_PANEL, style))
            .chain(
                spec.overlays
                    .iter()
                    .map(|o| SeriesEntry::new(&o.series, o.panel, &o.style)),
            )
            .collect();

        Self {
            code: &spec.code,
            style: spec.style.name(),
            figure: Figure {
                width: spec.figure_width,
                height: spec.figure_height,
                panel_ratios: &spec.panel_ratios,
                volume_panel: spec.volume_panel,
                market_colors: MarketColorsDoc {
                    up: colors.up,
                    down: colors.down,
                    edge: colors.edge,
                    wick_up: colors.wick_up,
                    wick_down: colors.wick_down,
                    volume: if colors.volume_inherit {
                        "inherit"
                    } else {
                        colors.edge
                    },
                },
            },
            candles,
            series,
        }
    }
}

pub fn to_json(spec: &ChartSpec) -> Result<String, ChartError> {
    Ok(serde_json::to_string_pretty(&ChartDocument::from_spec(spec))?)
}

pub struct JsonChartAdapter;

impl ChartPort for JsonChartAdapter {
    fn write(&self, spec: &ChartSpec, output_path: &str) -> Result<(), ChartError> {
        let json = to_json(spec)?;
        if let Some(parent) = Path::new(output_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = json.len();
        fs::write(output_path, json)?;
        tracing::info!(path = output_path, bytes, "chart written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart_spec::{assemble, ChartStyle};
    use crate::domain::engine::{compute_window, main_panel_averages, EngineParams};
    use crate::domain::layout::{plan, PanelFlags};
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn rising_spec(flags: PanelFlags) -> ChartSpec {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars: Vec<OhlcvBar> = (0..60)
            .map(|i| OhlcvBar {
                date: start + chrono::Duration::days(i),
                open: 99.0 + i as f64,
                high: 101.0 + i as f64,
                low: 98.0 + i as f64,
                close: 100.0 + i as f64,
                volume: 1000 + i,
            })
            .collect();
        let set = compute_window(&bars, 20, &EngineParams::default());
        let visible = &bars[40..];
        let averages = main_panel_averages(visible, &[5, 10, 30]);
        assemble("TEST", visible, &set, averages, &plan(flags), ChartStyle::Charles).unwrap()
    }

    #[test]
    fn document_lists_candles_and_series() {
        let spec = rising_spec(PanelFlags::all());
        let value: serde_json::Value = serde_json::from_str(&to_json(&spec).unwrap()).unwrap();

        assert_eq!(value["code"], "TEST");
        assert_eq!(value["style"], "charles");
        assert_eq!(value["candles"]["dates"][0], "2024-02-10");
        assert_eq!(value["candles"]["close"].as_array().unwrap().len(), 20);
        assert_eq!(value["candles"]["up"][0], true);
        assert_eq!(value["figure"]["panel_ratios"], serde_json::json!([6, 2, 2, 2]));
        assert_eq!(value["figure"]["height"], 16);
        assert_eq!(value["figure"]["volume_panel"], 1);
        assert_eq!(value["figure"]["market_colors"]["volume"], "inherit");

        // 3 averages + 2 bands + RSI + MACD family
        assert_eq!(value["series"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn gaps_are_null_and_saturation_is_ceiling() {
        let spec = rising_spec(PanelFlags::all());
        let doc = ChartDocument::from_spec(&spec);

        let sma30 = doc.series.iter().find(|s| s.name == "SMA(30)").unwrap();
        assert_eq!(sma30.panel, 0);
        assert!(sma30.values.iter().all(|v| v.is_none()));

        let rsi = doc.series.iter().find(|s| s.name == "RSI(14)").unwrap();
        assert_eq!(rsi.panel, 2);
        assert!(rsi.values.iter().all(|v| *v == Some(100.0)));

        let hist = doc.series.iter().find(|s| s.name.starts_with("HIST")).unwrap();
        assert_eq!(hist.kind, "bar");
        assert_eq!(hist.alpha, Some(0.3));
    }

    #[test]
    fn optional_style_fields_are_omitted() {
        let spec = rising_spec(PanelFlags {
            macd: true,
            ..PanelFlags::default()
        });
        let value: serde_json::Value = serde_json::from_str(&to_json(&spec).unwrap()).unwrap();

        let signal = value["series"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "SIGNAL(12,26,9)")
            .unwrap();
        assert_eq!(signal["panel"], 1);
        assert!(signal.get("alpha").is_none());
        assert!(signal.get("ylabel").is_none());
        assert!(value["figure"]["volume_panel"].is_null());
    }

    #[test]
    fn adapter_writes_file_and_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("chart.json");
        let spec = rising_spec(PanelFlags::default());

        JsonChartAdapter
            .write(&spec, path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"panel_ratios\""));
    }
}
