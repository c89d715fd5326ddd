//! Declarative chart description handed to a rendering backend.
//!
//! Pairs each indicator series with its panel and draw style, next to the
//! visible bars, panel ratios and figure size. Built once per request.

use crate::domain::engine::IndicatorSet;
use crate::domain::error::ChartError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::layout::{IndicatorGroup, PanelLayout, FIGURE_WIDTH};
use crate::domain::ohlcv::OhlcvBar;
use std::fmt;
use std::str::FromStr;

/// Base renderer theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Default,
    Binance,
    Classic,
    Yahoo,
    Charles,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 5] = [
        ChartStyle::Default,
        ChartStyle::Binance,
        ChartStyle::Classic,
        ChartStyle::Yahoo,
        ChartStyle::Charles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartStyle::Default => "default",
            ChartStyle::Binance => "binance",
            ChartStyle::Classic => "classic",
            ChartStyle::Yahoo => "yahoo",
            ChartStyle::Charles => "charles",
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChartStyle {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ChartStyle::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| ChartError::UnknownStyle { name: s.to_string() })
    }
}

/// Candle colours layered over the base style.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketColors {
    pub up: &'static str,
    pub down: &'static str,
    pub edge: &'static str,
    pub wick_up: &'static str,
    pub wick_down: &'static str,
    /// Volume bars take the colour of their candle.
    pub volume_inherit: bool,
}

impl Default for MarketColors {
    fn default() -> Self {
        Self {
            up: "red",
            down: "blue",
            edge: "black",
            wick_up: "red",
            wick_down: "blue",
            volume_inherit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawStyle {
    pub kind: DrawKind,
    pub color: &'static str,
    pub width: Option<f64>,
    pub alpha: Option<f64>,
    pub ylabel: Option<&'static str>,
}

impl DrawStyle {
    pub fn line(color: &'static str) -> Self {
        Self {
            kind: DrawKind::Line,
            color,
            width: None,
            alpha: None,
            ylabel: None,
        }
    }

    pub fn bar(color: &'static str) -> Self {
        Self {
            kind: DrawKind::Bar,
            ..Self::line(color)
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn ylabel(mut self, label: &'static str) -> Self {
        self.ylabel = Some(label);
        self
    }
}

/// Colours for the main-panel moving averages, cycled by position.
pub const MAIN_PANEL_AVERAGE_COLORS: [&str; 3] = ["red", "green", "blue"];

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub group: IndicatorGroup,
    pub series: IndicatorSeries,
    pub panel: usize,
    pub style: DrawStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub code: String,
    pub bars: Vec<OhlcvBar>,
    /// Panel holding the volume bars, when volume is shown.
    pub volume_panel: Option<usize>,
    /// Moving averages drawn over the candles on panel 0.
    pub main_averages: Vec<(IndicatorSeries, DrawStyle)>,
    pub overlays: Vec<Overlay>,
    pub panel_ratios: Vec<u32>,
    pub figure_width: u32,
    pub figure_height: u32,
    pub style: ChartStyle,
    pub market_colors: MarketColors,
}

impl ChartSpec {
    pub fn panel_count(&self) -> usize {
        self.panel_ratios.len()
    }

    /// Overlays drawn on `panel`, in draw order.
    pub fn overlays_on(&self, panel: usize) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter().filter(move |o| o.panel == panel)
    }
}

/// Combines visible bars, windowed indicators and a planned layout.
///
/// `indicators` and `main_averages` must already be trimmed to `bars`.
pub fn assemble(
    code: &str,
    bars: &[OhlcvBar],
    indicators: &IndicatorSet,
    main_averages: Vec<IndicatorSeries>,
    layout: &PanelLayout,
    style: ChartStyle,
) -> Result<ChartSpec, ChartError> {
    if bars.is_empty() {
        return Err(ChartError::NoData {
            code: code.to_string(),
        });
    }

    let assignment = &layout.assignment;
    let mut overlays = Vec::new();

    if let Some(panel) = assignment.panel_of(IndicatorGroup::Bollinger) {
        let band_style = DrawStyle::line("silver").width(0.7).alpha(0.5);
        for series in [&indicators.bb_upper, &indicators.bb_lower] {
            overlays.push(Overlay {
                group: IndicatorGroup::Bollinger,
                series: series.clone(),
                panel,
                style: band_style.clone(),
            });
        }
    }

    if let Some(panel) = assignment.panel_of(IndicatorGroup::Rsi) {
        overlays.push(Overlay {
            group: IndicatorGroup::Rsi,
            series: indicators.rsi.clone(),
            panel,
            style: DrawStyle::line("orange").ylabel("RSI"),
        });
    }

    if let Some(panel) = assignment.panel_of(IndicatorGroup::Macd) {
        let macd_family = [
            (&indicators.macd, DrawStyle::line("fuchsia").ylabel("MACD")),
            (&indicators.signal, DrawStyle::line("blue")),
            (&indicators.hist, DrawStyle::bar("gray").alpha(0.3)),
        ];
        for (series, style) in macd_family {
            overlays.push(Overlay {
                group: IndicatorGroup::Macd,
                series: series.clone(),
                panel,
                style,
            });
        }
    }

    let main_averages = main_averages
        .into_iter()
        .zip(MAIN_PANEL_AVERAGE_COLORS.iter().cycle())
        .map(|(series, &color)| (series, DrawStyle::line(color)))
        .collect();

    Ok(ChartSpec {
        code: code.to_string(),
        bars: bars.to_vec(),
        volume_panel: assignment.panel_of(IndicatorGroup::Volume),
        main_averages,
        overlays,
        panel_ratios: layout.ratios.clone(),
        figure_width: FIGURE_WIDTH,
        figure_height: layout.figure_height,
        style,
        market_colors: MarketColors::default(),
    })
}
