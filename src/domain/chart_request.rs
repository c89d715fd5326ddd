//! Chart request pipeline: ticker + window + toggles in, ChartSpec out.

use crate::domain::chart_spec::{assemble, ChartSpec, ChartStyle};
use crate::domain::engine::{
    compute_window, main_panel_averages, EngineParams, DEFAULT_MAIN_PANEL_AVERAGES,
    LOOKBACK_PADDING_DAYS,
};
use crate::domain::error::ChartError;
use crate::domain::layout::{plan, PanelFlags};
use crate::domain::ohlcv::PriceSeries;
use crate::ports::data_port::PriceDataPort;
use chrono::{Duration, NaiveDate};

pub const MIN_NDAYS: usize = 10;
pub const MAX_NDAYS: usize = 365;
pub const DEFAULT_NDAYS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub code: String,
    pub ndays: usize,
    pub style: ChartStyle,
    pub flags: PanelFlags,
}

impl ChartRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ndays: DEFAULT_NDAYS,
            style: ChartStyle::Default,
            flags: PanelFlags::all(),
        }
    }
}

pub fn normalize_ticker(input: &str) -> Result<String, ChartError> {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        return Err(ChartError::InvalidTicker {
            input: input.to_string(),
        });
    }
    Ok(code)
}

pub fn validate_ndays(ndays: usize) -> Result<usize, ChartError> {
    if !(MIN_NDAYS..=MAX_NDAYS).contains(&ndays) {
        return Err(ChartError::InvalidWindow {
            ndays,
            min: MIN_NDAYS,
            max: MAX_NDAYS,
        });
    }
    Ok(ndays)
}

/// Calendar range to fetch: the visible window plus warm-up padding, ending today.
pub fn lookback_range(today: NaiveDate, ndays: usize) -> (NaiveDate, NaiveDate) {
    let days = (ndays + LOOKBACK_PADDING_DAYS) as i64;
    (today - Duration::days(days), today)
}

pub fn build_chart(
    data_port: &dyn PriceDataPort,
    request: &ChartRequest,
    today: NaiveDate,
) -> Result<ChartSpec, ChartError> {
    let code = normalize_ticker(&request.code)?;
    let ndays = validate_ndays(request.ndays)?;
    let (start, end) = lookback_range(today, ndays);

    tracing::debug!(%code, %start, %end, "fetching prices");
    let bars = data_port.fetch_ohlcv(&code, start, end)?;
    let series = PriceSeries::new(code, bars);
    if series.is_empty() {
        return Err(ChartError::NoData { code: series.code });
    }

    let params = EngineParams::default();
    if series.len() < ndays + params.min_window() {
        tracing::warn!(
            code = %series.code,
            rows = series.len(),
            ndays,
            "short history, leading indicator values will be undefined"
        );
    }

    let indicators = compute_window(&series.bars, ndays, &params);
    let visible = series.tail(ndays);
    let averages = main_panel_averages(visible, &DEFAULT_MAIN_PANEL_AVERAGES);
    let layout = plan(request.flags);

    assemble(&series.code, visible, &indicators, averages, &layout, request.style)
}
