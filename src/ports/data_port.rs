//! Price data access port trait.

use crate::domain::error::ChartError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait PriceDataPort {
    /// Daily bars for `code` dated within `[start_date, end_date]`, oldest first.
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ChartError>;
}
