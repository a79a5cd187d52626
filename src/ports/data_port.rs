//! Data access port trait.
//!
//! Market-data retrieval lives behind this trait; the engine only ever sees
//! a materialized, date-ordered bar series.

use crate::domain::error::QuantlabError;
use crate::domain::ohlcv::Bar;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, QuantlabError>;

    fn list_symbols(&self) -> Result<Vec<String>, QuantlabError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantlabError>;
}
