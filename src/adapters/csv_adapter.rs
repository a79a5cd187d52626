//! CSV file data adapter.
//!
//! One file per symbol (`<SYMBOL>.csv`) with a `date,open,high,low,close,volume`
//! header. Rows outside the requested date range are skipped; output is
//! sorted ascending by date.

use crate::domain::error::QuantlabError;
use crate::domain::ohlcv::Bar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn parse_bars(content: &str) -> Result<Vec<Bar>, QuantlabError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| QuantlabError::DataLoad {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| QuantlabError::DataLoad {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                QuantlabError::DataLoad {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            let open = parse_column(&record, 1, "open")?;
            let high = parse_column(&record, 2, "high")?;
            let low = parse_column(&record, 3, "low")?;
            let close = parse_column(&record, 4, "close")?;
            let volume = parse_column(&record, 5, "volume")?;

            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn parse_column(
    record: &csv::StringRecord,
    index: usize,
    name: &'static str,
) -> Result<f64, QuantlabError> {
    record
        .get(index)
        .ok_or_else(|| QuantlabError::DataLoad {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| QuantlabError::DataLoad {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Bar>, QuantlabError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| QuantlabError::DataLoad {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let bars = Self::parse_bars(&content)?;
        Ok(bars
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, QuantlabError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuantlabError::DataLoad {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| QuantlabError::DataLoad {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, QuantlabError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| QuantlabError::DataLoad {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let bars = Self::parse_bars(&content)?;
        Ok(bars
            .first()
            .zip(bars.last())
            .map(|(first, last)| (first.date, last.date, bars.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, symbol: &str, body: &str) {
        let mut file = fs::File::create(dir.path().join(format!("{}.csv", symbol))).unwrap();
        writeln!(file, "date,open,high,low,close,volume").unwrap();
        write!(file, "{}", body).unwrap();
    }

    #[test]
    fn fetch_parses_and_sorts() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "ACME",
            "2024-01-03,102,103,101,102.5,1200\n\
             2024-01-01,100,101,99,100.5,1000\n\
             2024-01-02,101,102,100,101.5,1100\n",
        );

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let bars = adapter
            .fetch_ohlcv(
                "ACME",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!((bars[0].close - 100.5).abs() < f64::EPSILON);
        assert!((bars[2].volume - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fetch_filters_date_range() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "ACME",
            "2024-01-01,100,101,99,100.5,1000\n\
             2024-01-02,101,102,100,101.5,1100\n\
             2024-01-03,102,103,101,102.5,1200\n",
        );

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let bars = adapter
            .fetch_ohlcv(
                "ACME",
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            )
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn missing_file_is_data_load_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_ohlcv(
                "NOPE",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .unwrap_err();
        assert!(matches!(err, QuantlabError::DataLoad { .. }));
    }

    #[test]
    fn malformed_value_is_data_load_error() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "ACME", "2024-01-01,100,101,99,abc,1000\n");

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let err = adapter
            .fetch_ohlcv(
                "ACME",
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .unwrap_err();
        assert!(err.to_string().contains("close"));
    }

    #[test]
    fn list_symbols_finds_csv_files() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "BBB", "2024-01-01,1,1,1,1,1\n");
        write_csv(&dir, "AAA", "2024-01-01,1,1,1,1,1\n");

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        assert_eq!(adapter.list_symbols().unwrap(), vec!["AAA", "BBB"]);
    }

    #[test]
    fn data_range_reports_bounds() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "ACME",
            "2024-01-01,1,1,1,1,1\n2024-02-01,1,1,1,1,1\n",
        );

        let adapter = CsvAdapter::new(dir.path().to_path_buf());
        let (min, max, count) = adapter.get_data_range("ACME").unwrap().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(count, 2);

        assert!(adapter.get_data_range("NOPE").unwrap().is_none());
    }
}
