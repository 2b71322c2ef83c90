//! Price history cached on disk, one file per ticker.
//!
//! Layout under the data directory:
//! - `aapl.csv`: header row with at least `timestamp` and `adj_close_price`
//!   (the usual cache also carries open/high/low/close prices and volume)
//! - `aapl.parquet`: same columns, read when no CSV file exists
//! - `tickers.csv` (optional): `ticker,name` rows giving display names

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use super::{PricePoint, PriceSeries, PriceSource, Stock};
use crate::error::{CliError, Result};

const TIMESTAMP_COLUMN: &str = "timestamp";
const PRICE_COLUMN: &str = "adj_close_price";
const TICKER_NAMES_FILE: &str = "tickers.csv";

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    adj_close_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TickerRow {
    ticker: String,
    name: String,
}

/// Reads `<data_dir>/<ticker>.csv` or `<data_dir>/<ticker>.parquet`
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn company_name(&self, ticker: &str) -> Option<String> {
        let path = self.data_dir.join(TICKER_NAMES_FILE);
        let mut reader = csv::Reader::from_path(&path).ok()?;
        reader
            .deserialize::<TickerRow>()
            .filter_map(|row| row.ok())
            .find(|row| row.ticker.eq_ignore_ascii_case(ticker))
            .map(|row| row.name)
    }
}

impl PriceSource for FileSource {
    fn load(&self, ticker: &str) -> Result<Stock> {
        let stem = ticker.to_ascii_lowercase();
        let csv_path = self.data_dir.join(format!("{stem}.csv"));
        let parquet_path = self.data_dir.join(format!("{stem}.parquet"));

        let points = if csv_path.exists() {
            read_csv_file(&csv_path)?
        } else if parquet_path.exists() {
            read_parquet_file(&parquet_path)?
        } else {
            return Err(CliError::DataNotFound {
                ticker: ticker.to_string(),
                path: csv_path,
            });
        };

        debug!(ticker, rows = points.len(), dir = %self.data_dir.display(), "loaded price history");

        Ok(Stock {
            ticker: ticker.to_string(),
            name: self.company_name(ticker),
            series: PriceSeries::new(points),
        })
    }
}

fn read_csv_file(path: &Path) -> Result<Vec<PricePoint>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut points = Vec::new();

    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| CliError::InvalidData {
            path: path.to_path_buf(),
            message: format!("row {}: unrecognised timestamp '{}'", i + 1, row.timestamp),
        })?;
        let adj_close = row.adj_close_price.ok_or_else(|| CliError::InvalidData {
            path: path.to_path_buf(),
            message: format!("row {}: empty {PRICE_COLUMN}", i + 1),
        })?;
        points.push(PricePoint { timestamp, adj_close });
    }

    Ok(points)
}

/// Read the price columns of a parquet file via Arrow record batches
fn read_parquet_file(path: &Path) -> Result<Vec<PricePoint>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let invalid = |message: String| CliError::InvalidData {
        path: path.to_path_buf(),
        message,
    };

    let mut points = Vec::new();
    for batch in reader {
        let batch = batch?;

        let ts_col = batch
            .column_by_name(TIMESTAMP_COLUMN)
            .ok_or_else(|| invalid(format!("missing column '{TIMESTAMP_COLUMN}'")))?;
        let price_col = batch
            .column_by_name(PRICE_COLUMN)
            .ok_or_else(|| invalid(format!("missing column '{PRICE_COLUMN}'")))?;

        // Dates, timestamps and integer prices all normalise through a cast
        let ts_col = cast(ts_col, &DataType::Utf8)?;
        let price_col = cast(price_col, &DataType::Float64)?;
        let dates = ts_col
            .as_any()
            .downcast_ref::<StringArray>()
            .ok_or_else(|| invalid(format!("column '{TIMESTAMP_COLUMN}' is not text")))?;
        let prices = price_col
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| invalid(format!("column '{PRICE_COLUMN}' is not numeric")))?;

        for i in 0..batch.num_rows() {
            if dates.is_null(i) {
                return Err(invalid(format!("row {}: empty timestamp", points.len() + 1)));
            }
            let raw = dates.value(i);
            let timestamp = parse_timestamp(raw).ok_or_else(|| {
                invalid(format!("row {}: unrecognised timestamp '{raw}'", points.len() + 1))
            })?;
            if prices.is_null(i) {
                return Err(invalid(format!("row {}: empty {PRICE_COLUMN}", points.len() + 1)));
            }
            let adj_close = prices.value(i);
            points.push(PricePoint { timestamp, adj_close });
        }
    }

    Ok(points)
}

/// Accepts plain dates as well as full date-times, keeping only the date
pub fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;

    use arrow::array::ArrayRef;
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    fn write_parquet(path: &Path, dates: Vec<&str>, prices: Vec<Option<f64>>) {
        let batch = RecordBatch::try_from_iter(vec![
            (TIMESTAMP_COLUMN, Arc::new(StringArray::from(dates)) as ArrayRef),
            (PRICE_COLUMN, Arc::new(Float64Array::from(prices)) as ArrayRef),
        ])
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), batch.schema(), None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_timestamp("2024-03-05"), expected);
        assert_eq!(parse_timestamp("2024-03-05 16:00:00"), expected);
        assert_eq!(parse_timestamp("2024-03-05T16:00:00"), expected);
        assert_eq!(parse_timestamp("2024-03-05T16:00:00Z"), expected);
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_load_csv_with_extra_columns() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("msft.csv"),
            "timestamp,open_price,high_price,low_price,close_price,adj_close_price,volume\n\
             2024-01-03,1,1,1,1,101.5,10\n\
             2024-01-02,1,1,1,1,100.25,10\n",
        )
        .unwrap();
        fs::write(dir.path().join("tickers.csv"), "ticker,name\nMSFT,Microsoft Corp\n").unwrap();

        let stock = FileSource::new(dir.path()).load("MSFT").unwrap();
        assert_eq!(stock.ticker, "MSFT");
        assert_eq!(stock.name.as_deref(), Some("Microsoft Corp"));
        assert_eq!(stock.series.closes(), vec![100.25, 101.5]);
    }

    #[test]
    fn test_missing_file_is_data_not_found() {
        let dir = tempdir().unwrap();
        let err = FileSource::new(dir.path()).load("ZZZZ").unwrap_err();
        assert!(matches!(err, CliError::DataNotFound { ref ticker, .. } if ticker == "ZZZZ"));
    }

    #[test]
    fn test_bad_timestamp_is_invalid_data() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.csv"), "timestamp,adj_close_price\nnot-a-date,1.0\n").unwrap();
        let err = FileSource::new(dir.path()).load("BAD").unwrap_err();
        assert!(err.to_string().contains("not-a-date"));
    }

    #[test]
    fn test_empty_csv_price_is_invalid_data() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("gap.csv"),
            "timestamp,adj_close_price\n2024-01-02,1.0\n2024-01-03,\n",
        )
        .unwrap();
        let err = FileSource::new(dir.path()).load("GAP").unwrap_err();
        assert!(matches!(err, CliError::InvalidData { .. }));
        assert!(err.to_string().contains("row 2: empty adj_close_price"));
    }

    #[test]
    fn test_load_parquet() {
        let dir = tempdir().unwrap();
        write_parquet(
            &dir.path().join("nvda.parquet"),
            vec!["2024-01-03", "2024-01-02"],
            vec![Some(48.2), Some(47.5)],
        );

        let stock = FileSource::new(dir.path()).load("NVDA").unwrap();
        assert_eq!(stock.name, None);
        assert_eq!(stock.series.closes(), vec![47.5, 48.2]);
    }

    #[test]
    fn test_null_parquet_price_is_invalid_data() {
        let dir = tempdir().unwrap();
        write_parquet(
            &dir.path().join("gap.parquet"),
            vec!["2024-01-02", "2024-01-03"],
            vec![Some(1.0), None],
        );

        let err = FileSource::new(dir.path()).load("GAP").unwrap_err();
        assert!(matches!(err, CliError::InvalidData { .. }));
        assert!(err.to_string().contains("row 2: empty adj_close_price"));
    }
}
