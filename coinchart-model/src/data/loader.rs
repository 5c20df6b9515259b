/*!
Loading of market snapshot exports.

The input is a headed CSV file with at least the `snapped_at`, `price`,
`total_volume` and `market_cap` columns, in any order. Each row becomes an
[`Observation`]; the result is ordered by timestamp before it is returned so
that windowed metrics can be computed directly over it.
*/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use coinchart_utils::vars::observation::Observation;
use csv::ReaderBuilder;
use csv::StringRecord;
use csv::Trim;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::data::timestamp::parse_snapped_at;
use crate::error::ModelError;

pub const SNAPPED_AT: &str = "snapped_at";
pub const PRICE: &str = "price";
pub const TOTAL_VOLUME: &str = "total_volume";
pub const MARKET_CAP: &str = "market_cap";

/// Header line number; data rows start right after it.
const HEADER_LINE: u64 = 1;

/// Positions of the required columns within a record.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    snapped_at: usize,
    price: usize,
    total_volume: usize,
    market_cap: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ModelError> {
        let find = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(ModelError::MissingColumn { column })
        };

        Ok(ColumnIndex {
            snapped_at: find(SNAPPED_AT)?,
            price: find(PRICE)?,
            total_volume: find(TOTAL_VOLUME)?,
            market_cap: find(MARKET_CAP)?,
        })
    }

    fn parse_record(&self, record: &StringRecord, line: u64) -> Result<Observation, ModelError> {
        let raw_timestamp = field(record, self.snapped_at, SNAPPED_AT, line)?;
        let timestamp =
            parse_snapped_at(raw_timestamp).ok_or_else(|| ModelError::InvalidTimestamp {
                line,
                value: raw_timestamp.to_string(),
            })?;

        Ok(Observation {
            timestamp,
            price: number(record, self.price, PRICE, line)?,
            total_volume: number(record, self.total_volume, TOTAL_VOLUME, line)?,
            market_cap: number(record, self.market_cap, MARKET_CAP, line)?,
        })
    }
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<&'r str, ModelError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ModelError::MissingField { column, line }),
    }
}

fn number(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<f64, ModelError> {
    let value = field(record, index, column, line)?;
    value.parse::<f64>().map_err(|_| ModelError::Parse {
        column,
        line,
        value: value.to_string(),
    })
}

/// Loads observations from the CSV file at `path`.
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<Observation>, ModelError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), "reading observations");
    read_observations(file)
}

/// Reads observations from any CSV source.
///
/// Errors carry the 1-based line number of the offending row, counting the
/// header as line 1.
pub fn read_observations<R: Read>(reader: R) -> Result<Vec<Observation>, ModelError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut observations = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(HEADER_LINE + row as u64 + 1);
        observations.push(columns.parse_record(&record, line)?);
    }

    sort_by_timestamp(&mut observations);
    info!(rows = observations.len(), "loaded observations");

    Ok(observations)
}

/// Orders observations by timestamp, keeping the input order of ties.
fn sort_by_timestamp(observations: &mut [Observation]) {
    let out_of_order = observations
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp);

    if let Some(index) = out_of_order {
        warn!(
            row = index + 2,
            "timestamps are not in ascending order, sorting observations"
        );
        observations.sort_by_key(|o| o.timestamp);
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    const SAMPLE: &str = "\
snapped_at,price,market_cap,total_volume
2024-01-01 00:00:00 UTC,100.0,1000000.0,5000.0
2024-01-02 00:00:00 UTC,110.5,1100000.0,0
2024-01-03 00:00:00 UTC,90.25,0,7000.0
";

    #[test]
    fn test_read_observations() {
        let observations = read_observations(SAMPLE.as_bytes()).unwrap();
        assert_eq!(observations.len(), 3);
        assert_eq!(
            observations[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(observations[1].price, 110.5);
        assert_eq!(observations[1].total_volume, 0.0);
        assert_eq!(observations[2].market_cap, 0.0);
    }

    #[test]
    fn test_extra_columns_and_whitespace() {
        let input = "\
id, snapped_at , price, total_volume, market_cap, note
1, 2024-01-01, 1.5, 2.5, 3.5, first
";
        let observations = read_observations(input.as_bytes()).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].price, 1.5);
        assert_eq!(observations[0].total_volume, 2.5);
        assert_eq!(observations[0].market_cap, 3.5);
    }

    #[test]
    fn test_missing_column() {
        let input = "snapped_at,price,total_volume\n2024-01-01,1,2\n";
        match read_observations(input.as_bytes()) {
            Err(ModelError::MissingColumn { column }) => assert_eq!(column, MARKET_CAP),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_missing_columns() {
        assert!(matches!(
            read_observations("".as_bytes()),
            Err(ModelError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_header_only_yields_no_observations() {
        let input = "snapped_at,price,total_volume,market_cap\n";
        assert!(read_observations(input.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_field_reports_line() {
        let input = "\
snapped_at,price,total_volume,market_cap
2024-01-01,1,2,3
2024-01-02,,2,3
";
        match read_observations(input.as_bytes()) {
            Err(ModelError::MissingField { column, line }) => {
                assert_eq!(column, PRICE);
                assert_eq!(line, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_value() {
        let input = "snapped_at,price,total_volume,market_cap\n2024-01-01,1,lots,3\n";
        match read_observations(input.as_bytes()) {
            Err(ModelError::Parse {
                column,
                line,
                value,
            }) => {
                assert_eq!(column, TOTAL_VOLUME);
                assert_eq!(line, 2);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_timestamp() {
        let input = "snapped_at,price,total_volume,market_cap\nsoon,1,2,3\n";
        assert!(matches!(
            read_observations(input.as_bytes()),
            Err(ModelError::InvalidTimestamp { line: 2, .. })
        ));
    }

    #[test]
    fn test_ragged_row_is_csv_error() {
        let input = "snapped_at,price,total_volume,market_cap\n2024-01-01,1,2\n";
        assert!(matches!(
            read_observations(input.as_bytes()),
            Err(ModelError::Csv(_))
        ));
    }

    #[test]
    fn test_out_of_order_rows_are_sorted_stably() {
        let input = "\
snapped_at,price,total_volume,market_cap
2024-01-03,3,1,1
2024-01-01,1,1,1
2024-01-02,2,1,1
2024-01-01,4,1,1
";
        let observations = read_observations(input.as_bytes()).unwrap();
        let prices: Vec<f64> = observations.iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![1.0, 4.0, 2.0, 3.0]);
    }
}
