use crate::error::DbError;
use crate::source::DataSource;
use async_trait::async_trait;
use core_types::{DeliveryRecord, MatchAwardRecord};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Reads the ball-by-ball export and the match results export from disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    deliveries_path: PathBuf,
    awards_path: PathBuf,
}

/// Raw delivery row. Extra columns in the export are ignored.
#[derive(Debug, Deserialize)]
struct DeliveryRow {
    #[serde(rename = "Striker", alias = "striker")]
    striker: String,
    #[serde(rename = "Bowler", alias = "bowler")]
    bowler: String,
    runs_scored: String,
    #[serde(alias = "wicket_confirmed")]
    wicket_confirmation: String,
    ball_no: String,
}

#[derive(Debug, Deserialize)]
struct AwardRow {
    #[serde(rename = "Player_of_Match", alias = "player_of_match")]
    player_of_match: Option<String>,
}

impl CsvSource {
    pub fn new(deliveries_path: impl Into<PathBuf>, awards_path: impl Into<PathBuf>) -> Self {
        Self {
            deliveries_path: deliveries_path.into(),
            awards_path: awards_path.into(),
        }
    }
}

#[async_trait]
impl DataSource for CsvSource {
    async fn fetch_deliveries(&self) -> Result<Vec<DeliveryRecord>, DbError> {
        let path = self.deliveries_path.clone();
        tokio::task::spawn_blocking(move || read_deliveries(&path)).await?
    }

    async fn fetch_awards(&self) -> Result<Vec<MatchAwardRecord>, DbError> {
        let path = self.awards_path.clone();
        tokio::task::spawn_blocking(move || read_awards(&path)).await?
    }

    fn describe(&self) -> String {
        format!(
            "csv:{},{}",
            self.deliveries_path.display(),
            self.awards_path.display()
        )
    }
}

fn open(path: &Path) -> Result<csv::Reader<std::fs::File>, DbError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| DbError::ReadError {
            path: path.display().to_string(),
            source,
        })
}

fn schema_error(path: &Path, line: u64, message: impl Into<String>) -> DbError {
    DbError::SchemaError {
        path: path.display().to_string(),
        line,
        message: message.into(),
    }
}

/// Line of the `index`-th data row, counting the header as line 1.
fn line_of(err: &csv::Error, index: usize) -> u64 {
    err.position()
        .map(|p| p.line())
        .unwrap_or(index as u64 + 2)
}

pub(crate) fn read_deliveries(path: &Path) -> Result<Vec<DeliveryRecord>, DbError> {
    let mut reader = open(path)?;
    let mut deliveries = Vec::new();

    for (index, row) in reader.deserialize::<DeliveryRow>().enumerate() {
        let row = row.map_err(|e| schema_error(path, line_of(&e, index), e.to_string()))?;
        let line = index as u64 + 2;

        if row.striker.is_empty() || row.bowler.is_empty() {
            return Err(schema_error(path, line, "striker and bowler must be present"));
        }
        let runs_scored = parse_runs(&row.runs_scored)
            .ok_or_else(|| schema_error(path, line, format!("invalid runs_scored '{}'", row.runs_scored)))?;
        let wicket_confirmed = parse_dismissal(&row.wicket_confirmation).ok_or_else(|| {
            schema_error(
                path,
                line,
                format!("invalid wicket_confirmation '{}'", row.wicket_confirmation),
            )
        })?;
        let ball_sequence = Decimal::from_str(&row.ball_no)
            .map_err(|_| schema_error(path, line, format!("invalid ball_no '{}'", row.ball_no)))?;

        deliveries.push(DeliveryRecord::new(
            row.striker,
            row.bowler,
            runs_scored,
            wicket_confirmed,
            ball_sequence,
        ));
    }

    tracing::debug!(path = %path.display(), count = deliveries.len(), "Read delivery rows.");
    Ok(deliveries)
}

pub(crate) fn read_awards(path: &Path) -> Result<Vec<MatchAwardRecord>, DbError> {
    let mut reader = open(path)?;
    let mut awards = Vec::new();
    let mut skipped = 0usize;

    for (index, row) in reader.deserialize::<AwardRow>().enumerate() {
        let row = row.map_err(|e| schema_error(path, line_of(&e, index), e.to_string()))?;
        match row.player_of_match.filter(|p| !p.is_empty()) {
            Some(player) => awards.push(MatchAwardRecord::new(player)),
            // No result, no award.
            None => skipped += 1,
        }
    }

    tracing::debug!(path = %path.display(), count = awards.len(), skipped, "Read award rows.");
    Ok(awards)
}

/// Whole, non-negative run counts. Exports sometimes write them as `4.0`.
fn parse_runs(raw: &str) -> Option<u32> {
    if let Ok(runs) = raw.parse::<u32>() {
        return Some(runs);
    }
    let value = Decimal::from_str(raw).ok()?;
    if value.is_sign_negative() || !value.fract().is_zero() {
        return None;
    }
    value.to_u32()
}

/// Accepts the truthy dismissal markers found in delivery exports.
fn parse_dismissal(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "t" | "yes" | "y" => Some(true),
        "0" | "0.0" | "false" | "f" | "no" | "n" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_delivery_export_ignoring_extra_columns() {
        let file = write_csv(
            "ID,Striker,Bowler,runs_scored,wicket_confirmation,ball_no,Season\n\
             1,A,X,4,0,0.1,2024\n\
             1,A,X,0,1,0.2,2024\n",
        );
        let deliveries = read_deliveries(file.path()).unwrap();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0], DeliveryRecord::new("A", "X", 4, false, dec!(0.1)));
        assert!(deliveries[1].wicket_confirmed);
        assert_eq!(deliveries[1].ball_sequence, dec!(0.2));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let file = write_csv("Striker,Bowler,runs_scored,ball_no\nA,X,4,0.1\n");
        let err = read_deliveries(file.path()).unwrap_err();
        assert!(matches!(err, DbError::SchemaError { .. }), "got {err:?}");
    }

    #[test]
    fn test_negative_runs_are_rejected_with_line() {
        let file = write_csv(
            "Striker,Bowler,runs_scored,wicket_confirmation,ball_no\n\
             A,X,1,0,0.1\n\
             A,X,-1,0,0.2\n",
        );
        match read_deliveries(file.path()).unwrap_err() {
            DbError::SchemaError { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("runs_scored"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_dismissal_marker_is_rejected() {
        let file = write_csv(
            "Striker,Bowler,runs_scored,wicket_confirmation,ball_no\nA,X,1,maybe,0.1\n",
        );
        assert!(matches!(
            read_deliveries(file.path()).unwrap_err(),
            DbError::SchemaError { line: 2, .. }
        ));
    }

    #[test]
    fn test_award_rows_skip_blank_winners() {
        let file = write_csv(
            "Season,Player_of_Match,Venue\n2008,BB McCullum,Bengaluru\n2008,,Mohali\n2009,SR Tendulkar,Cape Town\n",
        );
        let awards = read_awards(file.path()).unwrap();
        assert_eq!(
            awards,
            vec![
                MatchAwardRecord::new("BB McCullum"),
                MatchAwardRecord::new("SR Tendulkar"),
            ]
        );
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = read_awards(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DbError::ReadError { .. }));
    }

    #[test]
    fn test_parse_runs_accepts_integral_decimals() {
        assert_eq!(parse_runs("6"), Some(6));
        assert_eq!(parse_runs("4.0"), Some(4));
        assert_eq!(parse_runs("4.5"), None);
        assert_eq!(parse_runs("-2"), None);
        assert_eq!(parse_runs("four"), None);
    }

    #[test]
    fn test_parse_dismissal_markers() {
        assert_eq!(parse_dismissal("1"), Some(true));
        assert_eq!(parse_dismissal("TRUE"), Some(true));
        assert_eq!(parse_dismissal("0"), Some(false));
        assert_eq!(parse_dismissal(""), Some(false));
        assert_eq!(parse_dismissal("2"), None);
    }

    #[tokio::test]
    async fn test_source_loads_both_files() {
        let deliveries = write_csv(
            "Striker,Bowler,runs_scored,wicket_confirmation,ball_no\nA,X,4,0,0.1\n",
        );
        let awards = write_csv("Player_of_Match\nA\n");
        let source = CsvSource::new(deliveries.path(), awards.path());

        assert_eq!(source.fetch_deliveries().await.unwrap().len(), 1);
        assert_eq!(source.fetch_awards().await.unwrap().len(), 1);
        assert!(source.describe().starts_with("csv:"));
    }
}
