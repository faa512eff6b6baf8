use crate::domain::model::{
    format_float, ConversionResult, Field, TravelTimeRow, Truncation, WeightRecord, WeightsTable,
};
use crate::utils::error::{Result, SeisError};

/// km/s
pub const DEFAULT_VELOCITY_KM_S: f64 = 2.800;

/// Appended after the travel time on every output row.
pub const PLACEHOLDER_FIELDS: &str = "0 0";

pub const DISTANCE_COLUMN: usize = 1;

pub fn travel_time(distance_km: f64, velocity_km_s: f64) -> f64 {
    distance_km / velocity_km_s
}

pub fn distance_km(record: &WeightRecord) -> Result<f64> {
    match record.fields.get(DISTANCE_COLUMN) {
        Some(Field::Text(raw)) => raw
            .parse::<f64>()
            .map_err(|_| SeisError::NonNumericDistance {
                line: record.line,
                value: raw.clone(),
            }),
        Some(field) => field.as_f64().ok_or_else(|| SeisError::NonNumericDistance {
            line: record.line,
            value: field.to_string(),
        }),
        None => Err(SeisError::ParseError {
            line: record.line,
            message: "missing distance column".to_string(),
        }),
    }
}

/// Returns the part of the row that precedes the travel time.
pub fn truncate_line(record: &WeightRecord, truncation: Truncation) -> Result<String> {
    match truncation {
        Truncation::None => Ok(record.joined()),
        Truncation::Chars(strip) => strip_chars(record, strip),
        Truncation::Fields(strip) => {
            if strip >= record.fields.len() {
                return Err(SeisError::ParseError {
                    line: record.line,
                    message: format!(
                        "cannot strip {} of {} fields",
                        strip,
                        record.fields.len()
                    ),
                });
            }
            let keep = record.fields.len() - strip;
            Ok(record.fields[..keep]
                .iter()
                .map(Field::to_string)
                .collect::<Vec<_>>()
                .join(" "))
        }
    }
}

fn strip_chars(record: &WeightRecord, strip: usize) -> Result<String> {
    let joined = record.joined();
    let length = joined.chars().count();

    if strip > length {
        return Err(SeisError::TruncationUnderflow {
            line: record.line,
            length,
            strip,
        });
    }

    let prefix: String = joined.chars().take(length - strip).collect();

    // 切點落在欄位中間時, 輸出仍照舊但要警告
    let on_boundary = prefix.is_empty()
        || joined[prefix.len()..].is_empty()
        || joined[prefix.len()..].starts_with(' ')
        || prefix.ends_with(' ');
    if !on_boundary {
        let partial = prefix.rsplit(' ').next().unwrap_or_default();
        tracing::warn!(
            "⚠️ Line {}: stripping {} characters cuts field '{}' in '{}'",
            record.line,
            strip,
            partial,
            joined
        );
    }

    Ok(prefix)
}

pub fn render_row(prefix: &str, travel_time_s: f64) -> String {
    let seconds = format_float(travel_time_s);
    // 空前綴不輸出前導空白 (舊版腳本會輸出 " 1.0 0 0")
    if prefix.is_empty() {
        format!("{} {}", seconds, PLACEHOLDER_FIELDS)
    } else {
        format!("{} {} {}", prefix, seconds, PLACEHOLDER_FIELDS)
    }
}

pub fn convert_record(
    record: &WeightRecord,
    velocity_km_s: f64,
    truncation: Truncation,
) -> Result<TravelTimeRow> {
    let distance = distance_km(record)?;
    let seconds = travel_time(distance, velocity_km_s);
    let prefix = truncate_line(record, truncation)?;

    Ok(TravelTimeRow {
        line: record.line,
        station: record.station(),
        distance_km: distance,
        travel_time_s: seconds,
        output: render_row(&prefix, seconds),
    })
}

/// Converts every record; fails on the first bad row.
pub fn convert_table(
    table: &WeightsTable,
    velocity_km_s: f64,
    truncation: Truncation,
) -> Result<ConversionResult> {
    if table.is_empty() {
        return Err(SeisError::processing("weights file contains no data rows"));
    }

    let rows = table
        .records
        .iter()
        .map(|record| convert_record(record, velocity_km_s, truncation))
        .collect::<Result<Vec<_>>>()?;

    let output = rows
        .iter()
        .map(|row| row.output.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(ConversionResult { rows, output })
}

/// Parses weights text and converts it in one step.
pub fn convert(text: &str, velocity_km_s: f64, truncation: Truncation) -> Result<ConversionResult> {
    let table = crate::core::weights::parse_weights(text)?;
    convert_table(&table, velocity_km_s, truncation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, fields: Vec<Field>) -> WeightRecord {
        WeightRecord { line, fields }
    }

    #[test]
    fn test_travel_time_is_distance_over_velocity() {
        assert!((travel_time(28.0, 2.8) - 10.0).abs() < 1e-12);
        assert!((travel_time(100.0, DEFAULT_VELOCITY_KM_S) - 35.714285714285715).abs() < 1e-9);
        assert_eq!(travel_time(0.0, 2.8), 0.0);
    }

    #[test]
    fn test_default_truncation_example_row() {
        let result = convert("STA1 28.0 extra", 2.8, Truncation::default()).unwrap();

        assert_eq!(result.rows.len(), 1);
        assert!((result.rows[0].travel_time_s - 10.0).abs() < 1e-12);
        // "STA1 28.0 extra" 去掉最後 8 個字元
        assert_eq!(result.output, "STA1 28 10.0 0 0");
    }

    #[test]
    fn test_field_truncation_keeps_whole_fields() {
        let result = convert("STA1 28.0 extra", 2.8, Truncation::Fields(1)).unwrap();
        assert_eq!(result.output, "STA1 28.0 10.0 0 0");

        let result = convert("STA1 28.0 extra", 2.8, Truncation::None).unwrap();
        assert_eq!(result.output, "STA1 28.0 extra 10.0 0 0");
    }

    #[test]
    fn test_short_row_underflows_character_cut() {
        let err = convert("A 7", 2.8, Truncation::Chars(8)).unwrap_err();
        match err {
            SeisError::TruncationUnderflow {
                line,
                length,
                strip,
            } => {
                assert_eq!(line, 1);
                assert_eq!(length, 3);
                assert_eq!(strip, 8);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cut_of_exact_length_drops_leading_separator() {
        let row = record(1, vec![Field::Text("STA1".into()), Field::Float(2.8)]);
        assert_eq!(truncate_line(&row, Truncation::Chars(8)).unwrap(), "");

        // 與舊版輸出 " 1.0 0 0" 不同, 不帶前導空白
        let converted = convert_record(&row, 2.8, Truncation::Chars(8)).unwrap();
        assert_eq!(converted.output, "1.0 0 0");
        assert!(!converted.output.starts_with(' '));
    }

    #[test]
    fn test_trailing_placeholder_columns_are_replaced() {
        let text = "IU.ANTO 280.0 1 1 1 0.0 0.0\nGE.ISP 56.0 1 1 1 0.0 0.0";
        let result = convert(text, 2.8, Truncation::Chars(8)).unwrap();

        assert_eq!(result.output, "IU.ANTO 280.0 1 1 1 100.0 0 0\nGE.ISP 56.0 1 1 1 20.0 0 0");
    }

    #[test]
    fn test_line_count_preserved_without_trailing_newline() {
        let text = "A1 2.8 0.0 0.0\nA2 5.6 0.0 0.0\nA3 8.4 0.0 0.0\n";
        let result = convert(text, 2.8, Truncation::Fields(2)).unwrap();

        assert_eq!(result.rows.len(), 3);
        assert_eq!(result.output.lines().count(), 3);
        assert!(!result.output.ends_with('\n'));
        assert_eq!(result.rows[2].station.as_deref(), Some("A3"));
    }

    #[test]
    fn test_non_numeric_distance_fails_loudly() {
        let err = convert("STA1 28.0\nSTA2 far", 2.8, Truncation::None).unwrap_err();
        match err {
            SeisError::NonNumericDistance { line, value } => {
                assert_eq!(line, 2);
                assert_eq!(value, "far");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_distance_column() {
        let err = convert("STA1\nSTA2", 2.8, Truncation::None).unwrap_err();
        assert!(matches!(err, SeisError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(convert("# nothing here\n", 2.8, Truncation::default()).is_err());
    }

    #[test]
    fn test_fields_truncation_cannot_remove_everything() {
        let row = record(4, vec![Field::Text("STA1".into()), Field::Float(2.8)]);
        assert!(truncate_line(&row, Truncation::Fields(2)).is_err());
        assert_eq!(truncate_line(&row, Truncation::Fields(1)).unwrap(), "STA1");
    }
}
