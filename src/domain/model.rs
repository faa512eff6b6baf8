use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// 一個欄位的值, 依整欄推斷型別
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Field {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Int(v) => Some(*v as f64),
            Field::Float(v) => Some(*v),
            Field::Text(_) => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(v) => write!(f, "{}", v),
            Field::Float(v) => f.write_str(&format_float(*v)),
            Field::Text(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip rendering that always keeps a fractional part for
/// finite values (`10.0`, `3.5714285714285716`). Very small and very large
/// values use a signed, at least two-digit exponent (`3.571428571428572e-05`,
/// `1e+16`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rendered = format!("{:?}", value);
    let Some((mantissa, exponent)) = rendered.split_once('e') else {
        return rendered;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightRecord {
    /// 1-based line number in the source file
    pub line: usize,
    pub fields: Vec<Field>,
}

impl WeightRecord {
    pub fn station(&self) -> Option<String> {
        self.fields.first().map(|f| f.to_string())
    }

    /// Fields rendered and joined by single spaces.
    pub fn joined(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightsTable {
    pub records: Vec<WeightRecord>,
}

impl WeightsTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// How much of the joined row is dropped before the travel time is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    Chars(usize),
    Fields(usize),
    None,
}

impl Default for Truncation {
    fn default() -> Self {
        Truncation::Chars(8)
    }
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truncation::Chars(n) => write!(f, "strip last {} characters", n),
            Truncation::Fields(n) => write!(f, "strip last {} fields", n),
            Truncation::None => f.write_str("keep whole row"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TravelTimeRow {
    pub line: usize,
    pub station: Option<String>,
    pub distance_km: f64,
    pub travel_time_s: f64,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub rows: Vec<TravelTimeRow>,
    /// Lines joined by `\n` without a trailing newline
    pub output: String,
}

impl ConversionResult {
    pub fn travel_times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.travel_time_s).collect()
    }
}

/// Best-effort view of the well-known keys in an event YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventSummary {
    pub event_tag: Option<String>,
    pub origin_time: Option<String>,
    pub event_latitude: Option<f64>,
    pub event_longitude: Option<f64>,
    pub event_depth_km: Option<f64>,
    pub event_magnitude: Option<f64>,
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub program: String,
    pub config_path: PathBuf,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub status: String,
}
