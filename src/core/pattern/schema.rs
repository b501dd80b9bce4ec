//! core::pattern::schema
//!
//! Pattern file schema.
//!
//! # Format
//!
//! A pattern file is a JSON array with one record per stitch, in collection
//! order. References are indices into that same array:
//!
//! ```json
//! [
//!   { "x": 400, "y": 300, "parent": null, "base": null, "type": 6 },
//!   { "x": 450, "y": 300, "parent": 0, "base": null, "type": 0 }
//! ]
//! ```
//!
//! `type` is the canonical ordinal of [`StitchType`]: Chain=0,
//! SingleCrochet=1, HalfDoubleCrochet=2, DoubleCrochet=3, TrebleCrochet=4,
//! DoubleTrebleCrochet=5, Slip=6.
//!
//! # Import Rules
//!
//! Import is all-or-nothing. Every record must carry `x` and `y` (numbers),
//! `parent` and `base` (null or an in-range index) and `type` (a known
//! ordinal). The first failing field aborts the whole import and is named in
//! the error. Unknown extra fields are ignored.
//!
//! # Example
//!
//! ```
//! use stitchwork::core::graph::StitchGraph;
//! use stitchwork::core::pattern::schema::{parse_pattern, to_json};
//! use stitchwork::core::types::{Point, StitchType};
//!
//! let mut graph = StitchGraph::new(Point::new(400.0, 300.0));
//! graph.add_stitch(Point::new(450.0, 300.0), StitchType::Chain, None);
//!
//! let json = to_json(&graph).unwrap();
//! let parsed = parse_pattern(&json).unwrap();
//! assert_eq!(parsed.len(), 2);
//!
//! let err = parse_pattern(r#"[{"x": 1, "parent": null, "base": null, "type": 6}]"#).unwrap_err();
//! assert_eq!(err.to_string(), "stitch 0 has invalid y: missing");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::graph::{IndexedStitch, StitchGraph};
use crate::core::types::{Point, StitchType};

/// Errors from pattern import and export.
#[derive(Debug, Error, PartialEq)]
pub enum PatternError {
    #[error("failed to parse pattern: {0}")]
    Json(String),

    #[error("pattern is not an array")]
    NotArray,

    #[error("pattern contains no stitches")]
    Empty,

    #[error("stitch {index} is not an object")]
    NotAnObject { index: usize },

    #[error("stitch {index} has invalid {field}: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("failed to serialize pattern: {0}")]
    Serialize(String),
}

impl PatternError {
    /// Name of the offending field, for field-level failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PatternError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// One stitch as stored in a pattern file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StitchRecord {
    pub x: f64,
    pub y: f64,
    pub parent: Option<usize>,
    pub base: Option<usize>,
    #[serde(rename = "type")]
    pub kind: StitchType,
}

/// Flatten a graph into index-referenced records.
pub fn to_records(graph: &StitchGraph) -> Vec<StitchRecord> {
    graph
        .iter()
        .map(|stitch| {
            let position = stitch.position();
            StitchRecord {
                x: position.x,
                y: position.y,
                parent: stitch.parent().and_then(|p| graph.index_of(p)),
                base: stitch.base().and_then(|b| graph.index_of(b)),
                kind: stitch.kind(),
            }
        })
        .collect()
}

/// Serialize a graph to pattern JSON.
pub fn to_json(graph: &StitchGraph) -> Result<String, PatternError> {
    serde_json::to_string(&to_records(graph)).map_err(|e| PatternError::Serialize(e.to_string()))
}

/// Serialize a graph to indented pattern JSON.
pub fn to_json_pretty(graph: &StitchGraph) -> Result<String, PatternError> {
    serde_json::to_string_pretty(&to_records(graph))
        .map_err(|e| PatternError::Serialize(e.to_string()))
}

/// Parse pattern JSON into a new graph.
///
/// # Errors
///
/// Returns an error if:
/// - The JSON is malformed
/// - The top level is not a non-empty array
/// - Any record is missing a field or has an invalid value
pub fn parse_pattern(json: &str) -> Result<StitchGraph, PatternError> {
    let value: Value = serde_json::from_str(json).map_err(|e| PatternError::Json(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(PatternError::NotArray);
    };
    if items.is_empty() {
        return Err(PatternError::Empty);
    }

    let len = items.len();
    let nodes = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item, len))
        .collect::<Result<Vec<_>, _>>()?;

    // Indices were range-checked above, so only an empty list can fail here.
    StitchGraph::from_indexed(&nodes).ok_or(PatternError::Empty)
}

fn parse_record(index: usize, item: &Value, len: usize) -> Result<IndexedStitch, PatternError> {
    let record = item
        .as_object()
        .ok_or(PatternError::NotAnObject { index })?;
    let fields = RecordFields { index, record, len };

    let x = fields.number("x")?;
    let y = fields.number("y")?;
    let parent = fields.reference("parent")?;
    let base = fields.reference("base")?;
    let kind = fields.stitch_type("type")?;

    Ok(IndexedStitch {
        position: Point::new(x, y),
        parent,
        base,
        kind,
    })
}

struct RecordFields<'a> {
    index: usize,
    record: &'a Map<String, Value>,
    len: usize,
}

impl RecordFields<'_> {
    fn invalid(&self, field: &'static str, reason: impl Into<String>) -> PatternError {
        PatternError::InvalidField {
            index: self.index,
            field,
            reason: reason.into(),
        }
    }

    fn get(&self, field: &'static str) -> Result<&Value, PatternError> {
        self.record
            .get(field)
            .ok_or_else(|| self.invalid(field, "missing"))
    }

    fn number(&self, field: &'static str) -> Result<f64, PatternError> {
        self.get(field)?
            .as_f64()
            .ok_or_else(|| self.invalid(field, "expected a number"))
    }

    fn reference(&self, field: &'static str) -> Result<Option<usize>, PatternError> {
        match self.get(field)? {
            Value::Null => Ok(None),
            value => {
                let index = value
                    .as_u64()
                    .ok_or_else(|| self.invalid(field, "expected a stitch index or null"))?;
                match usize::try_from(index) {
                    Ok(i) if i < self.len => Ok(Some(i)),
                    _ => Err(self.invalid(
                        field,
                        format!(
                            "index {index} is out of range for {} stitches",
                            self.len
                        ),
                    )),
                }
            }
        }
    }

    fn stitch_type(&self, field: &'static str) -> Result<StitchType, PatternError> {
        let ordinal = self
            .get(field)?
            .as_u64()
            .ok_or_else(|| self.invalid(field, "expected a stitch type ordinal"))?;
        StitchType::from_ordinal(ordinal).map_err(|e| self.invalid(field, e.to_string()))
    }
}
