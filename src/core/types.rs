//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Point`] - 2D coordinate in canvas pixels
//! - [`StitchId`] - Stable handle to a stitch inside a [`StitchGraph`](super::graph::StitchGraph)
//! - [`StitchType`] - Closed set of supported crochet stitches
//!
//! # Validation
//!
//! These types enforce validity at construction time. A stitch type can only
//! be built from a known ordinal or abbreviation, so an out-of-range value
//! never reaches the anchor or drawing code.
//!
//! # Examples
//!
//! ```
//! use stitchwork::core::types::{Point, StitchType};
//!
//! let p: Point = "450,300".parse().unwrap();
//! assert_eq!(p, Point::new(450.0, 300.0));
//!
//! assert_eq!(StitchType::from_ordinal(6).unwrap(), StitchType::Slip);
//! assert!(StitchType::from_ordinal(7).is_err());
//! assert_eq!("dc".parse::<StitchType>().unwrap(), StitchType::DoubleCrochet);
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid stitch type ordinal {0}, expected 0..={max}", max = StitchType::ALL.len() - 1)]
    InvalidOrdinal(u64),

    #[error("unknown stitch type '{0}'")]
    UnknownStitchType(String),

    #[error("invalid point '{0}', expected X,Y")]
    InvalidPoint(String),
}

/// A 2D coordinate in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = TypeError;

    /// Parse `X,Y` (whitespace around either number is allowed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f64 = x.trim().parse().map_err(|_| invalid())?;
        let y: f64 = y.trim().parse().map_err(|_| invalid())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Point::new(x, y))
    }
}

/// Stable handle to a stitch.
///
/// Ids are handed out in increasing order by a single graph and are never
/// reused, so a stale id simply fails to resolve instead of aliasing a
/// different stitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StitchId(u32);

impl StitchId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a stitch.
///
/// The serialized form is the canonical ordinal (see [`StitchType::ordinal`]),
/// which is the wire contract of the pattern file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum StitchType {
    Chain,
    SingleCrochet,
    HalfDoubleCrochet,
    DoubleCrochet,
    TrebleCrochet,
    DoubleTrebleCrochet,
    Slip,
}

impl StitchType {
    /// All stitch types in canonical ordinal order.
    pub const ALL: [StitchType; 7] = [
        StitchType::Chain,
        StitchType::SingleCrochet,
        StitchType::HalfDoubleCrochet,
        StitchType::DoubleCrochet,
        StitchType::TrebleCrochet,
        StitchType::DoubleTrebleCrochet,
        StitchType::Slip,
    ];

    /// Canonical file-format ordinal.
    pub fn ordinal(self) -> u8 {
        match self {
            StitchType::Chain => 0,
            StitchType::SingleCrochet => 1,
            StitchType::HalfDoubleCrochet => 2,
            StitchType::DoubleCrochet => 3,
            StitchType::TrebleCrochet => 4,
            StitchType::DoubleTrebleCrochet => 5,
            StitchType::Slip => 6,
        }
    }

    /// Resolve a canonical ordinal.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOrdinal` for anything outside `0..=6`.
    pub fn from_ordinal(ordinal: u64) -> Result<Self, TypeError> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(TypeError::InvalidOrdinal(ordinal))
    }

    /// Standard US crochet abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            StitchType::Chain => "ch",
            StitchType::SingleCrochet => "sc",
            StitchType::HalfDoubleCrochet => "hdc",
            StitchType::DoubleCrochet => "dc",
            StitchType::TrebleCrochet => "tr",
            StitchType::DoubleTrebleCrochet => "dtr",
            StitchType::Slip => "sl",
        }
    }

    /// Human readable name, as shown in the editor status text.
    pub fn label(self) -> &'static str {
        match self {
            StitchType::Chain => "Chain",
            StitchType::SingleCrochet => "Single Crochet",
            StitchType::HalfDoubleCrochet => "Half Double Crochet",
            StitchType::DoubleCrochet => "Double Crochet",
            StitchType::TrebleCrochet => "Treble Crochet",
            StitchType::DoubleTrebleCrochet => "Double Treble Crochet",
            StitchType::Slip => "Slip",
        }
    }

    /// Whether this is a post stitch (worked into a base stitch).
    pub fn is_post_stitch(self) -> bool {
        match self {
            StitchType::Chain | StitchType::Slip => false,
            StitchType::SingleCrochet
            | StitchType::HalfDoubleCrochet
            | StitchType::DoubleCrochet
            | StitchType::TrebleCrochet
            | StitchType::DoubleTrebleCrochet => true,
        }
    }

    /// Number of hash marks drawn across the stitch spine.
    ///
    /// Only the long stitches carry hashes; chain, slip and single crochet
    /// are drawn with their own shapes.
    pub fn hash_count(self) -> Option<u8> {
        match self {
            StitchType::HalfDoubleCrochet => Some(0),
            StitchType::DoubleCrochet => Some(1),
            StitchType::TrebleCrochet => Some(2),
            StitchType::DoubleTrebleCrochet => Some(3),
            StitchType::Chain | StitchType::SingleCrochet | StitchType::Slip => None,
        }
    }
}

impl fmt::Display for StitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StitchType {
    type Err = TypeError;

    /// Accepts abbreviations (`sc`), labels (`single crochet`) or
    /// kebab/snake-case names (`single-crochet`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|t| {
                t.abbreviation() == normalized || t.label().to_ascii_lowercase() == normalized
            })
            .ok_or_else(|| TypeError::UnknownStitchType(s.to_string()))
    }
}

impl TryFrom<u8> for StitchType {
    type Error = TypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(u64::from(value))
    }
}

impl From<StitchType> for u8 {
    fn from(value: StitchType) -> Self {
        value.ordinal()
    }
}
