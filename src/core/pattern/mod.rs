//! core::pattern
//!
//! Pattern files: the flat JSON schema and where pattern text lives.
//!
//! # Modules
//!
//! - [`schema`]: graph to/from index-referenced JSON records
//! - [`store`]: async `PatternStore` trait and the on-disk `FileStore`
//! - [`memory`]: in-memory store for deterministic testing

pub mod memory;
pub mod schema;
pub mod store;

pub use schema::{parse_pattern, to_json, to_json_pretty, to_records, PatternError, StitchRecord};
pub use store::{FileStore, PatternStore, StoreError};

use chrono::{DateTime, Utc};

/// File name for an export taken at `at`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use stitchwork::core::pattern::export_filename;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(
///     export_filename("exported pattern", at),
///     "exported pattern - 2024-03-09T14:05:07.json"
/// );
/// ```
pub fn export_filename(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{} - {}.json", prefix, at.format("%Y-%m-%dT%H:%M:%S"))
}
