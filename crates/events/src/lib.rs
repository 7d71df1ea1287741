//! Match grouping for matchbook
//!
//! Reads the per-player-per-match records of a normalized document and
//! groups them by match identifier, keeping matches in the order they first
//! appear.
//!
//! ```
//! use matchbook_events::{group_records, EventId, GroupingOptions};
//! use matchbook_sheet::{CellValue, Record};
//!
//! let rows = [("m1", "Alice", 1500), ("m1", "Bob", 1480), ("m2", "Carl", 1600)];
//! let records: Vec<Record> = rows
//!     .iter()
//!     .map(|(id, player, elo)| {
//!         [
//!             ("match_id", CellValue::from(*id)),
//!             ("player_name", CellValue::from(*player)),
//!             ("player_elo_after", CellValue::from(*elo)),
//!         ]
//!         .into_iter()
//!         .collect()
//!     })
//!     .collect();
//!
//! let index = group_records(&records, &GroupingOptions::default()).unwrap();
//! assert_eq!(index.order().collect::<Vec<_>>(), vec![&EventId::from("m1"), &EventId::from("m2")]);
//! assert_eq!(index.participants(&EventId::from("m1")).unwrap().len(), 2);
//! ```

mod error;
mod id;
mod index;
mod rating;
mod report;

pub use error::{EventError, Result};
pub use id::EventId;
pub use index::{group_document, group_records, EventIndex, GroupingOptions, Participant};
pub use rating::coerce_rating;
pub use report::{MatchLine, MatchReport};
