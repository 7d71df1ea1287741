use crate::error::{EventError, Result};
use crate::id::EventId;
use crate::rating::coerce_rating;
use indexmap::IndexMap;
use matchbook_sheet::{CellValue, Document, Record, SheetError};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Which sheet and fields the grouper reads
#[derive(Debug, Clone)]
pub struct GroupingOptions {
    /// Sheet holding one record per player per match (default: "Elo_Player_All")
    pub sheet: String,
    /// Field carrying the match identifier (default: "match_id")
    pub event_field: String,
    /// Field carrying the player name (default: "player_name")
    pub player_field: String,
    /// Field carrying the rating after the match (default: "player_elo_after")
    pub rating_field: String,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            sheet: "Elo_Player_All".to_string(),
            event_field: "match_id".to_string(),
            player_field: "player_name".to_string(),
            rating_field: "player_elo_after".to_string(),
        }
    }
}

impl GroupingOptions {
    #[must_use]
    pub fn with_sheet(mut self, sheet: &str) -> Self {
        self.sheet = sheet.to_string();
        self
    }

    #[must_use]
    pub fn with_event_field(mut self, field: &str) -> Self {
        self.event_field = field.to_string();
        self
    }

    #[must_use]
    pub fn with_player_field(mut self, field: &str) -> Self {
        self.player_field = field.to_string();
        self
    }

    #[must_use]
    pub fn with_rating_field(mut self, field: &str) -> Self {
        self.rating_field = field.to_string();
        self
    }
}

/// One player's line in a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub player: String,
    pub elo_after: CellValue,
}

impl Participant {
    fn from_record(
        record: &Record,
        event: &EventId,
        row: usize,
        options: &GroupingOptions,
    ) -> Result<Self> {
        let field = |name: &str| {
            record
                .get(name)
                .ok_or_else(|| EventError::MissingMandatoryField {
                    event: event.clone(),
                    field: name.to_string(),
                    row,
                })
        };

        let player = field(&options.player_field)?.to_string();
        let raw_rating = field(&options.rating_field)?;
        // Non-numeric ratings are carried as read
        let elo_after = coerce_rating(raw_rating).unwrap_or_else(|| raw_rating.clone());

        Ok(Self { player, elo_after })
    }
}

/// Matches in order of first appearance, each with its participants in
/// source order.
///
/// Order and membership live in one insertion-ordered map, so every match in
/// the order has a group and every group appears in the order exactly once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventIndex {
    groups: IndexMap<EventId, Vec<Participant>>,
    records_scanned: usize,
}

impl EventIndex {
    /// Number of distinct matches
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Match identifiers in order of first appearance
    pub fn order(&self) -> impl Iterator<Item = &EventId> {
        self.groups.keys()
    }

    /// Participants of a match in source order
    #[must_use]
    pub fn participants(&self, event: &EventId) -> Option<&[Participant]> {
        self.groups.get(event).map(Vec::as_slice)
    }

    /// Zero-based chronological position of a match
    #[must_use]
    pub fn position(&self, event: &EventId) -> Option<usize> {
        self.groups.get_index_of(event)
    }

    /// `(match, participants)` pairs in order of first appearance
    pub fn iter(&self) -> impl Iterator<Item = (&EventId, &[Participant])> {
        self.groups.iter().map(|(id, group)| (id, group.as_slice()))
    }

    /// Records that contributed a participant
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Records read, including those without a match identifier
    #[must_use]
    pub fn records_scanned(&self) -> usize {
        self.records_scanned
    }
}

impl Serialize for EventIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EventIndex", 2)?;
        state.serialize_field("order", &self.order().collect::<Vec<_>>())?;
        state.serialize_field("matches", &self.groups)?;
        state.end()
    }
}

/// Group per-player records by match in a single pass.
///
/// Records whose match field is absent or falsy are skipped. A record that
/// does name a match must carry the player and rating fields; otherwise the
/// whole grouping fails. Numeric rating text is coerced to a number, any
/// other rating value is kept unchanged.
pub fn group_records(records: &[Record], options: &GroupingOptions) -> Result<EventIndex> {
    let mut groups: IndexMap<EventId, Vec<Participant>> = IndexMap::new();

    for (row, record) in records.iter().enumerate() {
        let Some(event) = record
            .get(&options.event_field)
            .and_then(EventId::from_cell)
        else {
            tracing::debug!(row, field = %options.event_field, "record has no match id, skipped");
            continue;
        };

        let participant = Participant::from_record(record, &event, row, options)?;
        groups.entry(event).or_default().push(participant);
    }

    Ok(EventIndex {
        groups,
        records_scanned: records.len(),
    })
}

/// Group the configured sheet of a loaded document.
///
/// # Errors
///
/// `EmptySource` when the sheet is missing, empty, or yields no matches;
/// otherwise whatever [`group_records`] reports.
pub fn group_document(doc: &Document, options: &GroupingOptions) -> Result<EventIndex> {
    let records = match doc.require_records(&options.sheet) {
        Ok(records) => records,
        Err(SheetError::EmptySource { sheet, available }) => {
            return Err(EventError::EmptySource { sheet, available })
        }
        Err(e) => return Err(e.into()),
    };

    let index = group_records(records, options)?;
    if index.is_empty() {
        return Err(EventError::EmptySource {
            sheet: options.sheet.clone(),
            available: doc.sheet_names().into_iter().map(str::to_string).collect(),
        });
    }

    tracing::info!(
        sheet = %options.sheet,
        records = index.records_scanned(),
        matches = index.len(),
        "grouped matches"
    );
    Ok(index)
}
