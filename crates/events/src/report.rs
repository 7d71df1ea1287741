use crate::index::EventIndex;
use serde::Serialize;
use std::fmt;

/// Characters of a match id shown before it is cut
const ID_DISPLAY_CHARS: usize = 20;

/// One match as shown in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchLine {
    /// 1-based chronological position
    pub position: usize,
    pub id: String,
    pub player_count: usize,
    pub players: Vec<String>,
}

/// Summary of a grouped index: totals plus the first and last matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub total_records: usize,
    pub unique_matches: usize,
    pub first: Vec<MatchLine>,
    pub last: Vec<MatchLine>,
}

impl EventIndex {
    /// Report on the first `head` and last `tail` matches.
    ///
    /// The two windows may overlap when the index holds fewer than
    /// `head + tail` matches.
    #[must_use]
    pub fn report(&self, head: usize, tail: usize) -> MatchReport {
        let lines: Vec<MatchLine> = self
            .iter()
            .enumerate()
            .map(|(i, (id, participants))| MatchLine {
                position: i + 1,
                id: id.abbreviated(ID_DISPLAY_CHARS),
                player_count: participants.len(),
                players: participants.iter().map(|p| p.player.clone()).collect(),
            })
            .collect();

        let first = lines.iter().take(head).cloned().collect();
        let last = lines[lines.len().saturating_sub(tail)..].to_vec();

        MatchReport {
            total_records: self.participant_count(),
            unique_matches: self.len(),
            first,
            last,
        }
    }
}

impl fmt::Display for MatchLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}. {} ({} players): {}",
            self.position,
            self.id,
            self.player_count,
            self.players.join(", ")
        )
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total player records: {}", self.total_records)?;
        writeln!(f, "Unique matches: {}", self.unique_matches)?;

        if !self.first.is_empty() {
            writeln!(f)?;
            writeln!(f, "First {} matches:", self.first.len())?;
            for line in &self.first {
                writeln!(f, "{line}")?;
            }
        }

        if !self.last.is_empty() {
            writeln!(f)?;
            writeln!(f, "Last {} matches:", self.last.len())?;
            for line in &self.last {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
