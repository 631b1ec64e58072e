//! Provisional rows under construction during a chained expansion

use crate::rows::copy::deep_copy_row;
use crate::rows::types::Row;
use serde_json::Value;
use tracing::debug;

/// Ordered set of tracks, one provisional row each, identified by position.
/// Only the highest-numbered track receives writes.
///
/// Always holds at least the seed track; tracks are only ever added until
/// [`collapse`](TrackSet::collapse) consumes the set.
#[derive(Debug)]
pub struct TrackSet {
    tracks: Vec<Row>,
}

impl TrackSet {
    /// A set holding the empty seed track `0`
    pub fn seeded() -> Self {
        TrackSet {
            tracks: vec![Row::new()],
        }
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn highest_id(&self) -> usize {
        self.tracks.len() - 1
    }

    pub fn active(&self) -> &Row {
        &self.tracks[self.highest_id()]
    }

    /// Clone the active track into a new track, which becomes active
    pub fn branch(&mut self) -> usize {
        let row = deep_copy_row(self.active());
        let id = self.tracks.len();
        self.tracks.push(row);
        debug!(track = id, fields = self.active().len(), "branched track");
        id
    }

    /// Write a field into the active track
    pub fn write(&mut self, field: &str, value: Value) {
        let id = self.highest_id();
        self.tracks[id].insert(field.to_string(), value);
    }

    /// All rows in creation order
    pub fn collapse(self) -> Vec<Row> {
        debug!(tracks = self.tracks.len(), "collapsing tracks");
        self.tracks
    }
}
