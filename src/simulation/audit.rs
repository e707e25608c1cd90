//! Collision auditing between cars
//!
//! The auditor never resolves a collision. It only records that the
//! intersection protocol let two cars overlap.

use super::geometry::overlaps;
use super::types::{AgentId, Body, Vec2};

/// Running collision diagnostics, written only by the control thread
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Overlapping ordered pairs seen across all passes
    pub count: u64,
    /// Most recent offending pair; kept after the overlap clears
    pub last_pair: Option<(AgentId, AgentId)>,
    pub last_positions: Option<(Vec2, Vec2)>,
    /// Whether the latest pass found any overlap
    pub flag: bool,
}

impl CollisionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one audit pass over every ordered pair of distinct cars.
    ///
    /// Returns the number of overlapping ordered pairs found.
    pub fn audit(&mut self, cars: &[Body]) -> u64 {
        self.flag = false;
        let mut found = 0;
        for (i, a) in cars.iter().enumerate() {
            for (j, b) in cars.iter().enumerate() {
                if i == j || !overlaps(a, b) {
                    continue;
                }
                self.flag = true;
                self.last_pair = Some((AgentId(i), AgentId(j)));
                self.last_positions = Some((a.position, b.position));
                self.count += 1;
                found += 1;
            }
        }
        found
    }
}
