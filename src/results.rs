//! Per-round result records
//!
//! A record is frozen when its round ends and appended in level order. The
//! log is handed to the game-end callback and offers a few summary queries.

use serde::{Deserialize, Serialize};

/// Outcome of one finished round. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// 1-based level number
    pub level: u32,
    /// Cumulative time the ball dwelt on the goal region (ms)
    pub time_on_spot_ms: f64,
    /// Balls that left the play field during the round
    pub balls_lost: u32,
}

/// Ordered log of finished rounds for one game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultLog {
    pub records: Vec<ResultRecord>,
}

impl ResultLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total dwell across all finished rounds
    pub fn total_time_on_spot_ms(&self) -> f64 {
        self.records.iter().map(|r| r.time_on_spot_ms).sum()
    }

    pub fn total_balls_lost(&self) -> u32 {
        self.records.iter().map(|r| r.balls_lost).sum()
    }

    /// The round with the longest dwell (if any)
    pub fn best_round(&self) -> Option<&ResultRecord> {
        self.records.iter().max_by(|a, b| {
            a.time_on_spot_ms
                .partial_cmp(&b.time_on_spot_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
