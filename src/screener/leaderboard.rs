//! Fixed-size leaderboard of screen candidates

use crate::screener::ScreenCandidate;

/// Keeps the `capacity` candidates with the lowest average bandwidth
///
/// Candidates are offered one at a time; once full, a newcomer only
/// enters by beating the current worst entry.
#[derive(Debug)]
pub struct Leaderboard {
    capacity: usize,
    entries: Vec<ScreenCandidate>,
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offer a candidate, replacing the worst entry if this one is tighter
    pub fn offer(&mut self, candidate: ScreenCandidate) {
        if self.entries.len() < self.capacity {
            self.entries.push(candidate);
            return;
        }
        let worst = self
            .entries
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.avg_bandwidth.total_cmp(&b.1.avg_bandwidth));
        if let Some((index, entry)) = worst {
            if candidate.avg_bandwidth < entry.avg_bandwidth {
                self.entries[index] = candidate;
            }
        }
    }

    /// Finish the board, tightest bandwidth first
    pub fn into_sorted(self) -> Vec<ScreenCandidate> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| a.avg_bandwidth.total_cmp(&b.avg_bandwidth));
        entries
    }
}
