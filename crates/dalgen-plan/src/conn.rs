//! Connection-string selection.
//!
//! Planning itself never opens connections; callers executing the plans
//! pick a connection string through a [`ConnectionStrategy`], which routes
//! between writer and reader endpoints.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::error::{PlanError, Result};

/// The connection strings available to a deployment, split by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionCandidates {
    /// Endpoints accepting writes.
    pub writers: Vec<String>,
    /// Read-only endpoints (replicas).
    pub readers: Vec<String>,
}

impl ConnectionCandidates {
    /// Creates a candidate set.
    #[must_use]
    pub const fn new(writers: Vec<String>, readers: Vec<String>) -> Self {
        Self { writers, readers }
    }
}

/// Picks a connection string from a candidate set.
pub trait ConnectionStrategy {
    /// Selects one candidate.
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::NoConnectionCandidates`] when the set holds
    /// no endpoint at all.
    fn select<'a>(&self, candidates: &'a ConnectionCandidates) -> Result<&'a str>;
}

/// Round-robin over a list. The counter is relaxed: under concurrency the
/// rotation order is best-effort, never the correctness of the pick.
fn rotate<'a>(list: &'a [String], counter: &AtomicUsize) -> Option<&'a str> {
    match list {
        [] => None,
        [single] => Some(single),
        _ => {
            let turn = counter.fetch_add(1, Ordering::Relaxed);
            Some(&list[turn % list.len()])
        }
    }
}

/// Prefers writer endpoints, falling back to readers when no writer is
/// configured.
#[derive(Debug, Default)]
pub struct WritePreferred {
    counter: AtomicUsize,
}

impl WritePreferred {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }
}

impl ConnectionStrategy for WritePreferred {
    fn select<'a>(&self, candidates: &'a ConnectionCandidates) -> Result<&'a str> {
        rotate(&candidates.writers, &self.counter)
            .or_else(|| {
                debug!("no writer endpoints, falling back to readers");
                rotate(&candidates.readers, &self.counter)
            })
            .ok_or(PlanError::NoConnectionCandidates)
    }
}

/// Prefers reader endpoints, falling back to writers when no reader is
/// configured.
#[derive(Debug, Default)]
pub struct ReadPreferred {
    counter: AtomicUsize,
}

impl ReadPreferred {
    /// Creates the strategy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }
}

impl ConnectionStrategy for ReadPreferred {
    fn select<'a>(&self, candidates: &'a ConnectionCandidates) -> Result<&'a str> {
        rotate(&candidates.readers, &self.counter)
            .or_else(|| {
                debug!("no reader endpoints, falling back to writers");
                rotate(&candidates.writers, &self.counter)
            })
            .ok_or(PlanError::NoConnectionCandidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_write_preferred_rotates_writers() {
        let candidates =
            ConnectionCandidates::new(strings(&["w1", "w2"]), strings(&["r1"]));
        let strategy = WritePreferred::new();
        assert_eq!(strategy.select(&candidates).unwrap(), "w1");
        assert_eq!(strategy.select(&candidates).unwrap(), "w2");
        assert_eq!(strategy.select(&candidates).unwrap(), "w1");
    }

    #[test]
    fn test_single_entry_skips_rotation() {
        let candidates = ConnectionCandidates::new(strings(&["w1"]), vec![]);
        let strategy = WritePreferred::new();
        for _ in 0..3 {
            assert_eq!(strategy.select(&candidates).unwrap(), "w1");
        }
    }

    #[test]
    fn test_read_preferred_picks_readers() {
        let candidates =
            ConnectionCandidates::new(strings(&["w1"]), strings(&["r1", "r2"]));
        let strategy = ReadPreferred::new();
        assert_eq!(strategy.select(&candidates).unwrap(), "r1");
        assert_eq!(strategy.select(&candidates).unwrap(), "r2");
    }

    #[test]
    fn test_fallback_to_other_role() {
        let only_readers = ConnectionCandidates::new(vec![], strings(&["r1"]));
        assert_eq!(WritePreferred::new().select(&only_readers).unwrap(), "r1");

        let only_writers = ConnectionCandidates::new(strings(&["w1"]), vec![]);
        assert_eq!(ReadPreferred::new().select(&only_writers).unwrap(), "w1");
    }

    #[test]
    fn test_empty_candidates_fail() {
        let empty = ConnectionCandidates::default();
        assert!(matches!(
            WritePreferred::new().select(&empty),
            Err(PlanError::NoConnectionCandidates)
        ));
        assert!(matches!(
            ReadPreferred::new().select(&empty),
            Err(PlanError::NoConnectionCandidates)
        ));
    }
}
