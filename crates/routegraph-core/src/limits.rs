//! Safety valves for traversals over graphs that may contain cycles

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Maximum paths dequeued by a single traversal (1,000,000)
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

/// Maximum paths waiting in a traversal frontier (100,000)
pub const DEFAULT_MAX_FRONTIER: usize = 100_000;

/// Step and frontier-size budget for one traversal.
///
/// `None` disables the corresponding check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalLimits {
    #[serde(default = "default_max_steps")]
    pub max_steps: Option<usize>,

    #[serde(default = "default_max_frontier")]
    pub max_frontier: Option<usize>,
}

fn default_max_steps() -> Option<usize> {
    Some(DEFAULT_MAX_STEPS)
}

fn default_max_frontier() -> Option<usize> {
    Some(DEFAULT_MAX_FRONTIER)
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            max_frontier: default_max_frontier(),
        }
    }
}

impl TraversalLimits {
    /// No budget at all; a traversal that never converges will run forever
    pub fn unbounded() -> Self {
        Self {
            max_steps: None,
            max_frontier: None,
        }
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = Some(max);
        self
    }

    pub fn with_max_frontier(mut self, max: usize) -> Self {
        self.max_frontier = Some(max);
        self
    }

    pub(crate) fn check_steps(&self, steps: usize) -> Result<()> {
        check("max_steps", steps, self.max_steps)
    }

    pub(crate) fn check_frontier(&self, size: usize) -> Result<()> {
        check("max_frontier", size, self.max_frontier)
    }
}

fn check(limit: &'static str, value: usize, max: Option<usize>) -> Result<()> {
    match max {
        Some(max) if value > max => {
            tracing::warn!("Traversal stopped: {} reached {} (max {})", limit, value, max);
            Err(Error::LimitExceeded { limit, value, max })
        }
        _ => Ok(()),
    }
}
