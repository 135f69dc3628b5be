//! Caller-side bounds on proof search
//!
//! The search itself never stops on its own. Front ends that must answer in bounded time
//! charge every step to a `SearchBudget` and give up when it runs out.

use crate::{FriendsError, ResourceLimits};
use std::time::Instant;

/// The clock is read once per this many steps.
const CLOCK_INTERVAL: u64 = 1024;

/// Step and wall-clock allowance for consuming one query's solutions
#[derive(Debug, Clone)]
pub struct SearchBudget {
    max_steps: u64,
    max_time_ms: u64,
    steps: u64,
    start_time: Instant,
}

impl SearchBudget {
    pub fn new(max_steps: u64, max_time_ms: u64) -> Self {
        Self {
            max_steps,
            max_time_ms,
            steps: 0,
            start_time: Instant::now(),
        }
    }

    pub fn from_limits(limits: &ResourceLimits) -> Self {
        Self::new(limits.max_query_steps, limits.max_query_time_ms)
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Accounts for one search step.
    pub fn charge(&mut self) -> Result<(), FriendsError> {
        self.steps += 1;
        if self.steps > self.max_steps {
            return Err(FriendsError::ResourceLimitExceeded {
                limit_name: "max_query_steps".to_string(),
                limit_value: self.max_steps.to_string(),
                actual_value: self.steps.to_string(),
                suggestion: "The query may not terminate. Check for left-recursive rules or raise the step limit.".to_string(),
            });
        }
        if self.steps % CLOCK_INTERVAL == 0 {
            self.check_timeout()?;
        }
        Ok(())
    }

    /// Fails once more time than allowed has passed since the budget was created.
    pub fn check_timeout(&self) -> Result<(), FriendsError> {
        let elapsed_ms = self.start_time.elapsed().as_millis() as u64;
        if elapsed_ms > self.max_time_ms {
            return Err(FriendsError::ResourceLimitExceeded {
                limit_name: "max_query_time_ms".to_string(),
                limit_value: self.max_time_ms.to_string(),
                actual_value: elapsed_ms.to_string(),
                suggestion: format!(
                    "The query ran for {}ms, exceeding the limit of {}ms. Simplify the rules or increase the timeout.",
                    elapsed_ms, self.max_time_ms
                ),
            });
        }
        Ok(())
    }
}
