use std::{fmt, str::FromStr};

use serde::Deserialize;

/// How the best on-diet sequence is counted over meals in creation order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StreakRule {
    /// Length of the longest run of consecutive on-diet meals.
    #[default]
    Consecutive,
    /// Legacy counting: the last meal always closes the running sequence without
    /// adding itself, so a trailing on-diet meal is never credited.
    FinalMealCloses,
}

impl StreakRule {
    pub fn as_str(self) -> &'static str {
        match self {
            StreakRule::Consecutive => "consecutive",
            StreakRule::FinalMealCloses => "final-meal-closes",
        }
    }
}

impl fmt::Display for StreakRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreakRule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "consecutive" => Ok(StreakRule::Consecutive),
            "final-meal-closes" => Ok(StreakRule::FinalMealCloses),
            other => anyhow::bail!(
                "unknown streak rule {other:?}, expected \"consecutive\" or \"final-meal-closes\""
            ),
        }
    }
}

/// Best sequence of on-diet meals. `on_diet` must be ordered by creation time, oldest first.
pub fn best_sequence(on_diet: &[bool], rule: StreakRule) -> u64 {
    match rule {
        StreakRule::Consecutive => {
            let (mut best, mut run) = (0u64, 0u64);
            for &on in on_diet {
                if on {
                    run += 1;
                    best = best.max(run);
                } else {
                    run = 0;
                }
            }
            best
        }
        StreakRule::FinalMealCloses => {
            let last = on_diet.len().saturating_sub(1);
            let (mut best, mut count) = (0u64, 0u64);
            for (i, &on) in on_diet.iter().enumerate() {
                if !on || i == last {
                    best = best.max(count);
                    count = 0;
                    continue;
                }
                count += 1;
            }
            best
        }
    }
}
