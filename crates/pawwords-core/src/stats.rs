//! Cumulative user progress counters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// User progress stats, mutated only by session finalization.
///
/// All counters only ever increase. `last_check_in` records the calendar
/// date of the most recent streak increment so a streak can grow at most
/// once per day no matter how many sessions complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// Reward points earned across all completed sessions.
    #[serde(default)]
    pub reward_points: u64,
    /// Consecutive-day check-in streak.
    #[serde(default)]
    pub streak: u64,
    /// Total words completed across all sessions.
    #[serde(default)]
    pub total_words: u64,
    /// Calendar date of the last streak increment.
    #[serde(default)]
    pub last_check_in: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zeroed() {
        let stats = UserStats::default();
        assert_eq!(stats.reward_points, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.total_words, 0);
        assert!(stats.last_check_in.is_none());
    }

    #[test]
    fn stats_roundtrip_through_json() {
        let stats = UserStats {
            reward_points: 120,
            streak: 4,
            total_words: 85,
            last_check_in: NaiveDate::from_ymd_opt(2026, 8, 29),
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"rewardPoints\""));
        let back: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let back: UserStats = serde_json::from_str("{\"streak\":2}").unwrap();
        assert_eq!(back.streak, 2);
        assert_eq!(back.reward_points, 0);
        assert!(back.last_check_in.is_none());
    }
}
