//! Leaderboard of completed sessions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::PathKind;
use crate::session::Session;

/// One ranked team.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based.
    pub rank: usize,
    pub team_name: String,
    /// Elapsed seconds plus penalties.
    pub total_time: f64,
    /// Path the team finished on.
    pub path: Option<PathKind>,
    pub penalties: u32,
    pub players: String,
}

/// Rank completed sessions by total time, fastest first.
///
/// Unfinished sessions are skipped. Equal times keep registration order.
pub fn rank<'a>(
    sessions: impl IntoIterator<Item = &'a Session>,
    now: DateTime<Utc>,
) -> Vec<LeaderboardEntry> {
    let mut finished: Vec<(u64, LeaderboardEntry)> = sessions
        .into_iter()
        .filter(|s| s.is_complete())
        .map(|s| {
            let entry = LeaderboardEntry {
                rank: 0,
                team_name: s.team_name().to_string(),
                total_time: s.total_time_secs(now),
                path: s.current_path(),
                penalties: s.total_penalty_seconds(),
                players: s.players_label(),
            };
            (s.registration_seq, entry)
        })
        .collect();

    finished.sort_by_key(|(seq, _)| *seq);
    finished.sort_by(|(_, a), (_, b)| a.total_time.total_cmp(&b.total_time));

    finished
        .into_iter()
        .enumerate()
        .map(|(i, (_, mut entry))| {
            entry.rank = i + 1;
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    fn finished(team: &str, seq: u64, seconds: i64, penalties: u32) -> Session {
        let mut s = Session::new(team, "A", "B", seq, epoch());
        s.start_time = Some(epoch());
        s.end_time = Some(epoch() + Duration::seconds(seconds));
        s.current_path = Some(PathKind::Easy);
        s.total_penalty_seconds = penalties;
        s
    }

    #[test]
    fn test_rank_orders_by_time_plus_penalties() {
        let sessions = vec![
            finished("Slow", 0, 300, 0),
            finished("Fast", 1, 100, 15),
            finished("Penalized", 2, 90, 60),
        ];

        let board = rank(&sessions, epoch());
        let names: Vec<_> = board.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Penalized", "Slow"]);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].total_time, 115.0);
        assert_eq!(board[2].rank, 3);
        assert_eq!(board[1].players, "A & B");
    }

    #[test]
    fn test_rank_skips_unfinished() {
        let mut running = Session::new("Running", "A", "B", 0, epoch());
        running.start_time = Some(epoch());
        let sessions = vec![running, finished("Done", 1, 50, 0)];

        let board = rank(&sessions, epoch() + Duration::seconds(10));
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].team_name, "Done");
    }

    #[test]
    fn test_rank_ties_keep_registration_order() {
        let sessions = vec![
            finished("Third", 7, 60, 0),
            finished("First", 2, 60, 0),
            finished("Second", 5, 60, 0),
        ];

        let board = rank(&sessions, epoch());
        let names: Vec<_> = board.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(&Vec::<Session>::new(), epoch()).is_empty());
    }
}
