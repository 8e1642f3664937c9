/// Public results data model
///
/// The shape served by the public results endpoint, plus the derivation
/// the grid renders from: per-position standings sorted by votes, winner
/// badges once the election is closed, and the countdown/updated-at text.
use chrono::{DateTime, Local, Utc};
use serde::Deserialize;

/// One candidate row as served by the endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidateResult {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub photo: Option<String>,
    pub votes: u64,
    pub percentage: f64,
}

/// The polled payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultsPayload {
    pub active: bool,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub total_votes: u64,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default)]
    pub candidates: Vec<CandidateResult>,
}

/// A candidate row ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub name: String,
    pub photo: Option<String>,
    pub votes: u64,
    pub percentage: f64,
    pub winner: bool,
}

/// One position's standings, sorted by votes descending.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionStanding {
    pub position: String,
    pub candidates: Vec<RankedCandidate>,
}

/// What the results page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// No active election: grid and banner hidden, no-data panel shown
    NoData,

    /// Standings grid
    Standings {
        total_votes: u64,
        closed: bool,
        positions: Vec<PositionStanding>,
    },
}

impl ResultsPayload {
    /// Derive the display view. Candidates are grouped by position in
    /// first-seen order and sorted by votes descending within the group;
    /// the leader is marked winner only once the election is closed.
    pub fn view(&self) -> ResultsView {
        if !self.active {
            return ResultsView::NoData;
        }

        let mut positions: Vec<PositionStanding> = Vec::new();
        for candidate in &self.candidates {
            let ranked = RankedCandidate {
                name: candidate.name.clone(),
                photo: candidate.photo.clone(),
                votes: candidate.votes,
                percentage: candidate.percentage,
                winner: false,
            };
            match positions
                .iter_mut()
                .find(|p| p.position == candidate.position)
            {
                Some(standing) => standing.candidates.push(ranked),
                None => positions.push(PositionStanding {
                    position: candidate.position.clone(),
                    candidates: vec![ranked],
                }),
            }
        }

        for standing in &mut positions {
            standing.candidates.sort_by(|a, b| b.votes.cmp(&a.votes));
            if self.is_closed {
                if let Some(leader) = standing.candidates.first_mut() {
                    leader.winner = true;
                }
            }
        }

        ResultsView::Standings {
            total_votes: self.total_votes,
            closed: self.is_closed,
            positions,
        }
    }

    /// The election end instant, if the payload carries a parseable date.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.end_date.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Countdown text for the time left until `end`: `Nd Nh Nm`, then
/// `Nh Nm Ns`, then `Nm Ns`, and "Ended" at or past the end.
pub fn countdown_display(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = end - now;
    if diff.num_seconds() <= 0 {
        return "Ended".to_string();
    }

    let days = diff.num_days();
    let hours = diff.num_hours() % 24;
    let minutes = diff.num_minutes() % 60;
    let seconds = diff.num_seconds() % 60;

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else {
        format!("{}m {}s", minutes, seconds)
    }
}

/// The "Updated at HH:MM:SS" stamp rendered with each refresh.
pub fn updated_at_display(now: DateTime<Local>) -> String {
    format!("Updated at {}", now.format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candidate(name: &str, position: &str, votes: u64) -> CandidateResult {
        CandidateResult {
            name: name.to_string(),
            position: position.to_string(),
            photo: None,
            votes,
            percentage: 0.0,
        }
    }

    #[test]
    fn test_inactive_payload_shows_no_data() {
        let payload = ResultsPayload {
            active: false,
            end_date: None,
            total_votes: 0,
            is_closed: false,
            candidates: vec![],
        };
        assert_eq!(payload.view(), ResultsView::NoData);
    }

    #[test]
    fn test_standings_sorted_descending() {
        let payload = ResultsPayload {
            active: true,
            end_date: None,
            total_votes: 30,
            is_closed: false,
            candidates: vec![
                candidate("Low", "President", 5),
                candidate("High", "President", 20),
                candidate("Mid", "President", 10),
            ],
        };
        match payload.view() {
            ResultsView::Standings { positions, .. } => {
                let names: Vec<_> = positions[0]
                    .candidates
                    .iter()
                    .map(|c| c.name.as_str())
                    .collect();
                assert_eq!(names, vec!["High", "Mid", "Low"]);
                // Open election: no winner badge yet.
                assert!(positions[0].candidates.iter().all(|c| !c.winner));
            }
            other => panic!("expected standings, got {:?}", other),
        }
    }

    #[test]
    fn test_winner_marked_only_when_closed() {
        let payload = ResultsPayload {
            active: true,
            end_date: None,
            total_votes: 25,
            is_closed: true,
            candidates: vec![
                candidate("A", "President", 5),
                candidate("B", "President", 20),
                candidate("C", "Senator", 12),
            ],
        };
        match payload.view() {
            ResultsView::Standings { positions, closed, .. } => {
                assert!(closed);
                assert_eq!(positions.len(), 2);
                assert!(positions[0].candidates[0].winner);
                assert_eq!(positions[0].candidates[0].name, "B");
                assert!(positions[1].candidates[0].winner);
            }
            other => panic!("expected standings, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_deserialization() {
        let raw = r#"{
            "active": true,
            "end_date": "2026-03-01T17:00:00+08:00",
            "total_votes": 1234,
            "is_closed": false,
            "candidates": [
                {"name": "Alice Reyes", "position": "President",
                 "photo": "/media/alice.jpg", "votes": 700, "percentage": 56.7}
            ]
        }"#;
        let payload: ResultsPayload = serde_json::from_str(raw).unwrap();
        assert!(payload.active);
        assert_eq!(payload.candidates[0].votes, 700);
        assert!(payload.end_time().is_some());
    }

    #[test]
    fn test_unparseable_end_date_is_none() {
        let payload = ResultsPayload {
            active: true,
            end_date: Some("soon".to_string()),
            total_votes: 0,
            is_closed: false,
            candidates: vec![],
        };
        assert_eq!(payload.end_time(), None);
    }

    #[test]
    fn test_countdown_formats() {
        let end = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();

        let now = Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(countdown_display(end, now), "2d 1h 30m");

        let now = Utc.with_ymd_and_hms(2026, 3, 3, 9, 15, 30).unwrap();
        assert_eq!(countdown_display(end, now), "2h 44m 30s");

        let now = Utc.with_ymd_and_hms(2026, 3, 3, 11, 58, 15).unwrap();
        assert_eq!(countdown_display(end, now), "1m 45s");

        let now = Utc.with_ymd_and_hms(2026, 3, 3, 12, 0, 0).unwrap();
        assert_eq!(countdown_display(end, now), "Ended");

        let now = Utc.with_ymd_and_hms(2026, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(countdown_display(end, now), "Ended");
    }
}
