use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BallotError;

/// Embedded page data, following the `json_script` convention: the rendered
/// page carries named JSON blocks that the scripts read at initialization.
/// A missing block means the feature is not present on this page.
#[derive(Debug, Clone)]
pub struct PageData {
    blocks: serde_json::Map<String, Value>,
}

impl PageData {
    /// Parse the embedded data document (a JSON object keyed by block id).
    pub fn from_str(raw: &str) -> Result<Self, BallotError> {
        let blocks = serde_json::from_str(raw).map_err(BallotError::ParseFailed)?;
        Ok(Self { blocks })
    }

    /// Read one block. Missing blocks and malformed blocks both yield None;
    /// malformed blocks are logged so a template regression is visible.
    pub fn block<T: DeserializeOwned>(&self, id: &str) -> Option<T> {
        let value = self.blocks.get(id)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::error!("Error parsing block {}: {}", id, e);
                None
            }
        }
    }

    pub fn has_block(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }
}

/// An option a voter may select for a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
}

/// A ballot office with a fixed number of winners. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub id: String,
    pub name: String,
    pub max_winners: usize,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct PositionBlock {
    id: String,
    name: String,
    #[serde(default)]
    max_winners: usize,
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct BallotBlock {
    #[serde(default)]
    election: Option<String>,
    positions: Vec<PositionBlock>,
}

/// The voting page as seen by the wizard: position sections in page order
/// plus the anti-forgery token.
#[derive(Debug, Clone)]
pub struct BallotPage {
    election: Option<String>,
    positions: Vec<Position>,
    csrf_token: Option<String>,
}

impl BallotPage {
    /// Block ids the voting template embeds.
    pub const BALLOT_BLOCK: &'static str = "ballot-data";
    pub const CSRF_BLOCK: &'static str = "csrf-token";

    pub fn from_page(page: &PageData) -> Result<Self, BallotError> {
        let ballot: BallotBlock = page
            .block(Self::BALLOT_BLOCK)
            .ok_or(BallotError::MissingBallot)?;

        let positions = ballot
            .positions
            .into_iter()
            .map(|p| Position {
                id: p.id,
                name: p.name,
                // A missing or zero winner count renders as a single-winner
                // section, matching the page's own coercion.
                max_winners: p.max_winners.max(1),
                candidates: p.candidates,
            })
            .collect();

        Ok(Self {
            election: ballot.election,
            positions,
            csrf_token: page.block(Self::CSRF_BLOCK),
        })
    }

    pub fn election(&self) -> Option<&str> {
        self.election.as_deref()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn position(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn candidate_name(&self, position_id: &str, candidate_id: &str) -> Option<&str> {
        self.position(position_id)?
            .candidates
            .iter()
            .find(|c| c.id == candidate_id)
            .map(|c| c.name.as_str())
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}
