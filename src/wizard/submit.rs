/// Ballot submission
///
/// Serializes the ledger into the form fields the server expects and posts
/// them to the page URL. Submission is one-shot and non-idempotent: the
/// gate guarantees at most one hand-off per session, whether the trigger
/// is the confirmation dialog or timer expiry.
use std::time::Duration;

use crate::ballot::BallotPage;
use crate::error::SubmitError;

use super::ledger::SelectionLedger;

/// The serialized form body: the anti-forgery token followed by one
/// `vote_<positionId>` field per selected candidate, repeated for
/// multi-winner positions, in page and selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    fields: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub const CSRF_FIELD: &'static str = "csrfmiddlewaretoken";

    pub fn build(page: &BallotPage, ledger: &SelectionLedger) -> Result<Self, SubmitError> {
        let token = page.csrf_token().ok_or(SubmitError::MissingCsrfToken)?;

        let mut fields = vec![(Self::CSRF_FIELD.to_string(), token.to_string())];
        for (position_id, selected) in ledger.iter() {
            for candidate_id in selected {
                fields.push((format!("vote_{}", position_id), candidate_id.clone()));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The vote fields only, token excluded.
    pub fn vote_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(name, _)| name != Self::CSRF_FIELD)
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// One-shot guard: the first trigger wins, every later trigger is a no-op.
#[derive(Debug, Default)]
pub struct SubmissionGate {
    fired: bool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            false
        } else {
            self.fired = true;
            true
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

/// Posts the payload to the current page URL.
pub struct FormSubmitter {
    url: String,
    timeout: Duration,
}

impl FormSubmitter {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmitError> {
        let pairs: Vec<(&str, &str)> = payload
            .fields()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();

        log::info!(
            "Posting ballot to {} ({} vote fields)",
            self.url,
            pairs.len().saturating_sub(1)
        );

        match ureq::post(&self.url)
            .timeout(self.timeout)
            .send_form(&pairs)
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => Err(SubmitError::Rejected { status }),
            Err(e) => Err(SubmitError::PostFailed {
                url: self.url.clone(),
                source: Box::new(e),
            }),
        }
    }
}
