/// Wizard flow management
///
/// Owns the step cursor, the selection ledger and the confirmation dialog
/// state, and exposes the operations the page wires to its buttons. The
/// flow holds no rendered elements; callers publish its outcomes as events.
use crate::ballot::BallotPage;
use crate::error::BallotError;
use crate::messaging::events::{ReviewRow, SelectionStatus};

use super::ledger::{SelectionLedger, ToggleOutcome, VoteSummary};
use super::steps::{StepCursor, WizardStep};

/// Navigation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationResult {
    /// Navigation succeeded, now on the new step
    Moved { from: WizardStep, to: WizardStep },

    /// Navigation clamped at a boundary; the cursor did not move
    Blocked,
}

/// One line of the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationLine {
    pub position_name: String,
    pub candidate_names: Vec<String>,
}

/// What the confirmation dialog renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationSummary {
    /// Positions that have at least one selection, in page order
    Selections(Vec<ConfirmationLine>),

    /// The explicit "no candidates selected" placeholder
    NoCandidates,
}

/// Wizard flow manager
pub struct WizardFlow {
    page: BallotPage,
    ledger: SelectionLedger,
    cursor: StepCursor,
    confirming: bool,
}

impl WizardFlow {
    pub fn new(page: BallotPage) -> Self {
        let ledger = SelectionLedger::from_positions(page.positions());
        let cursor = StepCursor::new(page.position_count());
        Self {
            page,
            ledger,
            cursor,
            confirming: false,
        }
    }

    pub fn page(&self) -> &BallotPage {
        &self.page
    }

    pub fn ledger(&self) -> &SelectionLedger {
        &self.ledger
    }

    pub fn current_step(&self) -> WizardStep {
        self.cursor.current()
    }

    pub fn progress(&self) -> f64 {
        self.cursor.progress()
    }

    pub fn summary(&self) -> VoteSummary {
        self.ledger.summary()
    }

    pub fn is_complete(&self) -> bool {
        self.ledger.is_complete()
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Toggle a candidate for a position (candidate card click).
    pub fn toggle(
        &mut self,
        position_id: &str,
        candidate_id: &str,
    ) -> Result<ToggleOutcome, BallotError> {
        self.ledger.toggle(position_id, candidate_id)
    }

    /// Navigate to the next step.
    pub fn advance(&mut self) -> NavigationResult {
        let from = self.cursor.current();
        match self.cursor.advance() {
            Some(to) => NavigationResult::Moved { from, to },
            None => NavigationResult::Blocked,
        }
    }

    /// Navigate to the previous step.
    pub fn retreat(&mut self) -> NavigationResult {
        let from = self.cursor.current();
        match self.cursor.retreat() {
            Some(to) => NavigationResult::Moved { from, to },
            None => NavigationResult::Blocked,
        }
    }

    /// The read-only summary the review step renders: every position with
    /// its completion badge and chosen candidate names in selection order.
    pub fn review_rows(&self) -> Vec<ReviewRow> {
        self.page
            .positions()
            .iter()
            .map(|position| {
                let selected = self
                    .ledger
                    .selected_for(&position.id)
                    .unwrap_or(&[]);
                let status = if selected.is_empty() {
                    SelectionStatus::Pending
                } else {
                    SelectionStatus::Complete
                };
                let candidate_names = selected
                    .iter()
                    .map(|cid| {
                        self.page
                            .candidate_name(&position.id, cid)
                            .unwrap_or(cid.as_str())
                            .to_string()
                    })
                    .collect();
                ReviewRow {
                    position_name: position.name.clone(),
                    status,
                    candidate_names,
                }
            })
            .collect()
    }

    /// Open the confirmation dialog, rendering the current ledger.
    pub fn open_confirmation(&mut self) -> ConfirmationSummary {
        self.confirming = true;

        if self.ledger.is_empty() {
            return ConfirmationSummary::NoCandidates;
        }

        let lines = self
            .page
            .positions()
            .iter()
            .filter_map(|position| {
                let selected = self.ledger.selected_for(&position.id)?;
                if selected.is_empty() {
                    return None;
                }
                let candidate_names = selected
                    .iter()
                    .map(|cid| {
                        self.page
                            .candidate_name(&position.id, cid)
                            .unwrap_or(cid.as_str())
                            .to_string()
                    })
                    .collect();
                Some(ConfirmationLine {
                    position_name: position.name.clone(),
                    candidate_names,
                })
            })
            .collect();
        ConfirmationSummary::Selections(lines)
    }

    /// Close the confirmation dialog without touching the ledger.
    /// Returns false when no dialog was open.
    pub fn cancel_confirmation(&mut self) -> bool {
        let was_open = self.confirming;
        self.confirming = false;
        was_open
    }

    /// Mark the dialog closed after a successful submission hand-off.
    pub fn close_confirmation(&mut self) {
        self.confirming = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ballot::fixtures::two_position_page;

    fn flow() -> WizardFlow {
        WizardFlow::new(two_position_page())
    }

    #[test]
    fn test_navigation_clamps() {
        let mut flow = flow();
        assert_eq!(flow.retreat(), NavigationResult::Blocked);

        assert_eq!(
            flow.advance(),
            NavigationResult::Moved {
                from: WizardStep::Position(0),
                to: WizardStep::Position(1),
            }
        );
        assert_eq!(
            flow.advance(),
            NavigationResult::Moved {
                from: WizardStep::Position(1),
                to: WizardStep::Review,
            }
        );
        assert_eq!(flow.advance(), NavigationResult::Blocked);
        assert_eq!(flow.current_step(), WizardStep::Review);
    }

    #[test]
    fn test_progress_after_each_navigation() {
        let mut flow = flow();
        assert_eq!(flow.progress(), 1.0 / 3.0);
        flow.advance();
        assert_eq!(flow.progress(), 2.0 / 3.0);
        flow.advance();
        assert_eq!(flow.progress(), 1.0);
        // Blocked navigation leaves progress untouched.
        flow.advance();
        assert_eq!(flow.progress(), 1.0);
    }

    #[test]
    fn test_review_rows_show_completion() {
        let mut flow = flow();
        flow.toggle("1", "a").unwrap();
        flow.toggle("2", "c").unwrap();
        flow.toggle("2", "d").unwrap();

        let rows = flow.review_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, SelectionStatus::Complete);
        assert_eq!(rows[0].candidate_names, vec!["Alice Reyes".to_string()]);
        assert_eq!(rows[1].status, SelectionStatus::Complete);
        assert_eq!(
            rows[1].candidate_names,
            vec!["Carla Santos".to_string(), "Diego Ramos".to_string()]
        );
    }

    #[test]
    fn test_review_rows_mark_pending_positions() {
        let mut flow = flow();
        flow.toggle("1", "b").unwrap();

        let rows = flow.review_rows();
        assert_eq!(rows[0].status, SelectionStatus::Complete);
        assert_eq!(rows[1].status, SelectionStatus::Pending);
        assert!(rows[1].candidate_names.is_empty());
    }

    #[test]
    fn test_confirmation_placeholder_when_empty() {
        let mut flow = flow();
        assert_eq!(flow.open_confirmation(), ConfirmationSummary::NoCandidates);
        assert!(flow.is_confirming());
    }

    #[test]
    fn test_confirmation_lists_only_selected_positions() {
        let mut flow = flow();
        flow.toggle("2", "e").unwrap();

        match flow.open_confirmation() {
            ConfirmationSummary::Selections(lines) => {
                assert_eq!(lines.len(), 1);
                assert_eq!(lines[0].position_name, "Senator");
                assert_eq!(lines[0].candidate_names, vec!["Elena Garcia".to_string()]);
            }
            other => panic!("expected selections, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_leaves_ledger_untouched() {
        let mut flow = flow();
        flow.toggle("1", "a").unwrap();
        flow.open_confirmation();

        assert!(flow.cancel_confirmation());
        assert!(!flow.is_confirming());
        assert_eq!(flow.ledger().selected_for("1").unwrap(), &["a".to_string()]);

        // Cancel with no dialog open reports false.
        assert!(!flow.cancel_confirmation());
    }
}
