//! Wizard controller
//!
//! Owns the `WizardState` and the storage port it is persisted through.
//! Every mutation is written to the store before it becomes visible in
//! memory, so a failed write leaves both unchanged.

use crate::audit::{AuditEntry, AuditLogger, Operation, Subject};
use crate::error::{BuybackError, BuybackResult};
use crate::models::{SectionPatch, SectionedFormData, SubmissionDocument, SubmissionId};
use crate::sink::SubmissionSink;
use crate::storage::KeyValueStore;

use super::persistence::{self, Loaded};
use super::state::WizardState;
use super::step::Step;

pub struct WizardController<S: KeyValueStore> {
    store: S,
    state: WizardState,
    audit: Option<AuditLogger>,
}

impl<S: KeyValueStore> WizardController<S> {
    /// Restore persisted progress; never fails
    pub fn restore(store: S) -> Self {
        Self::restore_with_audit(store, None)
    }

    /// Restore persisted progress, recording discarded state in `audit`
    ///
    /// Absent, unreadable, malformed or out-of-range state yields a fresh
    /// wizard at the first step with empty sections.
    pub fn restore_with_audit(mut store: S, audit: Option<AuditLogger>) -> Self {
        let state = match persistence::load(&store) {
            Loaded::Empty => WizardState::default(),
            Loaded::Restored(state) => state,
            Loaded::Invalid(reason) => {
                let reason = match persistence::clear(&mut store) {
                    Ok(()) => reason,
                    Err(e) => format!("{}; stale progress left in store: {}", reason, e),
                };
                if let Some(logger) = &audit {
                    let _ = logger.log(&AuditEntry::discarded(reason));
                }
                WizardState::default()
            }
        };

        Self {
            store,
            state,
            audit,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> Step {
        self.state.current_step
    }

    pub fn payload(&self) -> &SectionedFormData {
        &self.state.payload
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            let _ = logger.log(&entry);
        }
    }

    fn move_to(&mut self, target: Option<Step>, operation: Operation) -> BuybackResult<bool> {
        let from = self.state.current_step;
        let Some(to) = target else {
            return Ok(false);
        };

        persistence::save_step(&mut self.store, to)?;
        self.state.current_step = to;
        self.record(AuditEntry::step_change(operation, from.index(), to.index(), to.title()));
        Ok(true)
    }

    /// Move one step forward; returns false at the last step
    pub fn advance(&mut self) -> BuybackResult<bool> {
        let next = self.state.current_step.next();
        self.move_to(next, Operation::Advance)
    }

    /// Move one step back; returns false at the first step
    pub fn retreat(&mut self) -> BuybackResult<bool> {
        let previous = self.state.current_step.previous();
        self.move_to(previous, Operation::Retreat)
    }

    /// Shallow-merge `patch` into its section and persist the whole state
    pub fn update_section(&mut self, patch: SectionPatch) -> BuybackResult<()> {
        self.commit(patch, None)
    }

    /// Merge `patch` and move to the next step in a single write
    ///
    /// At the last step only the merge happens. Returns the step the wizard
    /// ends up on.
    pub fn update_and_advance(&mut self, patch: SectionPatch) -> BuybackResult<Step> {
        let next = self.state.current_step.next();
        self.commit(patch, next)?;
        Ok(self.state.current_step)
    }

    fn commit(&mut self, patch: SectionPatch, target: Option<Step>) -> BuybackResult<()> {
        let section = patch.section();
        let from = self.state.current_step;
        let before = self.state.payload.section_json(section);

        let mut candidate = self.state.clone();
        candidate.payload.apply(patch);
        if let Some(to) = target {
            candidate.current_step = to;
        }
        persistence::save(&mut self.store, &candidate)?;

        let after = candidate.payload.section_json(section);
        self.state = candidate;
        self.record(AuditEntry::section_update(section, &before, &after));
        if let Some(to) = target {
            self.record(AuditEntry::step_change(
                Operation::Advance,
                from.index(),
                to.index(),
                to.title(),
            ));
        }
        Ok(())
    }

    /// Clear all progress, in memory and in the store
    pub fn reset(&mut self) -> BuybackResult<()> {
        persistence::clear(&mut self.store)?;
        self.state = WizardState::default();
        self.record(AuditEntry::new(Operation::Reset, Subject::Wizard, "wizard"));
        Ok(())
    }

    /// Hand the payload to `sink`
    ///
    /// On success the wizard is reset and the sink's id returned. On failure
    /// the state and store are left as they were.
    pub fn submit<K: SubmissionSink + ?Sized>(&mut self, sink: &mut K) -> BuybackResult<SubmissionId> {
        let document = SubmissionDocument::new(self.state.payload.clone());

        let id = match sink.submit(&document) {
            Ok(id) => id,
            Err(e) => {
                let err = if e.is_submission() {
                    e
                } else {
                    BuybackError::Submission(e.to_string())
                };
                self.record(AuditEntry::submit_failed(err.to_string()));
                return Err(err);
            }
        };

        self.record(AuditEntry::submitted(&id));

        // The request is already stored remotely; a failed clear must not report failure
        if let Err(e) = self.reset() {
            self.state = WizardState::default();
            self.record(AuditEntry::discarded(format!(
                "progress not cleared after submission {}: {}",
                id, e
            )));
        }

        Ok(id)
    }
}
