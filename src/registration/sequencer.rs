//! Step sequencing over a single registration draft

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::draft::{DraftError, Field, RegistrationDraft, RegistrationSummary};
use super::step::Step;
use super::validator::{validate_step, ValidationError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("registration can only be submitted from the last step, currently on step {0}")]
    NotOnFinalStep(Step),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Completion signal for a submitted registration.
///
/// Nothing is transmitted; the reference only identifies the submission in logs.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub summary: RegistrationSummary,
}

/// Current step plus the draft being filled in
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    step: Step,
    draft: RegistrationDraft,
}

impl StepSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on the first step with answers already filled in
    pub fn with_draft(draft: RegistrationDraft) -> Self {
        Self {
            step: Step::Email,
            draft,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut RegistrationDraft {
        &mut self.draft
    }

    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        self.draft.set(field, value)?;
        tracing::trace!(field = %field, "Draft field updated");
        Ok(())
    }

    /// Validate the current step and move forward, saturating at the last step.
    ///
    /// On failure the step is unchanged.
    pub fn advance(&mut self) -> Result<Step, ValidationError> {
        if let Err(err) = validate_step(self.step, &self.draft) {
            tracing::debug!(step = self.step.number(), error = %err, "Step validation failed");
            return Err(err);
        }
        let from = self.step;
        self.step = self.step.next();
        tracing::debug!(from = from.number(), to = self.step.number(), "Advanced step");
        Ok(self.step)
    }

    /// Move back one step without validating, saturating at the first step
    pub fn retreat(&mut self) -> Step {
        self.step = self.step.prev();
        tracing::debug!(to = self.step.number(), "Retreated step");
        self.step
    }

    /// Submit from the final step.
    ///
    /// On success the draft is logged and discarded, and the sequencer starts
    /// over on the first step with an empty draft.
    pub fn submit(&mut self) -> Result<Submission, SubmitError> {
        if !self.step.is_last() {
            return Err(SubmitError::NotOnFinalStep(self.step));
        }
        validate_step(self.step, &self.draft)?;

        let draft = std::mem::take(&mut self.draft);
        self.step = Step::Email;

        let submission = Submission {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            summary: draft.summary(),
        };

        tracing::info!(
            reference = %submission.reference,
            draft = %serde_json::to_string(&draft).unwrap_or_default(),
            "Registration submitted"
        );

        Ok(submission)
    }

    /// Progress bar position, 20..=100
    pub fn progress_percent(&self) -> u16 {
        self.step.progress_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::draft::Category;

    fn valid_through_race_pack() -> RegistrationDraft {
        let mut draft = RegistrationDraft::new();
        for (field, value) in [
            (Field::Email, "siti@example.com"),
            (Field::FullName, "Siti Rahma"),
            (Field::BirthDate, "2004-02-29"),
            (Field::Gender, "female"),
            (Field::Address, "Jl. Sudirman 5, Jakarta"),
            (Field::IdNumber, "3171014402040002"),
            (Field::BibName, "SITI"),
            (Field::RegistrationSource, "personal"),
            (Field::InfoSource, "friend"),
            (Field::BloodType, "B"),
            (Field::ChronicDisease, "no"),
            (Field::UnderCare, "no"),
            (Field::Medication, "no"),
            (Field::Complications, "no"),
            (Field::EmergencyContact, "+6281300000000"),
            (Field::JerseySize, "S"),
        ] {
            draft.set(field, value).unwrap();
        }
        draft
    }

    #[test]
    fn test_starts_on_first_step() {
        let sequencer = StepSequencer::new();
        assert_eq!(sequencer.step(), Step::Email);
        assert_eq!(sequencer.progress_percent(), 20);
    }

    #[test]
    fn test_failed_advance_stays() {
        let mut sequencer = StepSequencer::new();
        let err = sequencer.advance().unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(sequencer.step(), Step::Email);
    }

    #[test]
    fn test_advance_through_all_steps() {
        let mut sequencer = StepSequencer::with_draft(valid_through_race_pack());
        assert_eq!(sequencer.advance(), Ok(Step::Participant));
        assert_eq!(sequencer.advance(), Ok(Step::Health));
        assert_eq!(sequencer.advance(), Ok(Step::RacePack));
        assert_eq!(sequencer.advance(), Ok(Step::Category));
    }

    #[test]
    fn test_advance_on_last_step_saturates() {
        let mut draft = valid_through_race_pack();
        draft.category = Some(Category::General);
        let mut sequencer = StepSequencer::with_draft(draft);
        for _ in 0..4 {
            sequencer.advance().unwrap();
        }
        assert_eq!(sequencer.advance(), Ok(Step::Category));
    }

    #[test]
    fn test_retreat_ignores_validity() {
        let mut sequencer = StepSequencer::with_draft(valid_through_race_pack());
        sequencer.advance().unwrap();
        sequencer.advance().unwrap();
        sequencer.draft_mut().email.clear();

        assert_eq!(sequencer.retreat(), Step::Participant);
        assert_eq!(sequencer.retreat(), Step::Email);
        assert_eq!(sequencer.retreat(), Step::Email);
    }

    #[test]
    fn test_submit_off_final_step_fails() {
        let mut sequencer = StepSequencer::with_draft(valid_through_race_pack());
        assert_eq!(
            sequencer.submit().unwrap_err(),
            SubmitError::NotOnFinalStep(Step::Email)
        );
        assert_eq!(sequencer.draft().email, "siti@example.com");
    }

    #[test]
    fn test_submit_without_category_fails() {
        let mut sequencer = StepSequencer::with_draft(valid_through_race_pack());
        for _ in 0..4 {
            sequencer.advance().unwrap();
        }
        assert_eq!(
            sequencer.submit().unwrap_err(),
            SubmitError::Invalid(ValidationError::CategoryMissing)
        );
        assert_eq!(sequencer.step(), Step::Category);
    }

    #[test]
    fn test_submit_discards_draft_and_restarts() {
        let mut sequencer = StepSequencer::with_draft(valid_through_race_pack());
        for _ in 0..4 {
            sequencer.advance().unwrap();
        }
        sequencer.set_field(Field::Category, "student").unwrap();

        let submission = sequencer.submit().unwrap();
        assert_eq!(submission.summary.full_name, "Siti Rahma");
        assert_eq!(submission.summary.category, Some(Category::Student));

        assert_eq!(sequencer.step(), Step::Email);
        assert_eq!(sequencer.draft(), &RegistrationDraft::default());
    }

    #[test]
    fn test_set_field_rejects_unknown_choice() {
        let mut sequencer = StepSequencer::new();
        assert!(sequencer.set_field(Field::JerseySize, "XS").is_err());
        assert_eq!(sequencer.draft().jersey_size, None);
    }
}
