//! Integration tests for the registration flow through the public API
//!
//! ```bash
//! cargo test --test registration_flow
//! ```

use funrun::check::{check_draft, load_draft};
use funrun::registration::{
    validate_step, Category, Field, RegistrationDraft, Step, StepSequencer, SubmitError,
    ValidationError,
};
use std::fs;
use tempfile::TempDir;

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn set_all(draft: &mut RegistrationDraft, answers: &[(Field, &str)]) {
    for (field, value) in answers {
        draft.set(*field, value).unwrap();
    }
}

const EMAIL: &[(Field, &str)] = &[(Field::Email, "sari@example.com")];

const PARTICIPANT: &[(Field, &str)] = &[
    (Field::FullName, "Sari Wulandari"),
    (Field::BirthDate, "1998-04-12"),
    (Field::Gender, "female"),
    (Field::Address, "Jl. Sudirman 10\nJakarta"),
    (Field::IdNumber, "3174000000000001"),
    (Field::BibName, "SARI"),
    (Field::RegistrationSource, "personal"),
    (Field::InfoSource, "social"),
];

const HEALTH: &[(Field, &str)] = &[
    (Field::BloodType, "AB"),
    (Field::ChronicDisease, "no"),
    (Field::UnderCare, "no"),
    (Field::Medication, "no"),
    (Field::Complications, "no"),
    (Field::EmergencyContact, "Ibu, 0812345678"),
];

const RACE_PACK: &[(Field, &str)] = &[(Field::JerseySize, "L")];

fn complete_draft() -> RegistrationDraft {
    let mut draft = RegistrationDraft::new();
    for answers in [EMAIL, PARTICIPANT, HEALTH, RACE_PACK] {
        set_all(&mut draft, answers);
    }
    draft
}

/// A sequencer parked on `step` with every earlier step filled in
fn sequencer_at(step: Step, draft: RegistrationDraft) -> StepSequencer {
    let mut sequencer = StepSequencer::with_draft(draft);
    while sequencer.step() != step {
        sequencer.advance().unwrap();
    }
    sequencer
}

// ─── Sequencer ───────────────────────────────────────────────────────────────

#[test]
fn incomplete_step_never_advances() {
    let answers = [EMAIL, PARTICIPANT, HEALTH, RACE_PACK];
    for step in Step::ALL {
        let mut draft = RegistrationDraft::new();
        for filled in &answers[..usize::from(step.number() - 1)] {
            set_all(&mut draft, filled);
        }
        let mut sequencer = sequencer_at(step, draft);

        assert!(sequencer.advance().is_err(), "advanced past {step}");
        assert_eq!(sequencer.step(), step);
    }
}

#[test]
fn retreat_always_goes_back_one_step() {
    for step in Step::ALL.into_iter().skip(1) {
        let mut sequencer = sequencer_at(step, complete_draft());
        // Invalidate the current draft; retreat does not validate
        sequencer.set_field(Field::Email, "").unwrap();

        assert_eq!(sequencer.retreat(), step.prev());
        assert_eq!(sequencer.step().number(), step.number() - 1);
    }
}

#[test]
fn retreat_on_first_step_stays() {
    let mut sequencer = StepSequencer::new();
    assert_eq!(sequencer.retreat(), Step::Email);
}

#[test]
fn answers_survive_back_and_forth() {
    let mut sequencer = sequencer_at(Step::Health, complete_draft());
    sequencer.retreat();
    sequencer.retreat();
    assert_eq!(sequencer.step(), Step::Email);
    assert_eq!(sequencer.draft().full_name, "Sari Wulandari");
    assert_eq!(sequencer.advance(), Ok(Step::Participant));
}

// ─── Validator ───────────────────────────────────────────────────────────────

#[test]
fn email_needs_at_sign() {
    let mut draft = RegistrationDraft::new();
    draft.set(Field::Email, "sari.example.com").unwrap();
    assert_eq!(
        validate_step(Step::Email, &draft),
        Err(ValidationError::InvalidEmail)
    );

    draft.set(Field::Email, "a@b").unwrap();
    assert_eq!(validate_step(Step::Email, &draft), Ok(()));
}

#[test]
fn bib_name_limit_is_ten_characters() {
    let mut draft = complete_draft();

    draft.set(Field::BibName, "ABCDEFGHIJ").unwrap();
    assert_eq!(validate_step(Step::Participant, &draft), Ok(()));

    draft.set(Field::BibName, "ABCDEFGHIJK").unwrap();
    assert_eq!(
        validate_step(Step::Participant, &draft),
        Err(ValidationError::BibNameTooLong { len: 11 })
    );
}

#[test]
fn community_registration_needs_a_name() {
    let mut draft = complete_draft();
    draft.set(Field::RegistrationSource, "community").unwrap();

    let err = validate_step(Step::Participant, &draft).unwrap_err();
    assert!(matches!(err, ValidationError::SourceNameRequired { .. }));
    assert_eq!(err.title(), "Nama belum diisi");
    assert_eq!(err.focus_field(), Field::RegistrationSourceName);

    draft
        .set(Field::RegistrationSourceName, "Jakarta Runners")
        .unwrap();
    assert_eq!(validate_step(Step::Participant, &draft), Ok(()));
}

#[test]
fn questionnaire_lists_every_unanswered_item() {
    let mut draft = complete_draft();
    draft.set(Field::UnderCare, "").unwrap();
    draft.set(Field::EmergencyContact, "").unwrap();

    assert_eq!(
        validate_step(Step::Health, &draft),
        Err(ValidationError::QuestionnaireIncomplete {
            missing: vec![Field::UnderCare, Field::EmergencyContact],
        })
    );
}

// ─── Submission ──────────────────────────────────────────────────────────────

#[test]
fn student_registration_submits() {
    let mut sequencer = sequencer_at(Step::Category, complete_draft());
    sequencer.set_field(Field::Category, "student").unwrap();

    let submission = sequencer.submit().unwrap();
    assert_eq!(submission.summary.full_name, "Sari Wulandari");
    assert_eq!(submission.summary.category, Some(Category::Student));

    assert_eq!(sequencer.step(), Step::Email);
    assert_eq!(sequencer.draft(), &RegistrationDraft::new());
}

#[test]
fn submit_without_category_fails() {
    let mut sequencer = sequencer_at(Step::Category, complete_draft());
    let err = sequencer.submit().unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Invalid(ValidationError::CategoryMissing)
    ));
    assert_eq!(sequencer.step(), Step::Category);
    assert_eq!(sequencer.draft().full_name, "Sari Wulandari");
}

#[test]
fn submit_off_last_step_has_no_effect() {
    let mut draft = complete_draft();
    draft.set(Field::Category, "general").unwrap();
    let mut sequencer = sequencer_at(Step::RacePack, draft.clone());

    let err = sequencer.submit().unwrap_err();
    assert!(matches!(err, SubmitError::NotOnFinalStep(Step::RacePack)));
    assert_eq!(sequencer.step(), Step::RacePack);
    assert_eq!(sequencer.draft(), &draft);
}

// ─── Draft files ─────────────────────────────────────────────────────────────

#[test]
fn check_passes_complete_json_draft() {
    let mut draft = complete_draft();
    draft.set(Field::Category, "general").unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("sari.json");
    fs::write(&path, serde_json::to_string_pretty(&draft).unwrap()).unwrap();

    let report = check_draft(load_draft(&path).unwrap());
    assert!(report.passed());
    assert_eq!(report.steps.len(), 5);
    assert!(report.steps.iter().all(|(_, outcome)| outcome.is_ok()));
}

#[test]
fn check_stops_at_first_failing_step() {
    let mut draft = complete_draft();
    draft.set(Field::JerseySize, "").unwrap();

    let report = check_draft(draft);
    assert!(!report.passed());
    let (step, outcome) = report.steps.last().unwrap();
    assert_eq!(*step, Step::RacePack);
    assert_eq!(outcome, &Err(ValidationError::JerseySizeMissing));
}
