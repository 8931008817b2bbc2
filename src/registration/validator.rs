//! Per-step field validation

use thiserror::Error;

use super::draft::{Field, RegistrationDraft, RegistrationSource};
use super::step::Step;

/// Longest name printed on a race bib
pub const BIB_NAME_MAX_LEN: usize = 10;

/// Required on the participant step, checked before the source name and bib length
const PARTICIPANT_REQUIRED: [Field; 8] = [
    Field::FullName,
    Field::BirthDate,
    Field::Gender,
    Field::Address,
    Field::IdNumber,
    Field::BibName,
    Field::RegistrationSource,
    Field::InfoSource,
];

const HEALTH_REQUIRED: [Field; 6] = [
    Field::BloodType,
    Field::ChronicDisease,
    Field::UnderCare,
    Field::Medication,
    Field::Complications,
    Field::EmergencyContact,
];

/// Why a step cannot be left yet. Every variant is user-correctable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("email must be non-empty and contain '@'")]
    InvalidEmail,

    #[error("participant info incomplete: {} missing", join_keys(.missing))]
    ParticipantIncomplete { missing: Vec<Field> },

    #[error("name required for {registered_from} registration")]
    SourceNameRequired { registered_from: RegistrationSource },

    /// `len` counts UTF-16 code units
    #[error("bib name is {len} characters, at most {max} allowed", max = BIB_NAME_MAX_LEN)]
    BibNameTooLong { len: usize },

    #[error("health questionnaire incomplete: {} missing", join_keys(.missing))]
    QuestionnaireIncomplete { missing: Vec<Field> },

    #[error("jersey size not selected")]
    JerseySizeMissing,

    #[error("category not selected")]
    CategoryMissing,
}

fn join_keys(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::key)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Notification heading shown to the participant
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => "Email tidak valid",
            ValidationError::ParticipantIncomplete { .. } => "Data belum lengkap",
            ValidationError::SourceNameRequired { .. } => "Nama belum diisi",
            ValidationError::BibNameTooLong { .. } => "Nama BIB terlalu panjang",
            ValidationError::QuestionnaireIncomplete { .. } => "Kuesioner belum lengkap",
            ValidationError::JerseySizeMissing => "Ukuran jersey belum dipilih",
            ValidationError::CategoryMissing => "Kategori belum dipilih",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail => "Mohon masukkan alamat email yang valid",
            ValidationError::ParticipantIncomplete { .. } => {
                "Mohon lengkapi semua informasi peserta"
            }
            ValidationError::SourceNameRequired { .. } => {
                "Mohon isi nama komunitas/perusahaan/organisasi"
            }
            ValidationError::BibNameTooLong { .. } => "Maksimal 10 karakter",
            ValidationError::QuestionnaireIncomplete { .. } => {
                "Mohon lengkapi semua pertanyaan kuesioner"
            }
            ValidationError::JerseySizeMissing => "Mohon pilih ukuran jersey Anda",
            ValidationError::CategoryMissing => "Mohon pilih kategori pendaftar",
        }
    }

    /// First field the participant has to fix
    pub fn focus_field(&self) -> Field {
        match self {
            ValidationError::InvalidEmail => Field::Email,
            ValidationError::ParticipantIncomplete { missing } => {
                missing.first().copied().unwrap_or(Field::FullName)
            }
            ValidationError::SourceNameRequired { .. } => Field::RegistrationSourceName,
            ValidationError::BibNameTooLong { .. } => Field::BibName,
            ValidationError::QuestionnaireIncomplete { missing } => {
                missing.first().copied().unwrap_or(Field::BloodType)
            }
            ValidationError::JerseySizeMissing => Field::JerseySize,
            ValidationError::CategoryMissing => Field::Category,
        }
    }
}

fn missing_fields(draft: &RegistrationDraft, required: &[Field]) -> Vec<Field> {
    required
        .iter()
        .copied()
        .filter(|field| !draft.is_filled(*field))
        .collect()
}

/// Check whether `step` may be left with the answers in `draft`.
///
/// Only the rules of `step` itself are applied; earlier steps are not re-checked.
pub fn validate_step(step: Step, draft: &RegistrationDraft) -> Result<(), ValidationError> {
    match step {
        Step::Email => {
            if !draft.is_filled(Field::Email) || !draft.email.contains('@') {
                return Err(ValidationError::InvalidEmail);
            }
        }
        Step::Participant => {
            let missing = missing_fields(draft, &PARTICIPANT_REQUIRED);
            if !missing.is_empty() {
                return Err(ValidationError::ParticipantIncomplete { missing });
            }
            if let Some(source) = draft.registration_source {
                if source.needs_name() && !draft.is_filled(Field::RegistrationSourceName) {
                    return Err(ValidationError::SourceNameRequired {
                        registered_from: source,
                    });
                }
            }
            let len = draft.bib_name.encode_utf16().count();
            if len > BIB_NAME_MAX_LEN {
                return Err(ValidationError::BibNameTooLong { len });
            }
        }
        Step::Health => {
            let missing = missing_fields(draft, &HEALTH_REQUIRED);
            if !missing.is_empty() {
                return Err(ValidationError::QuestionnaireIncomplete { missing });
            }
        }
        Step::RacePack => {
            if draft.jersey_size.is_none() {
                return Err(ValidationError::JerseySizeMissing);
            }
        }
        Step::Category => {
            if draft.category.is_none() {
                return Err(ValidationError::CategoryMissing);
            }
        }
    }
    Ok(())
}

/// Fields that must be filled to leave `step`, ignoring conditional ones
pub fn required_fields(step: Step) -> &'static [Field] {
    match step {
        Step::Email => &[Field::Email],
        Step::Participant => &PARTICIPANT_REQUIRED,
        Step::Health => &HEALTH_REQUIRED,
        Step::RacePack => &[Field::JerseySize],
        Step::Category => &[Field::Category],
    }
}
