//! The five screens of the registration form

use std::fmt;

use super::draft::Field;

/// Number of steps in the form
pub const STEP_COUNT: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Step {
    /// Email and who is registering
    #[default]
    Email = 1,
    /// Participant identity
    Participant = 2,
    /// Health questionnaire
    Health = 3,
    /// Jersey size
    RacePack = 4,
    /// Category and summary
    Category = 5,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Email,
        Step::Participant,
        Step::Health,
        Step::RacePack,
        Step::Category,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Step::Email),
            2 => Some(Step::Participant),
            3 => Some(Step::Health),
            4 => Some(Step::RacePack),
            5 => Some(Step::Category),
            _ => None,
        }
    }

    /// The following step, saturating at the last one
    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(Step::Category)
    }

    /// The preceding step, saturating at the first one
    pub fn prev(self) -> Self {
        self.number()
            .checked_sub(1)
            .and_then(Self::from_number)
            .unwrap_or(Step::Email)
    }

    pub fn is_first(self) -> bool {
        self == Step::Email
    }

    pub fn is_last(self) -> bool {
        self == Step::Category
    }

    /// Short label for the progress indicator
    pub fn label(self) -> &'static str {
        match self {
            Step::Email => "Email",
            Step::Participant => "Informasi",
            Step::Health => "Kuesioner",
            Step::RacePack => "Race Pack",
            Step::Category => "Pembayaran",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Email => "Masukkan Email",
            Step::Participant => "Informasi Peserta",
            Step::Health => "Kuesioner Kesehatan",
            Step::RacePack => "Race Pack",
            Step::Category => "Pembayaran Pendaftaran",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Step::Email => "Mulai pendaftaran Anda dengan email",
            Step::Participant => "Lengkapi data diri Anda",
            Step::Health => "Informasi penting untuk keamanan Anda",
            Step::RacePack => "Pilih ukuran jersey Anda",
            Step::Category => "Pilih kategori pendaftar",
        }
    }

    /// Fields rendered on this step, in order.
    ///
    /// This is the view's list; what must be filled is decided by the validator.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Email => &[Field::Email, Field::RegisteringFor],
            Step::Participant => &[
                Field::FullName,
                Field::BirthDate,
                Field::Gender,
                Field::Address,
                Field::IdNumber,
                Field::BibName,
                Field::RegistrationSource,
                Field::RegistrationSourceName,
                Field::InfoSource,
            ],
            Step::Health => &[
                Field::BloodType,
                Field::ChronicDisease,
                Field::UnderCare,
                Field::Medication,
                Field::Complications,
                Field::EmergencyContact,
            ],
            Step::RacePack => &[Field::JerseySize],
            Step::Category => &[Field::Category],
        }
    }

    /// Completion shown by the progress bar, `number / 5` as a percentage
    pub fn progress_percent(self) -> u16 {
        u16::from(self.number()) * 100 / u16::from(STEP_COUNT)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
