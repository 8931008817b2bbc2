//! The in-progress registration record and the answer sets it draws from.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use super::validator::BIB_NAME_MAX_LEN;

/// A closed set of answers offered as a radio group.
///
/// `key()` is the stable machine value (also the serde name); `label()` is
/// what the participant sees.
pub trait Choice: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn key(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => ($key:literal, $label:literal)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn key(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

choice_enum! {
    /// Whether the participant is the person filling in the form
    RegisteringFor {
        Myself => ("self", "Diri sendiri"),
        Other => ("other", "Orang lain"),
    }
}

impl Default for RegisteringFor {
    fn default() -> Self {
        Self::Myself
    }
}

choice_enum! {
    Gender {
        Male => ("male", "Pria"),
        Female => ("female", "Wanita"),
    }
}

choice_enum! {
    /// Where the participant registers from. Anything but `Personal`
    /// needs the group's name.
    RegistrationSource {
        Community => ("community", "Komunitas"),
        Company => ("company", "Perusahaan"),
        Organization => ("organization", "Organisasi"),
        Personal => ("personal", "Personal"),
    }
}

impl RegistrationSource {
    pub fn needs_name(&self) -> bool {
        !matches!(self, RegistrationSource::Personal)
    }
}

choice_enum! {
    /// How the participant heard about the event
    InfoSource {
        Friend => ("friend", "Teman"),
        Social => ("social", "Sosial Media"),
        Print => ("print", "Media Cetak"),
    }
}

choice_enum! {
    BloodType {
        A => ("A", "A"),
        B => ("B", "B"),
        O => ("O", "O"),
        AB => ("AB", "AB"),
    }
}

choice_enum! {
    /// Answer to a health questionnaire item
    YesNo {
        Yes => ("yes", "Ya"),
        No => ("no", "Tidak"),
    }
}

choice_enum! {
    JerseySize {
        S => ("S", "S"),
        M => ("M", "M"),
        L => ("L", "L"),
        XL => ("XL", "XL"),
        XXL => ("XXL", "XXL"),
        XXXL => ("XXXL", "XXXL"),
    }
}

choice_enum! {
    Category {
        Student => ("student", "Pelajar"),
        General => ("general", "Umum"),
    }
}

impl Category {
    pub fn description(&self) -> &'static str {
        match self {
            Category::Student => "Untuk pelajar dan mahasiswa",
            Category::General => "Untuk peserta umum",
        }
    }
}

/// How a field is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    MultiLine,
    /// `YYYY-MM-DD`
    Date,
    /// One of a fixed set of answers
    Choice,
}

/// Every attribute of a [`RegistrationDraft`], in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Email,
    RegisteringFor,
    FullName,
    BirthDate,
    Gender,
    Address,
    IdNumber,
    BibName,
    RegistrationSource,
    RegistrationSourceName,
    InfoSource,
    BloodType,
    ChronicDisease,
    UnderCare,
    Medication,
    Complications,
    EmergencyContact,
    JerseySize,
    Category,
}

fn options_of<C: Choice>() -> Vec<(&'static str, &'static str)> {
    C::ALL.iter().map(|c| (c.key(), c.label())).collect()
}

impl Field {
    pub const ALL: [Field; 19] = [
        Field::Email,
        Field::RegisteringFor,
        Field::FullName,
        Field::BirthDate,
        Field::Gender,
        Field::Address,
        Field::IdNumber,
        Field::BibName,
        Field::RegistrationSource,
        Field::RegistrationSourceName,
        Field::InfoSource,
        Field::BloodType,
        Field::ChronicDisease,
        Field::UnderCare,
        Field::Medication,
        Field::Complications,
        Field::EmergencyContact,
        Field::JerseySize,
        Field::Category,
    ];

    /// Machine name, matching the serialized draft key
    pub fn key(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::RegisteringFor => "registering_for",
            Field::FullName => "full_name",
            Field::BirthDate => "birth_date",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::IdNumber => "id_number",
            Field::BibName => "bib_name",
            Field::RegistrationSource => "registration_source",
            Field::RegistrationSourceName => "registration_source_name",
            Field::InfoSource => "info_source",
            Field::BloodType => "blood_type",
            Field::ChronicDisease => "chronic_disease",
            Field::UnderCare => "under_care",
            Field::Medication => "medication",
            Field::Complications => "complications",
            Field::EmergencyContact => "emergency_contact",
            Field::JerseySize => "jersey_size",
            Field::Category => "category",
        }
    }

    /// Form label shown above the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::RegisteringFor => "Mendaftar untuk",
            Field::FullName => "Nama Lengkap",
            Field::BirthDate => "Tanggal Lahir",
            Field::Gender => "Jenis Kelamin",
            Field::Address => "Alamat Saat Ini",
            Field::IdNumber => "No KTP",
            Field::BibName => "Nama di BIB Number",
            Field::RegistrationSource => "Terdaftar dari",
            Field::RegistrationSourceName => "Nama komunitas/perusahaan/organisasi",
            Field::InfoSource => "Mengetahui informasi pendaftaran dari",
            Field::BloodType => "Golongan Darah",
            Field::ChronicDisease => {
                "Apakah Anda memiliki penyakit kronis / kondisi medis lainnya?"
            }
            Field::UnderCare => "Apakah saat ini Anda sedang berada di bawah perawatan dokter?",
            Field::Medication => "Apakah Anda diharuskan minum obat untuk penyakit tersebut?",
            Field::Complications => {
                "Apakah Anda pernah mengalami kejadian buruk atau komplikasi yang terkait \
                 dengan penyakit Anda selama berkegiatan fisik?"
            }
            Field::EmergencyContact => "Nomor Telepon Kontak Darurat",
            Field::JerseySize => "Pilih Ukuran",
            Field::Category => "Kategori Pendaftar",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Email
            | Field::FullName
            | Field::IdNumber
            | Field::BibName
            | Field::RegistrationSourceName
            | Field::EmergencyContact => FieldKind::Text,
            Field::Address => FieldKind::MultiLine,
            Field::BirthDate => FieldKind::Date,
            Field::RegisteringFor
            | Field::Gender
            | Field::RegistrationSource
            | Field::InfoSource
            | Field::BloodType
            | Field::ChronicDisease
            | Field::UnderCare
            | Field::Medication
            | Field::Complications
            | Field::JerseySize
            | Field::Category => FieldKind::Choice,
        }
    }

    /// `(key, label)` pairs for choice fields, empty otherwise
    pub fn options(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Field::RegisteringFor => options_of::<RegisteringFor>(),
            Field::Gender => options_of::<Gender>(),
            Field::RegistrationSource => options_of::<RegistrationSource>(),
            Field::InfoSource => options_of::<InfoSource>(),
            Field::BloodType => options_of::<BloodType>(),
            Field::ChronicDisease | Field::UnderCare | Field::Medication | Field::Complications => {
                options_of::<YesNo>()
            }
            Field::JerseySize => options_of::<JerseySize>(),
            Field::Category => options_of::<Category>(),
            _ => Vec::new(),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Field::Email => Some("nama@email.com"),
            Field::BirthDate => Some("YYYY-MM-DD"),
            Field::RegistrationSourceName => Some("Nama"),
            Field::EmergencyContact => Some("+62"),
            _ => None,
        }
    }

    /// Input cap enforced while typing
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Field::BibName => Some(BIB_NAME_MAX_LEN),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("'{value}' is not a valid answer for {field}")]
    InvalidChoice { field: Field, value: String },
}

fn parse_choice<C: Choice>(field: Field, value: &str) -> Result<Option<C>, DraftError> {
    if value.is_empty() {
        return Ok(None);
    }
    C::from_key(value)
        .map(Some)
        .ok_or_else(|| DraftError::InvalidChoice {
            field,
            value: value.to_string(),
        })
}

/// Reads a choice from its key. `""` and `null` mean unanswered, as in `set`.
fn deserialize_choice<'de, D, C>(deserializer: D) -> Result<Option<C>, D::Error>
where
    D: Deserializer<'de>,
    C: Choice,
{
    let key: Option<String> = Option::deserialize(deserializer)?;
    match key.as_deref() {
        None | Some("") => Ok(None),
        Some(key) => C::from_key(key).map(Some).ok_or_else(|| {
            let expected: Vec<&str> = C::ALL.iter().map(Choice::key).collect();
            de::Error::custom(format!(
                "unknown answer `{key}`, expected one of: {}",
                expected.join(", ")
            ))
        }),
    }
}

fn deserialize_registrant<'de, D>(deserializer: D) -> Result<RegisteringFor, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_choice(deserializer)?.unwrap_or_default())
}

fn choice_key<C: Choice>(choice: Option<C>) -> String {
    choice.map(|c| c.key().to_string()).unwrap_or_default()
}

/// Registration answers collected so far. Everything starts empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationDraft {
    pub email: String,
    #[serde(deserialize_with = "deserialize_registrant")]
    pub registering_for: RegisteringFor,
    pub full_name: String,
    pub birth_date: String,
    #[serde(deserialize_with = "deserialize_choice")]
    pub gender: Option<Gender>,
    pub address: String,
    pub id_number: String,
    pub bib_name: String,
    #[serde(deserialize_with = "deserialize_choice")]
    pub registration_source: Option<RegistrationSource>,
    pub registration_source_name: String,
    #[serde(deserialize_with = "deserialize_choice")]
    pub info_source: Option<InfoSource>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub blood_type: Option<BloodType>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub chronic_disease: Option<YesNo>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub under_care: Option<YesNo>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub medication: Option<YesNo>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub complications: Option<YesNo>,
    pub emergency_contact: String,
    #[serde(deserialize_with = "deserialize_choice")]
    pub jersey_size: Option<JerseySize>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub category: Option<Category>,
}

impl RegistrationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a field from its string form. An empty string clears it.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), DraftError> {
        match field {
            Field::Email => self.email = value.to_string(),
            Field::RegisteringFor => {
                self.registering_for = parse_choice(field, value)?.unwrap_or_default();
            }
            Field::FullName => self.full_name = value.to_string(),
            Field::BirthDate => self.birth_date = value.to_string(),
            Field::Gender => self.gender = parse_choice(field, value)?,
            Field::Address => self.address = value.to_string(),
            Field::IdNumber => self.id_number = value.to_string(),
            Field::BibName => self.bib_name = value.to_string(),
            Field::RegistrationSource => self.registration_source = parse_choice(field, value)?,
            Field::RegistrationSourceName => self.registration_source_name = value.to_string(),
            Field::InfoSource => self.info_source = parse_choice(field, value)?,
            Field::BloodType => self.blood_type = parse_choice(field, value)?,
            Field::ChronicDisease => self.chronic_disease = parse_choice(field, value)?,
            Field::UnderCare => self.under_care = parse_choice(field, value)?,
            Field::Medication => self.medication = parse_choice(field, value)?,
            Field::Complications => self.complications = parse_choice(field, value)?,
            Field::EmergencyContact => self.emergency_contact = value.to_string(),
            Field::JerseySize => self.jersey_size = parse_choice(field, value)?,
            Field::Category => self.category = parse_choice(field, value)?,
        }
        Ok(())
    }

    /// String form of a field: the text, or the choice key (empty if unset)
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Email => self.email.clone(),
            Field::RegisteringFor => self.registering_for.key().to_string(),
            Field::FullName => self.full_name.clone(),
            Field::BirthDate => self.birth_date.clone(),
            Field::Gender => choice_key(self.gender),
            Field::Address => self.address.clone(),
            Field::IdNumber => self.id_number.clone(),
            Field::BibName => self.bib_name.clone(),
            Field::RegistrationSource => choice_key(self.registration_source),
            Field::RegistrationSourceName => self.registration_source_name.clone(),
            Field::InfoSource => choice_key(self.info_source),
            Field::BloodType => choice_key(self.blood_type),
            Field::ChronicDisease => choice_key(self.chronic_disease),
            Field::UnderCare => choice_key(self.under_care),
            Field::Medication => choice_key(self.medication),
            Field::Complications => choice_key(self.complications),
            Field::EmergencyContact => self.emergency_contact.clone(),
            Field::JerseySize => choice_key(self.jersey_size),
            Field::Category => choice_key(self.category),
        }
    }

    /// Whether a field holds an answer. Any non-empty text counts, spaces included.
    pub fn is_filled(&self, field: Field) -> bool {
        !self.value(field).is_empty()
    }

    /// Whether the registration-source name input applies to this draft
    pub fn source_name_applies(&self) -> bool {
        self.registration_source
            .is_some_and(|source| source.needs_name())
    }

    pub fn summary(&self) -> RegistrationSummary {
        RegistrationSummary {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            jersey_size: self.jersey_size,
            category: self.category,
        }
    }
}

/// What the final step shows back to the participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationSummary {
    pub full_name: String,
    pub email: String,
    #[serde(deserialize_with = "deserialize_choice")]
    pub jersey_size: Option<JerseySize>,
    #[serde(deserialize_with = "deserialize_choice")]
    pub category: Option<Category>,
}

impl RegistrationSummary {
    /// `(label, value)` rows in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nama", self.full_name.clone()),
            ("Email", self.email.clone()),
            (
                "Ukuran Jersey",
                self.jersey_size
                    .map(|s| s.label().to_string())
                    .unwrap_or_default(),
            ),
            (
                "Kategori",
                self.category
                    .map(|c| c.label().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}
