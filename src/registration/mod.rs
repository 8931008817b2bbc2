//! Registration form core: the draft, its steps, and the rules for moving between them.

pub mod draft;
pub mod sequencer;
pub mod step;
pub mod validator;

pub use draft::{
    BloodType, Category, Choice, DraftError, Field, FieldKind, Gender, InfoSource, JerseySize,
    RegisteringFor, RegistrationDraft, RegistrationSource, RegistrationSummary, YesNo,
};
pub use sequencer::{StepSequencer, SubmitError, Submission};
pub use step::{Step, STEP_COUNT};
pub use validator::{required_fields, validate_step, ValidationError, BIB_NAME_MAX_LEN};
