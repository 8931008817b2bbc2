//! Headless run of a saved draft through every step

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::registration::{
    validate_step, RegistrationDraft, Step, StepSequencer, Submission, ValidationError,
};

/// Outcome of running a draft through the wizard without a terminal
#[derive(Debug)]
pub struct CheckReport {
    /// Steps reached, in order; only the last can have failed
    pub steps: Vec<(Step, Result<(), ValidationError>)>,
    pub submission: Option<Submission>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.submission.is_some()
    }
}

/// Read a draft from a `.json` or `.toml` file
pub fn load_draft(path: &Path) -> Result<RegistrationDraft> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON draft {}", path.display())),
        Some("toml") => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML draft {}", path.display())),
        _ => bail!(
            "Unsupported draft format {}: expected .json or .toml",
            path.display()
        ),
    }
}

/// Validate each step in turn and submit if all pass. Stops at the first failure.
pub fn check_draft(draft: RegistrationDraft) -> CheckReport {
    let mut sequencer = StepSequencer::with_draft(draft);
    let mut steps = Vec::new();

    loop {
        let step = sequencer.step();
        let outcome = validate_step(step, sequencer.draft());
        let failed = outcome.is_err();
        steps.push((step, outcome));
        if failed {
            return CheckReport {
                steps,
                submission: None,
            };
        }

        if step.is_last() {
            let submission = sequencer.submit().ok();
            return CheckReport { steps, submission };
        }
        if sequencer.advance().is_err() {
            return CheckReport {
                steps,
                submission: None,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::RegisteringFor;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_draft_stops_at_email() {
        let report = check_draft(RegistrationDraft::new());
        assert!(!report.passed());
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].0, Step::Email);
        assert_eq!(report.steps[0].1, Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_load_json_draft() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.json");
        fs::write(
            &path,
            r#"{ "email": "a@b", "gender": "female", "jersey_size": "XL" }"#,
        )
        .unwrap();

        let draft = load_draft(&path).unwrap();
        assert_eq!(draft.email, "a@b");
        assert_eq!(draft.jersey_size.map(|s| s.to_string()), Some("XL".into()));
        assert!(draft.full_name.is_empty());
    }

    #[test]
    fn test_load_toml_draft() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.toml");
        fs::write(&path, "email = \"a@b\"\ncategory = \"student\"\n").unwrap();

        let draft = load_draft(&path).unwrap();
        assert_eq!(draft.email, "a@b");
        assert!(draft.category.is_some());
    }

    #[test]
    fn test_empty_choice_keys_load_as_unanswered() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.json");
        fs::write(
            &path,
            r#"{ "email": "a@b", "gender": "", "category": "", "blood_type": null, "registering_for": "" }"#,
        )
        .unwrap();

        let draft = load_draft(&path).unwrap();
        assert_eq!(draft.email, "a@b");
        assert_eq!(draft.gender, None);
        assert_eq!(draft.category, None);
        assert_eq!(draft.blood_type, None);
        assert_eq!(draft.registering_for, RegisteringFor::Myself);

        let report = check_draft(draft);
        assert_eq!(report.steps.last().unwrap().0, Step::Participant);
    }

    #[test]
    fn test_empty_choice_keys_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.toml");
        fs::write(&path, "email = \"a@b\"\njersey_size = \"\"\n").unwrap();

        let draft = load_draft(&path).unwrap();
        assert_eq!(draft.jersey_size, None);
    }

    #[test]
    fn test_unknown_choice_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.json");
        fs::write(&path, r#"{ "jersey_size": "XS" }"#).unwrap();
        assert!(load_draft(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("draft.yaml");
        fs::write(&path, "email: a@b").unwrap();
        let err = load_draft(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported draft format"));
    }
}
