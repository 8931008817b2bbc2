//! Registration wizard screen: one step of the form at a time

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::registration::{
    Category, Choice, Field, RegisteringFor, RegistrationDraft, Step, StepSequencer, SubmitError,
    ValidationError,
};
use crate::ui::dialogs::{CompletionDialog, SizeChartDialog};
use crate::ui::form_field::FormField;
use crate::ui::keybindings::{action_for, Action, ShortcutContext};
use crate::ui::toast::{Toast, ToastKind};

mod render;


/// What the app loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardResult {
    Continue,
    Quit,
}

/// A draft field and the widget editing it
pub(crate) struct FormRow {
    pub field: Field,
    pub widget: FormField,
}

pub struct WizardScreen {
    sequencer: StepSequencer,
    /// Widgets for every field of the current step, visible or not
    pub(crate) rows: Vec<FormRow>,
    pub(crate) focused: Field,
    pub(crate) toast: Option<Toast>,
    toast_ttl: Duration,
    pub(crate) size_chart: SizeChartDialog,
    pub(crate) completion: CompletionDialog,
    pub(crate) event_name: String,
    pub(crate) tagline: String,
}

impl WizardScreen {
    pub fn new(config: &Config, size_chart: Option<String>) -> Self {
        let mut screen = Self {
            sequencer: StepSequencer::new(),
            rows: Vec::new(),
            focused: Field::Email,
            toast: None,
            toast_ttl: Duration::from_millis(config.ui.toast_duration_ms),
            size_chart: SizeChartDialog::new(size_chart),
            completion: CompletionDialog::new(),
            event_name: config.event.name.clone(),
            tagline: config.event.tagline.clone(),
        };
        screen.load_step();
        screen
    }

    pub fn step(&self) -> Step {
        self.sequencer.step()
    }

    pub fn draft(&self) -> &RegistrationDraft {
        self.sequencer.draft()
    }

    pub fn focused_field(&self) -> Field {
        self.focused
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_visible()
    }

    /// Whether a field is rendered given the current answers.
    ///
    /// The group name input only appears for non-personal sources.
    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::RegistrationSourceName => self.draft().source_name_applies(),
            _ => true,
        }
    }

    /// Fields of the current step that are on screen, in order
    pub fn visible_fields(&self) -> Vec<Field> {
        self.rows
            .iter()
            .map(|row| row.field)
            .filter(|field| self.is_visible(*field))
            .collect()
    }

    /// Rebuild the widgets for the current step from the draft
    fn load_step(&mut self) {
        let step = self.sequencer.step();
        let draft = self.sequencer.draft();
        self.rows = step
            .fields()
            .iter()
            .map(|&field| FormRow {
                field,
                widget: FormField::for_field(field, &draft.value(field)),
            })
            .collect();

        for category in Category::ALL {
            let label = format!("{} ({})", category.label(), category.description());
            if let Some(row) = self.row_mut(Field::Category) {
                row.widget.relabel_option(category.key(), label);
            }
        }
        self.refresh_registrant_label();

        self.focused = step.fields()[0];
        tracing::debug!(step = step.number(), "Loaded step");
    }

    fn row_mut(&mut self, field: Field) -> Option<&mut FormRow> {
        self.rows.iter_mut().find(|row| row.field == field)
    }

    /// "Diri sendiri" shows the email being registered
    fn refresh_registrant_label(&mut self) {
        let email = self.sequencer.draft().email.clone();
        let shown = if email.is_empty() {
            "email".to_string()
        } else {
            email
        };
        let myself = RegisteringFor::Myself;
        if let Some(row) = self.row_mut(Field::RegisteringFor) {
            row.widget
                .relabel_option(myself.key(), format!("{} ({})", myself.label(), shown));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> WizardResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return WizardResult::Quit;
        }

        if self.completion.is_visible() {
            match action_for(ShortcutContext::Completion, key.code) {
                Some(Action::NewRegistration) => {
                    self.completion.hide();
                    self.toast = None;
                    self.load_step();
                }
                Some(Action::Quit) => return WizardResult::Quit,
                _ => {}
            }
            return WizardResult::Continue;
        }

        if self.size_chart.visible {
            if action_for(ShortcutContext::SizeChart, key.code) == Some(Action::CloseOverlay) {
                self.size_chart.toggle();
            }
            return WizardResult::Continue;
        }

        let action = action_for(ShortcutContext::Form, key.code);
        let focused_multiline = self
            .rows
            .iter()
            .find(|row| row.field == self.focused)
            .is_some_and(|row| row.widget.is_multiline());

        // The address box keeps Enter and arrows for itself
        let action = match action {
            Some(Action::NextField | Action::PrevField | Action::Confirm | Action::Edit)
                if focused_multiline && !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) =>
            {
                Some(Action::Edit)
            }
            other => other,
        };

        match action {
            Some(Action::NextField) => self.focus_next(),
            Some(Action::PrevField) => self.focus_prev(),
            Some(Action::Confirm) => {
                if self.visible_fields().last() == Some(&self.focused) {
                    self.advance();
                } else {
                    self.focus_next();
                }
            }
            Some(Action::Advance) => self.advance(),
            Some(Action::Retreat) => self.retreat(),
            Some(Action::ToggleSizeChart) => {
                if self.step() == Step::RacePack {
                    self.size_chart.toggle();
                }
            }
            Some(Action::Edit) | None => self.edit_focused(key),
            Some(Action::CloseOverlay | Action::NewRegistration | Action::Quit) => {}
        }
        WizardResult::Continue
    }

    /// Expire the toast; called on every tick of the app loop
    pub fn tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
        }
    }

    fn edit_focused(&mut self, key: KeyEvent) {
        let field = self.focused;
        let Some(row) = self.row_mut(field) else {
            return;
        };
        if !row.widget.handle_key(key) {
            return;
        }
        let value = row.widget.value();
        if let Err(err) = self.sequencer.set_field(field, &value) {
            tracing::warn!(error = %err, "Rejected field value");
            return;
        }
        if field == Field::Email {
            self.refresh_registrant_label();
        }
    }

    fn focus_next(&mut self) {
        let visible = self.visible_fields();
        if let Some(i) = visible.iter().position(|f| *f == self.focused) {
            if let Some(next) = visible.get(i + 1) {
                self.focused = *next;
            }
        }
    }

    fn focus_prev(&mut self) {
        let visible = self.visible_fields();
        if let Some(i) = visible.iter().position(|f| *f == self.focused) {
            if i > 0 {
                self.focused = visible[i - 1];
            }
        }
    }

    fn advance(&mut self) {
        if self.step().is_last() {
            self.submit();
            return;
        }
        match self.sequencer.advance() {
            Ok(_) => {
                self.toast = None;
                self.load_step();
            }
            Err(err) => self.show_validation_error(&err),
        }
    }

    fn retreat(&mut self) {
        if self.step().is_first() {
            return;
        }
        self.sequencer.retreat();
        self.load_step();
    }

    fn submit(&mut self) {
        match self.sequencer.submit() {
            Ok(submission) => {
                self.toast = Some(Toast::new(
                    ToastKind::Success,
                    "Pendaftaran Berhasil!",
                    "Terima kasih telah mendaftar. Kami akan mengirimkan konfirmasi ke email Anda.",
                    self.toast_ttl,
                ));
                self.completion.show(submission);
                self.load_step();
            }
            Err(SubmitError::Invalid(err)) => self.show_validation_error(&err),
            Err(err) => tracing::warn!(error = %err, "Submit rejected"),
        }
    }

    fn show_validation_error(&mut self, err: &ValidationError) {
        self.toast = Some(Toast::from_validation(err, self.toast_ttl));
        let target = err.focus_field();
        if self.visible_fields().contains(&target) {
            self.focused = target;
        }
    }
}
