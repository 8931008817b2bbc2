//! Centralized keyboard shortcuts registry.
//!
//! The wizard resolves keys through [`action_for`] and renders its footer
//! from [`shortcuts_for_context`], so both always agree.

use crossterm::event::KeyCode;

/// What a key does in the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextField,
    PrevField,
    /// Next field, or advance/submit from the last one
    Confirm,
    /// Validate and go to the next step, or submit on the last
    Advance,
    Retreat,
    /// Key goes to the focused input
    Edit,
    ToggleSizeChart,
    CloseOverlay,
    NewRegistration,
    Quit,
}

/// Contexts where shortcuts are active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutContext {
    /// Filling in the form
    Form,
    /// Size chart overlay is open
    SizeChart,
    /// Registration submitted
    Completion,
}

/// A keyboard shortcut definition
#[derive(Debug, Clone)]
pub struct Shortcut {
    /// Primary key for this shortcut
    pub key: KeyCode,
    /// Alternative key (e.g., arrow key)
    pub alt_key: Option<KeyCode>,
    pub action: Action,
    /// Human-readable description of what this shortcut does
    pub description: &'static str,
    pub context: ShortcutContext,
    /// Shown in the footer hint line
    pub in_footer: bool,
}

impl Shortcut {
    /// Format key for display (e.g., "Tab", "PgDn", "Tab/↓")
    pub fn key_display(&self) -> String {
        let primary = format_keycode(&self.key);
        match &self.alt_key {
            Some(alt) => format!("{}/{}", primary, format_keycode(alt)),
            None => primary,
        }
    }

    pub fn matches(&self, key: KeyCode) -> bool {
        self.key == key || self.alt_key == Some(key)
    }
}

/// Format a KeyCode for display
fn format_keycode(key: &KeyCode) -> String {
    match key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

/// All shortcuts, in footer order per context
pub static SHORTCUTS: &[Shortcut] = &[
    // Form
    Shortcut {
        key: KeyCode::Tab,
        alt_key: Some(KeyCode::Down),
        action: Action::NextField,
        description: "Next field",
        context: ShortcutContext::Form,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::BackTab,
        alt_key: Some(KeyCode::Up),
        action: Action::PrevField,
        description: "Previous field",
        context: ShortcutContext::Form,
        in_footer: false,
    },
    Shortcut {
        key: KeyCode::Left,
        alt_key: Some(KeyCode::Right),
        action: Action::Edit,
        description: "Choose",
        context: ShortcutContext::Form,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Char(' '),
        alt_key: None,
        action: Action::Edit,
        description: "Cycle choice",
        context: ShortcutContext::Form,
        in_footer: false,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        action: Action::Confirm,
        description: "Next field / continue",
        context: ShortcutContext::Form,
        in_footer: false,
    },
    Shortcut {
        key: KeyCode::PageDown,
        alt_key: None,
        action: Action::Advance,
        description: "Selanjutnya",
        context: ShortcutContext::Form,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::PageUp,
        alt_key: Some(KeyCode::Esc),
        action: Action::Retreat,
        description: "Kembali",
        context: ShortcutContext::Form,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::F(2),
        alt_key: None,
        action: Action::ToggleSizeChart,
        description: "Panduan Ukuran",
        context: ShortcutContext::Form,
        in_footer: false,
    },
    // Size chart overlay
    Shortcut {
        key: KeyCode::Esc,
        alt_key: Some(KeyCode::F(2)),
        action: Action::CloseOverlay,
        description: "Close",
        context: ShortcutContext::SizeChart,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        action: Action::CloseOverlay,
        description: "Close",
        context: ShortcutContext::SizeChart,
        in_footer: false,
    },
    // Completion overlay
    Shortcut {
        key: KeyCode::Enter,
        alt_key: None,
        action: Action::NewRegistration,
        description: "Daftar lagi",
        context: ShortcutContext::Completion,
        in_footer: true,
    },
    Shortcut {
        key: KeyCode::Esc,
        alt_key: Some(KeyCode::Char('q')),
        action: Action::Quit,
        description: "Keluar",
        context: ShortcutContext::Completion,
        in_footer: true,
    },
];

pub fn shortcuts_for_context(context: ShortcutContext) -> impl Iterator<Item = &'static Shortcut> {
    SHORTCUTS.iter().filter(move |s| s.context == context)
}

/// Resolve a key press in `context`
pub fn action_for(context: ShortcutContext, key: KeyCode) -> Option<Action> {
    shortcuts_for_context(context)
        .find(|s| s.matches(key))
        .map(|s| s.action)
}

/// `key description` pairs joined for the footer line
pub fn footer_hint(context: ShortcutContext) -> String {
    shortcuts_for_context(context)
        .filter(|s| s.in_footer)
        .map(|s| format!("{} {}", s.key_display(), s.description))
        .collect::<Vec<_>>()
        .join("  ·  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_duplicate_keys_within_context() {
        for context in [
            ShortcutContext::Form,
            ShortcutContext::SizeChart,
            ShortcutContext::Completion,
        ] {
            let mut seen = HashSet::new();
            for shortcut in shortcuts_for_context(context) {
                for key in std::iter::once(shortcut.key).chain(shortcut.alt_key) {
                    assert!(seen.insert(key), "{key:?} bound twice in {context:?}");
                }
            }
        }
    }

    #[test]
    fn test_action_lookup() {
        assert_eq!(
            action_for(ShortcutContext::Form, KeyCode::Down),
            Some(Action::NextField)
        );
        assert_eq!(
            action_for(ShortcutContext::Form, KeyCode::Esc),
            Some(Action::Retreat)
        );
        assert_eq!(
            action_for(ShortcutContext::Completion, KeyCode::Esc),
            Some(Action::Quit)
        );
        assert_eq!(action_for(ShortcutContext::Form, KeyCode::Char('x')), None);
    }

    #[test]
    fn test_key_display() {
        let shortcut = SHORTCUTS
            .iter()
            .find(|s| s.action == Action::Retreat)
            .unwrap();
        assert_eq!(shortcut.key_display(), "PgUp/Esc");
    }

    #[test]
    fn test_footer_hint_lists_footer_shortcuts_only() {
        let hint = footer_hint(ShortcutContext::Form);
        assert!(hint.contains("PgDn Selanjutnya"));
        assert!(hint.contains("PgUp/Esc Kembali"));
        assert!(!hint.contains("Previous field"));
    }
}
