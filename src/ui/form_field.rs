//! Input widgets bound to registration draft fields

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::registration::{Field, FieldKind};

/// Longest accepted `YYYY-MM-DD` input
const DATE_LEN: usize = 10;

/// Byte offset of the `cursor`-th character
fn byte_index(value: &str, cursor: usize) -> usize {
    value
        .char_indices()
        .nth(cursor)
        .map_or(value.len(), |(i, _)| i)
}

/// An input widget. Cursor positions count characters, not bytes.
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        max_length: Option<usize>,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
    },
    /// Radio group; nothing is selected until the participant picks
    Choice {
        options: Vec<(&'static str, String)>,
        selected: Option<usize>,
    },
    /// Date input (YYYY-MM-DD format)
    DateInput { value: String, cursor_pos: usize },
}

impl FormField {
    /// Create the widget for a draft field, pre-filled with `value`
    pub fn for_field(field: Field, value: &str) -> Self {
        let mut widget = match field.kind() {
            FieldKind::Text => FormField::TextInput {
                value: String::new(),
                cursor_pos: 0,
                placeholder: field.placeholder().unwrap_or_default().to_string(),
                max_length: field.max_len(),
            },
            FieldKind::MultiLine => FormField::TextArea {
                textarea: Box::new(TextArea::default()),
            },
            FieldKind::Date => FormField::DateInput {
                value: String::new(),
                cursor_pos: 0,
            },
            FieldKind::Choice => FormField::Choice {
                options: field
                    .options()
                    .into_iter()
                    .map(|(key, label)| (key, label.to_string()))
                    .collect(),
                selected: None,
            },
        };
        widget.set_value(value);
        widget
    }

    /// Get the current value as a string (choice key for radio groups)
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.clone(),
            FormField::TextArea { textarea } => textarea.lines().join("\n"),
            FormField::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|(key, _)| (*key).to_string())
                .unwrap_or_default(),
            FormField::DateInput { value, .. } => value.clone(),
        }
    }

    /// Set the value from a string
    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            }
            | FormField::DateInput { value, cursor_pos } => {
                *value = new_value.to_string();
                *cursor_pos = value.chars().count();
            }
            FormField::TextArea { textarea } => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(new_value);
            }
            FormField::Choice { options, selected } => {
                *selected = options.iter().position(|(key, _)| *key == new_value);
            }
        }
    }

    /// Replace the visible label of a choice option
    pub fn relabel_option(&mut self, key: &str, label: String) {
        if let FormField::Choice { options, .. } = self {
            if let Some(option) = options.iter_mut().find(|(k, _)| *k == key) {
                option.1 = label;
            }
        }
    }

    /// Whether Enter and arrow keys belong to the widget itself
    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::TextArea { .. })
    }

    /// Handle a key event, returns true if the value may have changed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                max_length,
                ..
            } => match key.code {
                KeyCode::Char(c) => {
                    if max_length.map_or(true, |m| value.chars().count() < m) {
                        let at = byte_index(value, *cursor_pos);
                        value.insert(at, c);
                        *cursor_pos += 1;
                    }
                    true
                }
                code => edit_line(value, cursor_pos, code),
            },
            FormField::DateInput { value, cursor_pos } => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
                    if value.len() < DATE_LEN {
                        let at = byte_index(value, *cursor_pos);
                        value.insert(at, c);
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Char(_) => false,
                code => edit_line(value, cursor_pos, code),
            },
            FormField::TextArea { textarea } => {
                // TextArea handles its own key events
                textarea.input(key);
                true
            }
            FormField::Choice { options, selected } => {
                if options.is_empty() {
                    return false;
                }
                let last = options.len() - 1;
                match key.code {
                    KeyCode::Left | KeyCode::Char('h') => {
                        *selected = Some(selected.map_or(0, |i| i.saturating_sub(1)));
                        true
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        *selected = Some(selected.map_or(0, |i| (i + 1).min(last)));
                        true
                    }
                    KeyCode::Char(' ') => {
                        *selected = Some(selected.map_or(0, |i| if i >= last { 0 } else { i + 1 }));
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    /// Get the height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextArea { .. } => 4,
            _ => 1,
        }
    }

    /// Render the field
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let text_style = Style::default().fg(if focused { Color::White } else { Color::Gray });

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                max_length,
            } => {
                let suffix = max_length
                    .map(|m| format!(" ({}/{})", value.chars().count(), m))
                    .unwrap_or_default();

                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(vec![
                        Span::raw(with_cursor(value, *cursor_pos, focused)),
                        Span::styled(suffix, Style::default().fg(Color::DarkGray)),
                    ])
                };
                frame.render_widget(Paragraph::new(content).style(text_style), area);
            }
            FormField::DateInput { value, cursor_pos } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        "YYYY-MM-DD",
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    Line::from(with_cursor(value, *cursor_pos, focused))
                };
                frame.render_widget(Paragraph::new(content).style(text_style), area);
            }
            FormField::TextArea { textarea } => {
                let border_color = if focused { Color::Cyan } else { Color::Gray };
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                );
                frame.render_widget(&**textarea, area);
            }
            FormField::Choice { options, selected } => {
                let mut spans = Vec::new();
                for (i, (_, label)) in options.iter().enumerate() {
                    let is_selected = *selected == Some(i);
                    let marker = if is_selected { "(•)" } else { "( )" };
                    let style = if is_selected {
                        Style::default()
                            .fg(if focused { Color::Cyan } else { Color::Green })
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::Gray)
                    };
                    if i > 0 {
                        spans.push(Span::raw("   "));
                    }
                    spans.push(Span::styled(format!("{marker} {label}"), style));
                }
                frame.render_widget(Paragraph::new(Line::from(spans)), area);
            }
        }
    }
}

/// Cursor movement and deletion shared by the single-line inputs
fn edit_line(value: &mut String, cursor_pos: &mut usize, code: KeyCode) -> bool {
    let len = value.chars().count();
    match code {
        KeyCode::Backspace => {
            if *cursor_pos > 0 {
                *cursor_pos -= 1;
                let at = byte_index(value, *cursor_pos);
                value.remove(at);
            }
            true
        }
        KeyCode::Delete => {
            if *cursor_pos < len {
                let at = byte_index(value, *cursor_pos);
                value.remove(at);
            }
            true
        }
        KeyCode::Left => {
            *cursor_pos = cursor_pos.saturating_sub(1);
            false
        }
        KeyCode::Right => {
            *cursor_pos = (*cursor_pos + 1).min(len);
            false
        }
        KeyCode::Home => {
            *cursor_pos = 0;
            false
        }
        KeyCode::End => {
            *cursor_pos = len;
            false
        }
        _ => false,
    }
}

fn with_cursor(value: &str, cursor_pos: usize, focused: bool) -> String {
    let mut text = value.to_string();
    if focused {
        text.insert(byte_index(value, cursor_pos), '|');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(field: &mut FormField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_text_input_handles_chars() {
        let mut field = FormField::for_field(Field::FullName, "");
        assert!(field.handle_key(key(KeyCode::Char('h'))));
        assert!(field.handle_key(key(KeyCode::Char('i'))));
        assert_eq!(field.value(), "hi");
    }

    #[test]
    fn test_bib_name_capped_while_typing() {
        let mut field = FormField::for_field(Field::BibName, "");
        type_str(&mut field, "ABCDEFGHIJKL");
        assert_eq!(field.value(), "ABCDEFGHIJ");
    }

    #[test]
    fn test_text_input_edits_multibyte_text() {
        let mut field = FormField::for_field(Field::FullName, "José");
        field.handle_key(key(KeyCode::Backspace));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.value(), "Jo");

        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Char('é')));
        assert_eq!(field.value(), "éJo");
    }

    #[test]
    fn test_date_input_rejects_letters_and_overflow() {
        let mut field = FormField::for_field(Field::BirthDate, "");
        type_str(&mut field, "1990-0x5-17-99");
        assert_eq!(field.value(), "1990-05-17");
    }

    #[test]
    fn test_choice_starts_unselected() {
        let field = FormField::for_field(Field::Gender, "");
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_choice_navigation() {
        let mut field = FormField::for_field(Field::JerseySize, "M");
        assert_eq!(field.value(), "M");

        field.handle_key(key(KeyCode::Right));
        assert_eq!(field.value(), "L");

        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Left));
        assert_eq!(field.value(), "S");
    }

    #[test]
    fn test_choice_space_cycles() {
        let mut field = FormField::for_field(Field::Category, "");
        field.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(field.value(), "student");
        field.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(field.value(), "general");
        field.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(field.value(), "student");
    }

    #[test]
    fn test_textarea_keeps_lines() {
        let mut field = FormField::for_field(Field::Address, "Jl. Merdeka 1");
        field.handle_key(key(KeyCode::Enter));
        type_str(&mut field, "Bandung");
        assert_eq!(field.value(), "Jl. Merdeka 1\nBandung");
        assert!(field.is_multiline());
    }

    #[test]
    fn test_control_keys_are_not_consumed() {
        let mut field = FormField::for_field(Field::Email, "");
        let handled = field.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!handled);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_relabel_option() {
        let mut field = FormField::for_field(Field::RegisteringFor, "self");
        field.relabel_option("self", "Diri sendiri (a@b)".to_string());
        if let FormField::Choice { options, .. } = &field {
            assert_eq!(options[0].1, "Diri sendiri (a@b)");
        } else {
            panic!("expected a choice field");
        }
    }
}
