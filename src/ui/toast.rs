//! Transient notifications drawn over the wizard

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

use crate::registration::ValidationError;

const MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
    expires_at: Instant,
}

impl Toast {
    /// A `ttl` too large for `Instant` is capped at one day.
    pub fn new(kind: ToastKind, title: &str, description: &str, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(MAX_TTL))
            .unwrap_or(now);
        Self {
            kind,
            title: title.to_string(),
            description: description.to_string(),
            expires_at,
        }
    }

    pub fn from_validation(err: &ValidationError, ttl: Duration) -> Self {
        Self::new(ToastKind::Error, err.title(), err.description(), ttl)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Draw in the top-right corner of `area`
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(48);
        let height = 4.min(area.height);
        let toast_area = Rect {
            x: area.x + area.width - width,
            y: area.y,
            width,
            height,
        };

        let color = match self.kind {
            ToastKind::Error => Color::Red,
            ToastKind::Success => Color::Green,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let text = vec![
            Line::from(Span::styled(
                self.title.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(self.description.as_str()),
        ];

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
            toast_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_ttl() {
        let toast = Toast::new(ToastKind::Success, "ok", "done", Duration::from_millis(100));
        let now = Instant::now();
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + Duration::from_millis(200)));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let toast = Toast::new(ToastKind::Error, "x", "y", Duration::MAX);
        let now = Instant::now();
        assert!(!toast.is_expired(now));
        assert!(toast.is_expired(now + MAX_TTL + Duration::from_secs(1)));
    }

    #[test]
    fn test_validation_toast_uses_error_text() {
        let toast = Toast::from_validation(&ValidationError::JerseySizeMissing, Duration::ZERO);
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.title, "Ukuran jersey belum dipilih");
        assert_eq!(toast.description, "Mohon pilih ukuran jersey Anda");
    }
}
