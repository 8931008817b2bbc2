use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::registration::Submission;
use crate::ui::keybindings::{footer_hint, ShortcutContext};

/// Read-only overlay showing the jersey size chart
pub struct SizeChartDialog {
    pub visible: bool,
    /// Chart text, shown as-is
    chart: Option<String>,
}

impl SizeChartDialog {
    pub fn new(chart: Option<String>) -> Self {
        Self {
            visible: false,
            chart,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Panduan Ukuran Jersey ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let mut lines: Vec<Line> = match self.chart {
            Some(ref chart) => chart.lines().map(Line::from).collect(),
            None => vec![Line::from(Span::styled(
                "Tabel ukuran belum tersedia.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            footer_hint(ShortcutContext::SizeChart),
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Shown after a successful submission
pub struct CompletionDialog {
    pub submission: Option<Submission>,
}

impl CompletionDialog {
    pub fn new() -> Self {
        Self { submission: None }
    }

    pub fn show(&mut self, submission: Submission) {
        self.submission = Some(submission);
    }

    pub fn hide(&mut self) {
        self.submission = None;
    }

    pub fn is_visible(&self) -> bool {
        self.submission.is_some()
    }

    pub fn render(&self, frame: &mut Frame) {
        let Some(ref submission) = self.submission else {
            return;
        };

        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Pendaftaran Berhasil! ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Thanks
                Constraint::Min(4),    // Summary
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let thanks = Paragraph::new(
            "Terima kasih telah mendaftar. Kami akan mengirimkan konfirmasi ke email Anda.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(thanks, chunks[0]);

        let mut lines = vec![Line::from(vec![
            Span::styled("Referensi: ", Style::default().fg(Color::Gray)),
            Span::styled(
                submission.reference.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])];
        for (label, value) in submission.summary.rows() {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                Span::raw(value),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        let footer = Paragraph::new(footer_hint(ShortcutContext::Completion))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[2]);
    }
}

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(60, 40, parent);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 15);
    }

    #[test]
    fn test_size_chart_toggle() {
        let mut dialog = SizeChartDialog::new(None);
        assert!(!dialog.visible);
        dialog.toggle();
        assert!(dialog.visible);
        dialog.toggle();
        assert!(!dialog.visible);
    }

    #[test]
    fn test_completion_visibility() {
        let mut dialog = CompletionDialog::new();
        assert!(!dialog.is_visible());
        dialog.hide();
        assert!(!dialog.is_visible());
    }
}
