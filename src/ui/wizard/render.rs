//! Wizard rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::registration::{required_fields, Field, Step};
use crate::ui::keybindings::{footer_hint, ShortcutContext};
use crate::ui::wizard::WizardScreen;

impl WizardScreen {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let step = self.step();

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    self.event_name.as_str(),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (top_extra, bottom_extra) = self.step_extras(step);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints([
                Constraint::Length(1), // Tagline
                Constraint::Length(1), // Step labels
                Constraint::Length(1), // Progress
                Constraint::Length(1),
                Constraint::Length(2), // Title + subtitle
                Constraint::Length(line_count(&top_extra)),
                Constraint::Min(3), // Fields
                Constraint::Length(line_count(&bottom_extra)),
                Constraint::Length(1), // Navigation
                Constraint::Length(1), // Key hints
            ])
            .split(inner);

        let tagline = Paragraph::new(self.tagline.as_str())
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        frame.render_widget(tagline, chunks[0]);

        frame.render_widget(step_indicator(step), chunks[1]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(step.progress_percent())
            .label(format!("Langkah {} dari {}", step.number(), Step::ALL.len()));
        frame.render_widget(gauge, chunks[2]);

        let heading = Paragraph::new(vec![
            Line::from(Span::styled(
                step.title(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                step.subtitle(),
                Style::default().fg(Color::Gray),
            )),
        ]);
        frame.render_widget(heading, chunks[4]);

        frame.render_widget(Paragraph::new(top_extra), chunks[5]);
        self.render_fields(frame, chunks[6]);
        frame.render_widget(Paragraph::new(bottom_extra), chunks[7]);

        frame.render_widget(navigation(step), chunks[8]);

        let mut hint = footer_hint(ShortcutContext::Form);
        if step == Step::RacePack {
            hint.push_str("  ·  F2 Panduan Ukuran");
        }
        hint.push_str("  ·  Ctrl+C Keluar");
        let hints = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[9]);

        if let Some(ref toast) = self.toast {
            toast.render(frame, area);
        }
        self.size_chart.render(frame);
        self.completion.render(frame);
    }

    /// Lines drawn above and below the fields on some steps
    fn step_extras(&self, step: Step) -> (Vec<Line<'static>>, Vec<Line<'static>>) {
        match step {
            Step::RacePack => (
                vec![
                    Line::from(Span::styled(
                        "Panduan Ukuran Jersey",
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(
                        "Jersey dalam ukuran standar. Silahkan dipilih sesuai tabel ukuran yang tertera.",
                    ),
                    Line::from(Span::styled(
                        "Penukaran ukuran tidak tersedia setelah pemilihan ini.",
                        Style::default().fg(Color::Yellow),
                    )),
                    Line::from(Span::styled(
                        "F2 Lihat Panduan Ukuran",
                        Style::default().fg(Color::Cyan),
                    )),
                    Line::from(""),
                ],
                Vec::new(),
            ),
            Step::Category => {
                let mut lines = vec![Line::from(Span::styled(
                    "Ringkasan Pendaftaran",
                    Style::default().add_modifier(Modifier::BOLD),
                ))];
                for (label, value) in self.draft().summary().rows() {
                    let shown = if value.is_empty() {
                        "-".to_string()
                    } else {
                        value
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                        Span::raw(shown),
                    ]));
                }
                (Vec::new(), lines)
            }
            _ => (Vec::new(), Vec::new()),
        }
    }

    /// Label plus widget per visible field, scrolled so the focused one shows
    fn render_fields(&mut self, frame: &mut Frame, area: Rect) {
        let step = self.step();
        let visible = self.visible_fields();
        let width = area.width.max(1);

        let heights: Vec<u16> = visible
            .iter()
            .map(|field| {
                let widget = self
                    .rows
                    .iter()
                    .find(|row| row.field == *field)
                    .map_or(1, |row| row.widget.render_height());
                label_height(*field, width) + widget + 1
            })
            .collect();

        let focused_index = visible
            .iter()
            .position(|f| *f == self.focused)
            .unwrap_or(0);
        let mut first = 0;
        while first < focused_index && heights[first..=focused_index].iter().sum::<u16>() > area.height
        {
            first += 1;
        }

        let mut y = area.y;
        let bottom = area.y + area.height;
        for (i, field) in visible.iter().enumerate().skip(first) {
            if y + heights[i] > bottom {
                break;
            }
            let focused = *field == self.focused;
            let required = required_fields(step).contains(field)
                || *field == Field::RegistrationSourceName;

            let label_style = if focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let mut spans = vec![Span::styled(field.label(), label_style)];
            if required {
                spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
            }
            let label_rows = label_height(*field, width);
            frame.render_widget(
                Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
                Rect::new(area.x, y, area.width, label_rows),
            );
            y += label_rows;

            if let Some(row) = self.rows.iter_mut().find(|row| row.field == *field) {
                let height = row.widget.render_height();
                row.widget
                    .render(frame, Rect::new(area.x, y, area.width, height), focused);
                y += height;
            }
            y += 1;
        }
    }
}

fn line_count(lines: &[Line]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

/// Rows a label wraps to at `width`, counting the required marker
fn label_height(field: Field, width: u16) -> u16 {
    let chars = u16::try_from(field.label().chars().count() + 2).unwrap_or(u16::MAX);
    chars.div_ceil(width).max(1)
}

fn step_indicator(current: Step) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for step in Step::ALL {
        if !step.is_first() {
            spans.push(Span::styled(" ── ", Style::default().fg(Color::DarkGray)));
        }
        let style = if step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step.number() < current.number() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(step.to_string(), style));
    }
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn navigation(step: Step) -> Paragraph<'static> {
    let back = if step.is_first() {
        Span::raw("")
    } else {
        Span::styled("◀ Kembali (PgUp)", Style::default().fg(Color::Yellow))
    };
    let forward = if step.is_last() {
        Span::styled(
            "Selesaikan Pendaftaran (PgDn) ▶",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("Selanjutnya (PgDn) ▶", Style::default().fg(Color::Green))
    };
    Paragraph::new(Line::from(vec![back, Span::raw("    "), forward]))
        .alignment(Alignment::Center)
}
