use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{ui::state::BackendStatus, util::colors};

pub struct Header<'a> {
    backend: &'a BackendStatus,
    api_base: &'a str,
}

impl<'a> Header<'a> {
    pub fn new(backend: &'a BackendStatus, api_base: &'a str) -> Self {
        Self { backend, api_base }
    }

    fn status_line(&self) -> Line<'a> {
        match self.backend {
            BackendStatus::Checking => Line::from(vec![
                Span::raw("● ").fg(colors::NEUTRAL),
                Span::raw(format!("checking {}", self.api_base)).fg(colors::NEUTRAL),
            ]),
            BackendStatus::Online(health) => {
                let services = [
                    ("suno", health.ai_services.suno),
                    ("elevenlabs", health.ai_services.elevenlabs),
                    ("openai", health.ai_services.openai),
                ];
                // A 2xx with a status other than "ok" means the backend is up but degraded.
                let (dot, note) = if health.is_ok() {
                    (colors::SUCCESS, String::new())
                } else {
                    (colors::ERROR_BORDER, format!("({}) ", health.status))
                };
                let mut spans = vec![
                    Span::raw("● ").fg(dot),
                    Span::raw(format!("{} {note} ", self.api_base)).fg(colors::NEUTRAL),
                ];
                for (name, enabled) in services {
                    let color = if enabled { colors::PRIMARY } else { colors::MUTED };
                    spans.push(Span::raw(format!("{name} ")).fg(color));
                }
                Line::from(spans)
            }
            BackendStatus::Offline(_) => Line::from(vec![
                Span::raw("● ").fg(colors::ERROR_BORDER),
                Span::raw(format!("{} unreachable", self.api_base)).fg(colors::ERROR),
            ]),
        }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(64)])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "QuickMP3 Studio",
                Style::new().fg(colors::PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(
                "FolseTech AI Solutions • Transforming ideas into intelligent tracks"
                    .fg(colors::NEUTRAL),
            ),
        ]);
        title.render(columns[0], buf);

        Paragraph::new(self.status_line())
            .alignment(Alignment::Right)
            .render(columns[1], buf);
    }
}
