use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use crate::{
    audio::state::PlaybackState,
    http::model::RenderMetadata,
    ui::{components::spinner::Spinner, util::format_duration},
    util::colors,
};

pub struct ErrorBox<'a> {
    message: &'a str,
}

impl<'a> ErrorBox<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ErrorBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.message.fg(colors::ERROR))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(Style::new().fg(colors::ERROR_BORDER)),
            )
            .render(area, buf);
    }
}

pub struct RenderPanel<'a> {
    song_url: &'a str,
    meta: Option<&'a RenderMetadata>,
    playback: PlaybackState,
    progress: Option<(Duration, Option<Duration>)>,
    media_busy: bool,
}

impl<'a> RenderPanel<'a> {
    pub fn new(song_url: &'a str, meta: Option<&'a RenderMetadata>) -> Self {
        Self {
            song_url,
            meta,
            playback: PlaybackState::Stopped,
            progress: None,
            media_busy: false,
        }
    }

    pub fn playback(
        mut self,
        state: PlaybackState,
        progress: Option<(Duration, Option<Duration>)>,
    ) -> Self {
        self.playback = state;
        self.progress = progress;
        self
    }

    pub fn media_busy(mut self, busy: bool) -> Self {
        self.media_busy = busy;
        self
    }

    fn player(&self, area: Rect, buf: &mut Buffer) {
        if self.media_busy {
            Spinner::default()
                .with_label("Fetching render...")
                .with_style(Style::new().fg(colors::NEUTRAL))
                .render(area, buf);
            return;
        }

        let icon = match self.playback {
            PlaybackState::Playing => "▶",
            PlaybackState::Paused => "⏸",
            PlaybackState::Stopped => "■",
        };

        let (ratio, label) = match self.progress {
            Some((position, Some(total))) if !total.is_zero() => (
                (position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0),
                format!(
                    "{icon} {} / {}",
                    format_duration(position),
                    format_duration(total)
                ),
            ),
            Some((position, _)) => (0.0, format!("{icon} {}", format_duration(position))),
            None => (0.0, format!("{icon} Ctrl+P to play")),
        };

        Gauge::default()
            .gauge_style(Style::new().fg(colors::PRIMARY).bg(colors::BACKGROUND))
            .ratio(ratio)
            .label(Span::raw(label).fg(colors::ACCENT))
            .use_unicode(true)
            .render(area, buf);
    }
}

impl Widget for RenderPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::new().fg(colors::SECONDARY))
            .title(Span::styled(
                " Your FolseTech Render ",
                Style::new().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        if let Some(summary) = self.meta.and_then(RenderMetadata::summary) {
            Paragraph::new(summary.fg(colors::ACCENT)).render(rows[0], buf);
        }

        Paragraph::new(Line::from(vec![
            Span::raw("URL  ").fg(colors::MUTED),
            Span::raw(self.song_url).underlined(),
        ]))
        .render(rows[1], buf);

        self.player(rows[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn panel_shows_metadata_summary_and_url() {
        let meta = serde_json::from_value::<RenderMetadata>(serde_json::json!({
            "id": "abc",
            "genre": "Trap",
            "duration_seconds": 42,
            "brand": "FolseTech",
        }))
        .unwrap();
        let area = Rect::new(0, 0, 90, 4);
        let mut buf = Buffer::empty(area);
        RenderPanel::new("http://localhost:8000/media/abc.mp3", Some(&meta)).render(area, &mut buf);

        assert!(row(&buf, 1).contains("Genre: Trap • Approx. 42s • Render ID: abc • Brand: FolseTech"));
        assert!(row(&buf, 2).contains("http://localhost:8000/media/abc.mp3"));
    }
}
