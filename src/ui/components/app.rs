use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    ui::{
        app::App,
        components::{
            form::{GenreField, LyricsField, SubmitButton, VoiceField},
            header::Header,
            result::{ErrorBox, RenderPanel},
        },
        state::{Focus, NoticeKind},
    },
    util::colors,
};

const KEY_HELP: &str =
    "Tab next field • Ctrl+G generate • Ctrl+P play/pause • Ctrl+X stop • Ctrl+D download • Ctrl+C quit";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let studio = &self.state.studio;
        let ui = &self.state.ui;

        let mut constraints = vec![
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(3),
        ];
        if studio.error.is_some() {
            constraints.push(Constraint::Length(3));
        }
        if studio.song_url.is_some() {
            constraints.push(Constraint::Length(4));
        }
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let mut next = 0;
        let mut take = || {
            let rect = chunks[next];
            next += 1;
            rect
        };

        Header::new(&ui.backend, &self.ctx.config.api_base).render(take(), buf);

        LyricsField::new(&studio.lyrics, ui.focus == Focus::Lyrics).render(take(), buf);

        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(take());
        GenreField::new(studio.genre, ui.focus == Focus::Genre).render(row[0], buf);
        VoiceField::new(&ui.voice_path_input, ui.focus == Focus::VoiceSample).render(row[1], buf);

        SubmitButton::new(studio.phase(), ui.focus == Focus::Submit).render(take(), buf);

        if let Some(error) = &studio.error {
            ErrorBox::new(error).render(take(), buf);
        }

        if let Some(song_url) = &studio.song_url {
            RenderPanel::new(song_url, studio.meta.as_ref())
                .playback(self.audio.state(), self.audio.progress())
                .media_busy(ui.media_busy)
                .render(take(), buf);
        }

        let notice_area = take();
        if let Some(notice) = &ui.notice {
            let color = match notice.kind {
                NoticeKind::Info => colors::ACCENT,
                NoticeKind::Error => colors::ERROR,
            };
            Paragraph::new(notice.text.as_str().fg(color)).render(notice_area, buf);
        }

        Paragraph::new(Line::from(Span::raw(KEY_HELP).fg(colors::MUTED)))
            .centered()
            .render(take(), buf);
    }
}
