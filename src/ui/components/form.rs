use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    generation::{request::Genre, state::Phase},
    ui::components::spinner::Spinner,
    util::colors,
};

const LYRICS_PLACEHOLDER: &str =
    "Write or paste your lyrics here... (hooks, verses, bridges, QuickMP3 doesn't judge)";
const VOICE_PLACEHOLDER: &str = "path to an audio file (optional)";
const VOICE_HINT: &str = " 5–30 seconds of clean speech is ideal for voice cloning ";
const CURSOR: &str = "▏";

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { colors::PRIMARY } else { colors::MUTED };
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::new().fg(color))
        .title(title)
}

/// Rows the text occupies once wrapped at `width` columns.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    text.split('\n')
        .map(|line| line.width().max(1).div_ceil(width) as u16)
        .sum()
}

pub struct LyricsField<'a> {
    lyrics: &'a str,
    focused: bool,
}

impl<'a> LyricsField<'a> {
    pub fn new(lyrics: &'a str, focused: bool) -> Self {
        Self { lyrics, focused }
    }
}

impl Widget for LyricsField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = field_block("Lyrics", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.lyrics.is_empty() && !self.focused {
            Paragraph::new(LYRICS_PLACEHOLDER.fg(colors::MUTED))
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        }

        let mut shown = self.lyrics.to_string();
        if self.focused {
            shown.push_str(CURSOR);
        }

        // Keep the end of the text, where typing happens, in view.
        let scroll = wrapped_height(&shown, inner.width).saturating_sub(inner.height);
        Paragraph::new(Text::raw(shown))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}

pub struct GenreField {
    genre: Genre,
    focused: bool,
}

impl GenreField {
    pub fn new(genre: Genre, focused: bool) -> Self {
        Self { genre, focused }
    }
}

impl Widget for GenreField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let position = Genre::ALL
            .iter()
            .position(|g| *g == self.genre)
            .unwrap_or_default()
            + 1;
        let arrow_color = if self.focused { colors::PRIMARY } else { colors::MUTED };

        let line = Line::from(vec![
            Span::raw("◀ ").fg(arrow_color),
            Span::styled(self.genre.as_str(), Style::new().add_modifier(Modifier::BOLD)),
            Span::raw(" ▶").fg(arrow_color),
            Span::raw(format!("   {position}/{}", Genre::ALL.len())).fg(colors::MUTED),
        ]);

        Paragraph::new(line)
            .block(field_block("Genre", self.focused))
            .render(area, buf);
    }
}

pub struct VoiceField<'a> {
    path: &'a str,
    focused: bool,
}

impl<'a> VoiceField<'a> {
    pub fn new(path: &'a str, focused: bool) -> Self {
        Self { path, focused }
    }
}

impl Widget for VoiceField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = field_block("Voice Sample (optional)", self.focused)
            .title_bottom(Line::from(VOICE_HINT.fg(colors::MUTED)).right_aligned());

        let line = if self.path.is_empty() && !self.focused {
            Line::from(VOICE_PLACEHOLDER.fg(colors::MUTED))
        } else if self.focused {
            Line::from(format!("{}{CURSOR}", self.path))
        } else {
            Line::from(self.path.to_string())
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

pub struct SubmitButton {
    phase: Phase,
    focused: bool,
}

impl SubmitButton {
    pub fn new(phase: Phase, focused: bool) -> Self {
        Self { phase, focused }
    }

    fn label(&self) -> &'static str {
        match self.phase {
            Phase::Failed => " Try Again ",
            Phase::Succeeded => " Generate Another ",
            Phase::Idle | Phase::Submitting => " Generate Song ",
        }
    }
}

impl Widget for SubmitButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let loading = self.phase == Phase::Submitting;
        let border_color = match (loading, self.focused) {
            (true, _) => colors::MUTED,
            (false, true) => colors::PRIMARY,
            (false, false) => colors::SECONDARY,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::new().fg(border_color));
        let inner = block.inner(area);
        block.render(area, buf);

        if loading {
            Spinner::default()
                .with_label("Brewing your track...")
                .with_style(Style::new().fg(colors::NEUTRAL))
                .render(inner, buf);
        } else {
            let mut label = Style::new().fg(colors::PRIMARY).add_modifier(Modifier::BOLD);
            if self.focused {
                label = label.add_modifier(Modifier::REVERSED);
            }
            Paragraph::new(Span::styled(self.label(), label))
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}
