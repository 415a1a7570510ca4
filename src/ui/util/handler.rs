use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{info, warn};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        input::InputHandler,
        message::AppMessage,
        state::{BackendStatus, Notice},
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => app.check_health(),
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Paste(text) => app.update(AppMessage::Paste(text)).await,
            TerminalEvent::Tick => {
                if app.audio.poll_finished() {
                    let _ = app.ctx.event_tx.send(Event::PlaybackEnded);
                }
                return Ok(app.has_focus);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        match evt {
            Event::Studio(event) => app.apply(event),
            Event::HealthChecked(status) => {
                info!(status = %status.status, "backend reachable");
                app.state.ui.backend = BackendStatus::Online(status);
            }
            Event::HealthFailed(reason) => {
                warn!(%reason, "backend health check failed");
                app.state.ui.backend = BackendStatus::Offline(reason);
            }
            Event::SongFetched { ticket, bytes } => {
                if !app.settle_media(ticket) {
                    return;
                }
                match app.audio.play_bytes(bytes) {
                    Ok(()) => app.state.ui.notice = None,
                    Err(e) => {
                        warn!("playback failed: {e}");
                        app.state.ui.notice = Some(Notice::error(e.to_string()));
                    }
                }
            }
            Event::SongDownloaded { ticket, path } => {
                info!(path = %path.display(), "render saved");
                if !app.settle_media(ticket) {
                    return;
                }
                app.state.ui.notice = Some(Notice::info(format!("Saved to {}", path.display())));
            }
            Event::MediaError { ticket, reason } => {
                warn!(%reason, "media request failed");
                if !app.settle_media(ticket) {
                    return;
                }
                app.state.ui.notice = Some(Notice::error(reason));
            }
            Event::PlaybackEnded => {
                info!("playback finished");
                app.state.ui.notice = Some(Notice::info("Playback finished. Ctrl+P plays it again."));
            }
        }
    }

    async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        if let Some(msg) = InputHandler::handle_key(evt, app.state.ui.focus) {
            app.update(msg).await;
        }
    }
}
