use std::sync::Arc;

use flume::Sender;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::{
    error::SubmitError,
    event::events::Event,
    http::model::GeneratedSong,
};

use super::{
    SongGenerator,
    request::{FormSnapshot, SubmissionRequest, VoiceSample},
    state::StudioEvent,
};

/// Holds the busy flag up for as long as it lives. Dropping it, on any exit
/// path including unwinding and task abort, settles the submission.
pub struct BusyGuard {
    event_tx: Sender<Event>,
}

impl BusyGuard {
    pub fn acquire(event_tx: Sender<Event>) -> Self {
        let _ = event_tx.send(StudioEvent::Dispatched.into());
        Self { event_tx }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let _ = self.event_tx.send(StudioEvent::Settled.into());
    }
}

/// Runs one submission at a time and reports every state change as a
/// [`StudioEvent`]. Re-entry is prevented by the caller, not here.
#[derive(Clone)]
pub struct SubmissionHandler {
    generator: Arc<dyn SongGenerator>,
    event_tx: Sender<Event>,
}

impl SubmissionHandler {
    pub fn new(generator: Arc<dyn SongGenerator>, event_tx: Sender<Event>) -> Self {
        Self {
            generator,
            event_tx,
        }
    }

    pub async fn submit(&self, request: SubmissionRequest) -> Result<GeneratedSong, SubmitError> {
        self.emit(StudioEvent::Reset);

        if let Err(err) = request.validate() {
            return Err(self.reject(err));
        }

        self.dispatch(request).await
    }

    /// Same as [`submit`](Self::submit), reading the voice sample from disk
    /// first. Lyrics are checked before the file is touched.
    pub async fn submit_form(&self, form: FormSnapshot) -> Result<GeneratedSong, SubmitError> {
        self.emit(StudioEvent::Reset);

        let mut request = SubmissionRequest::new(form.lyrics, form.genre);
        if let Err(err) = request.validate() {
            return Err(self.reject(err));
        }

        if let Some(path) = form.voice_file {
            match VoiceSample::load(&path).await {
                Ok(sample) => request = request.with_voice_sample(sample),
                Err(err) => return Err(self.reject(err)),
            }
        }

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: SubmissionRequest) -> Result<GeneratedSong, SubmitError> {
        let span = info_span!(
            "submission",
            request_id = %Uuid::new_v4(),
            genre = %request.genre,
            has_voice_sample = request.voice_sample.is_some(),
        );

        async {
            let busy = BusyGuard::acquire(self.event_tx.clone());

            let outcome = self.generator.generate(&request).await;
            match &outcome {
                Ok(song) => {
                    info!(song_url = %song.song_url, "submission succeeded");
                    self.emit(StudioEvent::Resolved(song.clone()));
                }
                Err(err) => {
                    warn!(error = %err, "submission failed");
                    self.emit(StudioEvent::Failed(err.to_string()));
                }
            }

            drop(busy);
            outcome
        }
        .instrument(span)
        .await
    }

    fn reject(&self, err: SubmitError) -> SubmitError {
        info!(error = %err, "submission rejected before dispatch");
        self.emit(StudioEvent::Failed(err.to_string()));
        err
    }

    fn emit(&self, event: StudioEvent) {
        let _ = self.event_tx.send(event.into());
    }
}
