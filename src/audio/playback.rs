use crate::audio::util::{construct_sink, setup_device_config};
use rodio::{OutputStream, Sink, Source};
use std::time::Duration;

pub struct PlaybackEngine {
    _stream: OutputStream,
    sink: Sink,
}

impl PlaybackEngine {
    pub fn new() -> color_eyre::Result<Self> {
        let (device, stream_config, sample_format) = setup_device_config()?;
        let (stream, sink) = construct_sink(device, &stream_config, sample_format)?;

        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    pub fn play_source<S>(&self, source: S)
    where
        S: Source<Item = f32> + Send + 'static,
    {
        self.sink.append(source);
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn play(&self) {
        self.sink.play();
    }

    /// Drops whatever is queued and leaves the sink paused.
    pub fn clear(&self) {
        self.sink.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.sink.empty()
    }

    pub fn get_pos(&self) -> Duration {
        self.sink.get_pos()
    }
}
