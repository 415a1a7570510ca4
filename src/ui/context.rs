use std::sync::Arc;

use flume::Sender;

use crate::{
    config::Config,
    event::events::Event,
    generation::{SongGenerator, SubmissionHandler},
    http::ApiService,
};

pub struct AppContext {
    pub config: Arc<Config>,
    pub api: Arc<ApiService>,
    pub submissions: SubmissionHandler,
    pub event_tx: Sender<Event>,
}

impl AppContext {
    pub fn new(config: Arc<Config>, api: Arc<ApiService>, event_tx: Sender<Event>) -> Self {
        let generator: Arc<dyn SongGenerator> = api.clone();
        Self::with_generator(config, api, generator, event_tx)
    }

    pub fn with_generator(
        config: Arc<Config>,
        api: Arc<ApiService>,
        generator: Arc<dyn SongGenerator>,
        event_tx: Sender<Event>,
    ) -> Self {
        let submissions = SubmissionHandler::new(generator, event_tx.clone());
        Self {
            config,
            api,
            submissions,
            event_tx,
        }
    }
}
