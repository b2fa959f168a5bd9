use std::sync::Arc;

use crate::api::{HttpApi, NewsApi};
use crate::app::Result;
use crate::config::Config;
use crate::session::SessionStore;

/// Wires together the collaborators every command needs: the configuration,
/// the one session store, and the API client that reads it.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub api: Arc<dyn NewsApi>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let session = Arc::new(SessionStore::open_default()?);
        let api: Arc<dyn NewsApi> = Arc::new(HttpApi::new(
            config.api.base_url.clone(),
            config.api.timeout(),
            session.clone(),
        )?);

        Ok(Self {
            config,
            session,
            api,
        })
    }

    /// Context with an in-memory session, for tests.
    pub fn in_memory(config: Config) -> Result<Self> {
        let session = Arc::new(SessionStore::in_memory());
        let api: Arc<dyn NewsApi> = Arc::new(HttpApi::new(
            config.api.base_url.clone(),
            config.api.timeout(),
            session.clone(),
        )?);

        Ok(Self {
            config,
            session,
            api,
        })
    }
}
