use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::session::derive_session_key;
use crate::views::PageAssets;

pub mod scenario_store;
pub mod session_selector;

pub use scenario_store::{CatalogError, ScenarioStore};

pub struct AppState {
    pub config: Config,
    pub scenarios: ScenarioStore,
    pub session_key: Key,
    pub assets: PageAssets,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let scenarios = ScenarioStore::builtin()?;
        Ok(Self::with_scenarios(config, scenarios))
    }

    pub fn with_scenarios(config: Config, scenarios: ScenarioStore) -> Self {
        tracing::info!("Loaded {} training scenarios", scenarios.len());

        let session_key = derive_session_key(&config.session_secret);

        Self {
            config,
            scenarios,
            session_key,
            assets: PageAssets::default(),
        }
    }
}
