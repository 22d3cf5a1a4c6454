use serde::{Deserialize, Serialize};

use crate::api::error::ProgressError;
use crate::api::types::{Category, LevelId, LevelState, ProgressSummary, Stars};
use crate::catalog::registry::LevelCatalog;
use crate::progress::state::{CompletionRecord, OverrideFlag, Overrides, ProgressState};
use crate::progress::storage::ProgressStorage;
use crate::progress::store::ProgressStore;
use crate::rules::progression::{CompletionOutcome, ProgressionRules};
use crate::rules::scoring::ScoreTier;
use crate::time::clock::{Clock, SystemClock};
#[cfg(feature = "i18n")]
use crate::i18n::Locale;

/// Engine configuration, provided by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Storage key the progress state is saved under (default: "gamefunProgress").
    pub storage_key: String,
    /// Initial `testingMode` override when no saved state exists (default: false).
    pub testing_mode_default: bool,
    /// Locale used before the learner picks one (default: Hebrew).
    #[cfg(feature = "i18n")]
    pub default_locale: Locale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key: "gamefunProgress".to_owned(),
            testing_mode_default: false,
            #[cfg(feature = "i18n")]
            default_locale: Locale::He,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One learner's progression: catalog, persisted state and the rules over them.
///
/// Every call runs to completion synchronously; mutations are persisted
/// before they return.
pub struct ProgressionEngine<S: ProgressStorage, C: Clock = SystemClock> {
    catalog: LevelCatalog,
    store: ProgressStore<S>,
    clock: C,
    config: EngineConfig,
}

impl<S: ProgressStorage> ProgressionEngine<S, SystemClock> {
    pub fn new(
        catalog: LevelCatalog,
        storage: S,
        config: EngineConfig,
    ) -> Result<Self, ProgressError> {
        Self::with_clock(catalog, storage, config, SystemClock::new())
    }
}

impl<S: ProgressStorage, C: Clock> ProgressionEngine<S, C> {
    pub fn with_clock(
        catalog: LevelCatalog,
        storage: S,
        config: EngineConfig,
        clock: C,
    ) -> Result<Self, ProgressError> {
        let defaults = Overrides {
            unlock_all: false,
            testing_mode: config.testing_mode_default,
        };
        let store = ProgressStore::load(storage, config.storage_key.clone(), &catalog, defaults)?;
        Ok(Self {
            catalog,
            store,
            clock,
            config,
        })
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &ProgressState {
        self.store.state()
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Rules evaluated against the current state.
    pub fn rules(&self) -> ProgressionRules<'_> {
        ProgressionRules::new(&self.catalog, self.store.state())
    }

    // -- Queries --

    pub fn is_unlocked(&self, id: &str) -> Result<bool, ProgressError> {
        self.rules().is_unlocked(id)
    }

    pub fn level_state(&self, id: &str) -> Result<LevelState, ProgressError> {
        self.rules().level_state(id)
    }

    pub fn unlocked_levels(&self) -> Vec<LevelId> {
        self.rules().unlocked_levels()
    }

    pub fn stars_for(&self, id: &str) -> Result<Stars, ProgressError> {
        self.rules().stars_for(id)
    }

    pub fn score_message(&self, id: &str) -> Result<&'static str, ProgressError> {
        self.rules().score_message(id)
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.store.is_completed(id)
    }

    /// `Ok(None)` for a level never played; `UnknownLevel` for ids outside the catalog.
    pub fn record_for(&self, id: &str) -> Result<Option<&CompletionRecord>, ProgressError> {
        self.rules().record_for(id)
    }

    pub fn summary(&self) -> ProgressSummary {
        self.rules().summary()
    }

    pub fn levels_by_category(&self) -> Vec<(Category, Vec<LevelId>)> {
        self.rules().levels_by_category()
    }

    // -- Commands --

    /// Record a finished session and report what it unlocked.
    pub fn record_completion(
        &mut self,
        id: &str,
        score: u32,
        total: u32,
    ) -> Result<CompletionOutcome, ProgressError> {
        let before = self.unlocked_levels();
        let now = self.clock.now();
        let record = self
            .store
            .record_completion(&self.catalog, id, score, total, now)?;
        let tier = ScoreTier::of(record.score, record.total);
        let (score, total) = (record.score, record.total);

        let newly_unlocked: Vec<LevelId> = self
            .unlocked_levels()
            .into_iter()
            .filter(|level| !before.contains(level))
            .collect();
        for level in &newly_unlocked {
            log::info!("Level '{}' unlocked by completing '{}'", level, id);
        }

        Ok(CompletionOutcome {
            level_id: LevelId::from(id),
            score,
            total,
            stars: tier.stars(),
            message: tier.message(),
            newly_unlocked,
        })
    }

    pub fn get_override(&self, flag: OverrideFlag) -> bool {
        self.store.get_override(flag)
    }

    pub fn set_override(&mut self, flag: OverrideFlag, value: bool) -> Result<(), ProgressError> {
        self.store.set_override(flag, value)
    }

    pub fn toggle_override(&mut self, flag: OverrideFlag) -> Result<bool, ProgressError> {
        self.store.toggle_override(flag)
    }

    pub fn reset_overrides(&mut self) -> Result<(), ProgressError> {
        self.store.reset_overrides()
    }

    /// Clear all completions ("try again"). Overrides are kept.
    pub fn reset(&mut self) -> Result<(), ProgressError> {
        self.store.reset()
    }
}
