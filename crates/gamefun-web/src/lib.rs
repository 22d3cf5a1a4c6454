//! WASM bridge for the GameFun progression engine.
//!
//! The TypeScript front end calls the `progress_*` exports below. A single
//! `ProgressSession` lives in `thread_local!` storage, because wasm-bindgen
//! cannot export generic structs directly.

pub mod session;
pub mod storage;

pub use session::ProgressSession;
pub use storage::{BrowserStorage, LocalStorage};

use std::cell::RefCell;

use gamefun_engine::{EngineConfig, LevelCatalog};
use wasm_bindgen::prelude::*;

thread_local! {
    static SESSION: RefCell<Option<ProgressSession<BrowserStorage>>> = RefCell::new(None);
}

fn with_session<R>(
    f: impl FnOnce(&mut ProgressSession<BrowserStorage>) -> Result<R, String>,
) -> Result<R, JsValue> {
    SESSION.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let session = borrow.as_mut().ok_or_else(|| {
            JsValue::from_str("Progress engine not initialized. Call progress_init() first.")
        })?;
        f(session).map_err(|e| JsValue::from_str(&e))
    })
}

/// Load config and catalog (both optional JSON), open storage and restore
/// saved progress. Safe to call again to re-initialize.
#[wasm_bindgen]
pub fn progress_init(
    config_json: Option<String>,
    catalog_json: Option<String>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json {
        Some(json) => {
            EngineConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => EngineConfig::default(),
    };
    let catalog = match catalog_json {
        Some(json) => LevelCatalog::from_json(&json),
        None => LevelCatalog::standard(),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let session = ProgressSession::new(catalog, BrowserStorage::detect(), config)
        .map_err(|e| JsValue::from_str(&e))?;
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(session);
    });

    log::info!("gamefun: progress engine initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn progress_is_unlocked(level_id: &str) -> Result<bool, JsValue> {
    with_session(|s| s.is_unlocked(level_id))
}

#[wasm_bindgen]
pub fn progress_level_state(level_id: &str) -> Result<String, JsValue> {
    with_session(|s| s.level_state(level_id))
}

/// Returns the completion outcome as JSON.
#[wasm_bindgen]
pub fn progress_record_completion(
    level_id: &str,
    score: u32,
    total: u32,
) -> Result<String, JsValue> {
    with_session(|s| s.record_completion(level_id, score, total))
}

#[wasm_bindgen]
pub fn progress_stars_for(level_id: &str) -> Result<u8, JsValue> {
    with_session(|s| s.stars_for(level_id))
}

#[wasm_bindgen]
pub fn progress_score_message(level_id: &str) -> Result<String, JsValue> {
    with_session(|s| s.score_message(level_id))
}

#[wasm_bindgen]
pub fn progress_unlocked_levels() -> Result<js_sys::Array, JsValue> {
    let ids = with_session(|s| Ok(s.unlocked_levels()))?;
    Ok(ids.into_iter().map(JsValue::from).collect())
}

#[wasm_bindgen]
pub fn progress_summary() -> Result<String, JsValue> {
    with_session(|s| s.summary_json())
}

#[wasm_bindgen]
pub fn progress_levels_by_category() -> Result<String, JsValue> {
    with_session(|s| s.levels_by_category_json())
}

// ---- Overrides ----

#[wasm_bindgen]
pub fn progress_get_override(flag: &str) -> Result<bool, JsValue> {
    with_session(|s| s.get_override(flag))
}

#[wasm_bindgen]
pub fn progress_set_override(flag: &str, value: bool) -> Result<(), JsValue> {
    with_session(|s| s.set_override(flag, value))
}

#[wasm_bindgen]
pub fn progress_toggle_override(flag: &str) -> Result<bool, JsValue> {
    with_session(|s| s.toggle_override(flag))
}

#[wasm_bindgen]
pub fn progress_reset_overrides() -> Result<(), JsValue> {
    with_session(|s| s.reset_overrides())
}

#[wasm_bindgen]
pub fn progress_reset() -> Result<(), JsValue> {
    with_session(|s| s.reset())
}

// ---- Stateless scoring helpers (used mid-session, before anything is recorded) ----

#[wasm_bindgen]
pub fn star_rating(score: u32, total: u32) -> u8 {
    gamefun_engine::star_rating(score, total).0
}

#[wasm_bindgen]
pub fn score_message(score: u32, total: u32) -> String {
    gamefun_engine::score_message(score, total).to_owned()
}

#[wasm_bindgen]
pub fn session_progress(current_index: u32, total: u32, answered: bool) -> u32 {
    gamefun_engine::session_progress(current_index, total, answered)
}

// ---- Localization ----

#[cfg(feature = "i18n")]
#[wasm_bindgen]
pub fn progress_set_locale(code: &str) -> Result<(), JsValue> {
    with_session(|s| s.set_locale(code))
}

#[cfg(feature = "i18n")]
#[wasm_bindgen]
pub fn progress_locale() -> Result<String, JsValue> {
    with_session(|s| Ok(s.locale().code().to_owned()))
}

#[cfg(feature = "i18n")]
#[wasm_bindgen]
pub fn progress_is_rtl() -> Result<bool, JsValue> {
    with_session(|s| Ok(s.locale().is_rtl()))
}

#[cfg(feature = "i18n")]
#[wasm_bindgen]
pub fn progress_translate(key: &str) -> Result<String, JsValue> {
    with_session(|s| Ok(s.translate(key)))
}
