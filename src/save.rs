//! NovaCoin セーブ/ロードとスキーマ移行。
//!
//! ## バージョニング方針
//!
//! - `SCHEMA_VERSION`: 現在のセーブ形式バージョン。フィールドやカタログキーの
//!   追加時にインクリメントする。
//! - 旧バージョンのセーブデータは拒否しない。不足フィールドは serde の
//!   default で、不足マップキー（後から追加されたアップグレード等）は
//!   [`merge_defaults`] で補完して読み込む（前方マージ）。ユーザーの既存値は
//!   決して上書きしない。
//! - 破損したデータは警告を出して破棄し、初期状態で続行する。呼び出し側に
//!   エラーは返さない。

use crate::catalog;
use crate::state::{ItemState, ProducerState, SaveState, UpgradeState};

/// Current save format version. v1 predates the item shop.
pub const SCHEMA_VERSION: u32 = 2;

/// localStorage のキー。
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "nova_coin_save";

/// Quiet period for coalescing bursts of mutations into one write.
pub const SAVE_DEBOUNCE_MS: u32 = 250;

/// Backfill every catalog-known map key missing from `state`.
///
/// This is the key-half of forward migration (the field-half is
/// `#[serde(default)]` on the persisted structs): entries introduced after a
/// record was written are inserted at their catalog defaults, existing
/// entries are left untouched.
pub fn merge_defaults(state: &mut SaveState) {
    for def in catalog::UPGRADES {
        state.upgrades.entry(def.id.to_string()).or_insert(UpgradeState {
            cost: def.base_cost,
            level: 0,
        });
    }
    for def in catalog::PRODUCERS {
        state.producers.entry(def.id.to_string()).or_insert(ProducerState {
            count: 0,
            interval_ms: def.base_interval_ms,
        });
    }
    for def in catalog::ITEMS {
        state
            .items
            .entry(def.id.to_string())
            .or_insert(ItemState { purchased: false });
    }
}

/// Forward-merge a parsed record onto the current schema and stamp the
/// version. Never rejects a record for being old.
#[cfg(any(target_arch = "wasm32", test))]
pub fn merge_forward(mut parsed: SaveState) -> SaveState {
    merge_defaults(&mut parsed);
    parsed.schema_version = SCHEMA_VERSION;
    parsed
}

/// Serialize the full save record.
#[cfg(any(target_arch = "wasm32", test))]
pub fn encode(state: &SaveState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Parse raw bytes and forward-merge them. `None` when unparsable; the
/// caller substitutes first-run defaults. (The storage-backed [`load`] keeps
/// its own parse step so corruption can be logged with detail.)
#[cfg(test)]
pub fn decode_merged(raw: &str) -> Option<SaveState> {
    let parsed: SaveState = serde_json::from_str(raw).ok()?;
    Some(merge_forward(parsed))
}

/// localStorage にアクセスする。WASM 環境でのみ動作。
#[cfg(target_arch = "wasm32")]
fn get_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load the persisted record, falling back to first-run defaults when the
/// record is absent, unparsable, or storage is unavailable. Corruption is a
/// console warning, never an error to the caller.
pub fn load() -> SaveState {
    #[cfg(target_arch = "wasm32")]
    {
        load_from_storage()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        SaveState::first_run()
    }
}

#[cfg(target_arch = "wasm32")]
fn load_from_storage() -> SaveState {
    use web_sys::console;

    let storage = match get_storage() {
        Some(s) => s,
        None => return SaveState::first_run(),
    };
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        _ => return SaveState::first_run(),
    };

    let parsed: SaveState = match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            console::warn_1(
                &format!("NovaCoin: セーブデータのパースに失敗（破棄します）: {e}").into(),
            );
            let _ = storage.remove_item(STORAGE_KEY);
            return SaveState::first_run();
        }
    };

    if parsed.schema_version < SCHEMA_VERSION {
        console::log_1(
            &format!(
                "NovaCoin: 旧バージョンのセーブデータを前方マージ (saved={}, current={})。",
                parsed.schema_version, SCHEMA_VERSION
            )
            .into(),
        );
    }

    merge_forward(parsed)
}

/// Serialize and write the record synchronously. Storage failures (quota,
/// unavailable backend) are logged and swallowed: the session continues with
/// its in-memory state.
pub fn persist(state: &SaveState) {
    #[cfg(target_arch = "wasm32")]
    {
        use web_sys::console;

        let json = match encode(state) {
            Ok(json) => json,
            Err(e) => {
                console::warn_1(&format!("NovaCoin: セーブのシリアライズに失敗: {e}").into());
                return;
            }
        };
        if let Some(storage) = get_storage() {
            if let Err(e) = storage.set_item(STORAGE_KEY, &json) {
                console::warn_1(
                    &format!("NovaCoin: localStorage への保存に失敗: {e:?}").into(),
                );
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = state;
    }
}

/// Remove the persisted record (hard reset).
pub fn clear() {
    #[cfg(target_arch = "wasm32")]
    if let Some(storage) = get_storage() {
        let _ = storage.remove_item(STORAGE_KEY);
    }
}
