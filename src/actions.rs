//! Semantic action IDs for NovaCoin click targets.
//!
//! Registered during render and dispatched by the shell's input handlers, so
//! keyboard and mouse/touch input converge on the same dispatch path.

// ── Core action ─────────────────────────────────────────────────
pub const CLICK_COIN: u16 = 0;

// ── Panels ──────────────────────────────────────────────────────
pub const TOGGLE_STATS: u16 = 10;
pub const OPEN_SHOP: u16 = 11;
pub const CLOSE_SHOP: u16 = 12;
pub const HARD_RESET: u16 = 13;

// ── Upgrade purchase (base + index into catalog::UPGRADES) ──────
pub const BUY_UPGRADE_BASE: u16 = 50;

// ── Item purchase (base + index into catalog::ITEMS) ────────────
pub const BUY_ITEM_BASE: u16 = 100;
