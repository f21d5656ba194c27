//! Transaction engine: validates and executes clicks and purchases against
//! the shared save state, and notifies the presentation shell.
//!
//! Every rejected transaction is a deterministic no-op with a boolean
//! outcome. There is no error path visible to callers: the engine either
//! applies a mutation completely or leaves the state untouched.

use crate::catalog::{self, UpgradeDelta};
use crate::debounce::Debounce;
use crate::save;
use crate::scheduler::{ProductionScheduler, TimerCommand};
use crate::state::{ItemState, SaveState};

/// What a successful action should feel like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Click,
    Purchase,
}

/// Outward notifications from the engine to the presentation shell.
///
/// Methods default to no-ops so headless tests implement only what they
/// observe. The engine passes a state snapshot into the render signals so a
/// shell never has to re-borrow the engine from inside a callback.
pub trait Shell {
    /// Full re-render after any mutation.
    fn state_changed(&self, _state: &SaveState) {}
    /// Cheap balance-only redraw after a production tick.
    fn balance_changed(&self, _state: &SaveState) {}
    /// Sound / flash feedback on successful clicks and purchases.
    fn feedback(&self, _kind: Feedback) {}
    /// Arm or cancel the recurring production tick.
    fn production_timer(&self, _cmd: TimerCommand) {}
    /// Arm the debounced save timeout (at most one per quiet period).
    fn save_timer(&self) {}
}

/// The game core: one save state, one scheduler, one save gate, one shell.
pub struct Engine {
    state: SaveState,
    scheduler: ProductionScheduler,
    save_gate: Debounce,
    shell: Box<dyn Shell>,
}

impl Engine {
    /// Build the engine around a loaded (or fresh) save and run first-run
    /// setup: recompute derived values from the purchased set and arm the
    /// production tick when the save already owns producers.
    pub fn new(mut state: SaveState, shell: Box<dyn Shell>) -> Self {
        state.recompute_modifiers();
        let mut scheduler = ProductionScheduler::new();
        if let Some(cmd) = scheduler.rearm(&state) {
            shell.production_timer(cmd);
        }
        Self {
            state,
            scheduler,
            save_gate: Debounce::new(),
            shell,
        }
    }

    pub fn state(&self) -> &SaveState {
        &self.state
    }

    /// Grant one manual click: `floor(base_click_yield × click_multiplier)`
    /// coins. Always succeeds; returns the amount granted.
    pub fn apply_click(&mut self) -> u64 {
        let granted = self.state.click_yield();
        self.state.stats.balance += granted;
        self.state.stats.total_produced += granted;
        self.state.stats.total_clicks += 1;
        self.shell.feedback(Feedback::Click);
        self.shell.state_changed(&self.state);
        self.request_save();
        granted
    }

    /// Buy one level of an upgrade. Returns `false` without mutating when
    /// the id is unknown or the balance does not cover the cost.
    pub fn purchase_upgrade(&mut self, id: &str) -> bool {
        let def = match catalog::upgrade(id) {
            Some(def) => def,
            None => return false,
        };
        let cost = match self.state.upgrades.get(id) {
            Some(u) => u.cost,
            None => return false,
        };
        if self.state.stats.balance < cost {
            return false;
        }

        self.state.stats.balance -= cost;
        match def.delta {
            UpgradeDelta::ClickYield(amount) => self.state.stats.base_click_yield += amount,
            UpgradeDelta::ProducerUnit(producer_id) => {
                if let Some(p) = self.state.producers.get_mut(producer_id) {
                    p.count += 1;
                }
            }
        }
        if let Some(u) = self.state.upgrades.get_mut(id) {
            u.level += 1;
            u.cost = (cost as f64 * catalog::GROWTH_RATE).floor() as u64;
        }

        if matches!(def.delta, UpgradeDelta::ProducerUnit(_)) {
            self.rearm_production();
        }
        self.shell.feedback(Feedback::Purchase);
        self.shell.state_changed(&self.state);
        self.request_save();
        true
    }

    /// Buy a one-time item. Returns `false` without mutating when the item
    /// is unknown, already owned, still locked, or unaffordable. On success the
    /// full multiplier recompute runs and the production timer is re-armed
    /// (an item may change tick intervals).
    pub fn purchase_item(&mut self, id: &str) -> bool {
        let def = match catalog::item(id) {
            Some(def) => def,
            None => return false,
        };
        if self.state.item_purchased(id) {
            return false;
        }
        if self.state.stats.balance < def.price {
            return false;
        }
        if self.state.stats.total_produced < def.unlock_threshold {
            return false;
        }

        self.state.stats.balance -= def.price;
        match self.state.items.get_mut(id) {
            Some(item) => item.purchased = true,
            None => {
                self.state
                    .items
                    .insert(id.to_string(), ItemState { purchased: true });
            }
        }
        self.state.recompute_modifiers();
        self.rearm_production();
        self.shell.feedback(Feedback::Purchase);
        self.shell.state_changed(&self.state);
        self.request_save();
        true
    }

    /// Shop contents right now, in catalog order.
    pub fn available_items(&self) -> Vec<&'static catalog::ItemDef> {
        self.state.available_items()
    }

    /// One recurring production tick:
    /// `floor(producer count × production_multiplier)` coins. Missed ticks
    /// (e.g. a backgrounded tab) are never backfilled.
    pub fn production_tick(&mut self) -> u64 {
        let amount = self.state.production_per_tick();
        self.state.stats.balance += amount;
        self.state.stats.total_produced += amount;
        self.shell.balance_changed(&self.state);
        self.request_save();
        amount
    }

    /// Drop the persisted record and return to first-run defaults, as if the
    /// game had never been played. The fresh record is persisted immediately.
    pub fn hard_reset(&mut self) {
        save::clear();
        self.state = SaveState::first_run();
        self.state.recompute_modifiers();
        self.save_gate = Debounce::new();
        if let Some(cmd) = self.scheduler.rearm(&self.state) {
            self.shell.production_timer(cmd);
        }
        save::persist(&self.state);
        self.shell.state_changed(&self.state);
    }

    /// The debounce window elapsed: write the save synchronously.
    pub fn flush_save(&mut self) {
        self.save_gate.fire();
        save::persist(&self.state);
    }

    fn request_save(&mut self) {
        if self.save_gate.request() {
            self.shell.save_timer();
        }
    }

    fn rearm_production(&mut self) {
        if let Some(cmd) = self.scheduler.rearm(&self.state) {
            self.shell.production_timer(cmd);
        }
    }
}
