mod actions;
mod catalog;
mod debounce;
mod engine;
mod input;
mod render;
mod save;
mod scheduler;
mod state;
mod time;
mod timers;
mod ui;
mod widgets;

use std::cell::RefCell;
use std::io;
use std::rc::{Rc, Weak};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use engine::{Engine, Feedback, Shell};
use input::ClickState;
use scheduler::TimerCommand;
use state::SaveState;
use time::FrameClock;
use timers::{Interval, Timeout};
use ui::UiState;

/// Presentation shell: owns the live browser timer handles, the transient UI
/// feedback, and audio. Reacts to engine signals; never mutates game state.
struct WebShell {
    engine: Weak<RefCell<Engine>>,
    ui: Rc<RefCell<UiState>>,
    /// At most one live production interval. Replacing the slot cancels the
    /// previous timer via its Drop impl.
    production: RefCell<Option<Interval>>,
    /// At most one pending debounced save.
    save_timeout: RefCell<Option<Timeout>>,
    audio: Option<web_sys::HtmlAudioElement>,
}

impl WebShell {
    fn new(engine: Weak<RefCell<Engine>>, ui: Rc<RefCell<UiState>>) -> Self {
        let audio = web_sys::HtmlAudioElement::new_with_src("sfx/coin-click.mp3").ok();
        if let Some(audio) = &audio {
            audio.set_volume(0.3);
        }
        Self {
            engine,
            ui,
            production: RefCell::new(None),
            save_timeout: RefCell::new(None),
            audio,
        }
    }

    fn update_title(&self, state: &SaveState) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(&format!(
                "{} NC | NovaCoin",
                render::format_number(state.stats.balance)
            ));
        }
    }

    fn play_feedback_sound(&self) {
        if let Some(audio) = &self.audio {
            audio.set_current_time(0.0);
            let _ = audio.play();
        }
    }
}

impl Shell for WebShell {
    fn state_changed(&self, state: &SaveState) {
        self.update_title(state);
    }

    fn balance_changed(&self, state: &SaveState) {
        self.update_title(state);
    }

    fn feedback(&self, kind: Feedback) {
        {
            let mut ui = self.ui.borrow_mut();
            match kind {
                Feedback::Click => ui.flash_click(),
                Feedback::Purchase => ui.flash_purchase(),
            }
        }
        self.play_feedback_sound();
    }

    fn production_timer(&self, cmd: TimerCommand) {
        // Cancel the previous handle before arming anything new.
        self.production.borrow_mut().take();
        if let TimerCommand::Restart { interval_ms } = cmd {
            let engine = self.engine.clone();
            *self.production.borrow_mut() = Interval::new(interval_ms, move || {
                if let Some(engine) = engine.upgrade() {
                    engine.borrow_mut().production_tick();
                }
            });
        }
    }

    fn save_timer(&self) {
        let engine = self.engine.clone();
        *self.save_timeout.borrow_mut() = Timeout::new(save::SAVE_DEBOUNCE_MS, move || {
            if let Some(engine) = engine.upgrade() {
                engine.borrow_mut().flush_save();
            }
        });
    }
}

/// Route a semantic action to the engine or the UI state. Borrows are scoped
/// statement-by-statement so engine signals can re-enter the UI state.
fn dispatch_action(engine: &Rc<RefCell<Engine>>, ui: &Rc<RefCell<UiState>>, action: u16) {
    match action {
        actions::CLICK_COIN => {
            engine.borrow_mut().apply_click();
        }
        actions::TOGGLE_STATS => {
            let mut ui = ui.borrow_mut();
            ui.show_stats = !ui.show_stats;
        }
        actions::OPEN_SHOP => ui.borrow_mut().show_shop = true,
        actions::CLOSE_SHOP => ui.borrow_mut().show_shop = false,
        actions::HARD_RESET => {
            let confirmed = ui.borrow_mut().confirm_reset();
            if confirmed {
                engine.borrow_mut().hard_reset();
                ui.borrow_mut().show_shop = false;
            }
        }
        a if (actions::BUY_UPGRADE_BASE..actions::BUY_ITEM_BASE).contains(&a) => {
            let idx = (a - actions::BUY_UPGRADE_BASE) as usize;
            if let Some(def) = catalog::UPGRADES.get(idx) {
                engine.borrow_mut().purchase_upgrade(def.id);
            }
        }
        a if a >= actions::BUY_ITEM_BASE => {
            let idx = (a - actions::BUY_ITEM_BASE) as usize;
            if let Some(def) = catalog::ITEMS.get(idx) {
                engine.borrow_mut().purchase_item(def.id);
            }
        }
        _ => {}
    }
}

/// Map a key press to a semantic action, honoring the open panel.
fn action_for_key(code: KeyCode, ui: &UiState, engine: &Engine) -> Option<u16> {
    match code {
        KeyCode::Esc if ui.show_shop => Some(actions::CLOSE_SHOP),
        KeyCode::Char(c) => match c {
            // While the shop is open, its item keys win over 'c'.
            k @ 'a'..='f' if ui.show_shop => {
                let idx = (k as u8 - b'a') as usize;
                let id = engine.available_items().get(idx).map(|d| d.id)?;
                let catalog_idx = catalog::ITEMS.iter().position(|d| d.id == id)?;
                Some(actions::BUY_ITEM_BASE + catalog_idx as u16)
            }
            'c' | ' ' => Some(actions::CLICK_COIN),
            's' => Some(if ui.show_shop {
                actions::CLOSE_SHOP
            } else {
                actions::OPEN_SHOP
            }),
            't' => Some(actions::TOGGLE_STATS),
            'r' => Some(actions::HARD_RESET),
            d @ '1'..='9' => {
                let idx = (d as u8 - b'1') as usize;
                if idx < catalog::UPGRADES.len() {
                    Some(actions::BUY_UPGRADE_BASE + idx as u16)
                } else {
                    None
                }
            }
            _ => None,
        },
        _ => None,
    }
}

/// Query the grid container's bounding rect and resolve a DOM click to a
/// registered action.
fn dom_click_to_action(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let (col, row) = input::pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.cols,
        cs.rows,
    )?;
    cs.hit_test(col, row)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let ui = Rc::new(RefCell::new(UiState::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    let engine = Rc::new_cyclic(|weak: &Weak<RefCell<Engine>>| {
        let shell = WebShell::new(weak.clone(), ui.clone());
        RefCell::new(Engine::new(save::load(), Box::new(shell)))
    });

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Keyboard handler
    terminal.on_key_event({
        let engine = engine.clone();
        let ui = ui.clone();
        move |key_event| {
            let action = {
                let ui_ref = ui.borrow();
                let engine_ref = engine.borrow();
                action_for_key(key_event.code, &ui_ref, &engine_ref)
            };
            if let Some(action) = action {
                dispatch_action(&engine, &ui, action);
            }
        }
    });

    // Mouse/touch handler
    terminal.on_mouse_event({
        let engine = engine.clone();
        let ui = ui.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }
            let action = {
                let cs = click_state.borrow();
                if cs.cols == 0 || cs.rows == 0 {
                    return;
                }
                dom_click_to_action(mouse_event.x, mouse_event.y, &cs)
            };
            if let Some(action) = action {
                dispatch_action(&engine, &ui, action);
            }
        }
    });

    // Render loop: fixed-timestep UI animation over a per-frame redraw.
    let clock = RefCell::new(FrameClock::new(ui::UI_TICKS_PER_SEC));
    terminal.draw_web({
        let engine = engine.clone();
        let ui = ui.clone();
        let click_state = click_state.clone();
        move |f| {
            let now_ms = web_sys::window()
                .and_then(|w| w.performance())
                .map(|p| p.now())
                .unwrap_or(0.0);
            let ticks = clock.borrow_mut().update(now_ms);

            let mut ui_ref = ui.borrow_mut();
            ui_ref.tick(ticks);

            let engine_ref = engine.borrow();
            let mut cs = click_state.borrow_mut();
            let area = f.area();
            cs.cols = area.width;
            cs.rows = area.height;
            cs.clear_targets();
            render::render(engine_ref.state(), &ui_ref, f, area, &mut cs);
        }
    });

    Ok(())
}
