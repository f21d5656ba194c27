//! Shell-side UI state: open panels, reset confirmation, and transient
//! flashes. None of this is persisted; counters decay on the fixed UI tick.

/// UI animation rate for flash decay and the production spinner.
pub const UI_TICKS_PER_SEC: u32 = 10;

/// Ticks a click flash stays lit.
const CLICK_FLASH_TICKS: u32 = 3;
/// Ticks a purchase flash stays lit.
const PURCHASE_FLASH_TICKS: u32 = 6;
/// Window in which a second reset press counts as confirmation (3 seconds).
const RESET_CONFIRM_TICKS: u32 = 30;

#[derive(Debug, Default)]
pub struct UiState {
    pub show_shop: bool,
    pub show_stats: bool,
    /// Frame counter driving the coin art and spinner.
    pub anim_frame: u32,
    /// Ticks remaining of click feedback.
    pub click_flash: u32,
    /// Ticks remaining of purchase feedback.
    pub purchase_flash: u32,
    /// Ticks remaining in which a second reset press confirms.
    pub reset_armed: u32,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance animation counters by `delta` ticks.
    pub fn tick(&mut self, delta: u32) {
        if delta == 0 {
            return;
        }
        self.anim_frame = self.anim_frame.wrapping_add(delta);
        self.click_flash = self.click_flash.saturating_sub(delta);
        self.purchase_flash = self.purchase_flash.saturating_sub(delta);
        self.reset_armed = self.reset_armed.saturating_sub(delta);
    }

    pub fn flash_click(&mut self) {
        self.click_flash = CLICK_FLASH_TICKS;
    }

    pub fn flash_purchase(&mut self) {
        self.purchase_flash = PURCHASE_FLASH_TICKS;
    }

    /// First press arms a confirmation window; a press inside the window
    /// confirms. Returns `true` when the reset should actually run.
    pub fn confirm_reset(&mut self) -> bool {
        if self.reset_armed > 0 {
            self.reset_armed = 0;
            true
        } else {
            self.reset_armed = RESET_CONFIRM_TICKS;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashes_decay_on_tick() {
        let mut ui = UiState::new();
        ui.flash_click();
        ui.flash_purchase();
        ui.tick(2);
        assert_eq!(ui.click_flash, 1);
        ui.tick(10);
        assert_eq!(ui.click_flash, 0);
        assert_eq!(ui.purchase_flash, 0);
    }

    #[test]
    fn zero_ticks_change_nothing() {
        let mut ui = UiState::new();
        ui.flash_click();
        let frame = ui.anim_frame;
        ui.tick(0);
        assert_eq!(ui.click_flash, CLICK_FLASH_TICKS);
        assert_eq!(ui.anim_frame, frame);
    }

    #[test]
    fn reset_needs_a_second_press() {
        let mut ui = UiState::new();
        assert!(!ui.confirm_reset());
        assert!(ui.reset_armed > 0);
        assert!(ui.confirm_reset());
        assert_eq!(ui.reset_armed, 0);
    }

    #[test]
    fn reset_confirmation_expires() {
        let mut ui = UiState::new();
        assert!(!ui.confirm_reset());
        ui.tick(RESET_CONFIRM_TICKS);
        // Window elapsed: this press arms again instead of confirming.
        assert!(!ui.confirm_reset());
    }

    #[test]
    fn anim_frame_wraps_without_panicking() {
        let mut ui = UiState::new();
        ui.anim_frame = u32::MAX;
        ui.tick(2);
        assert_eq!(ui.anim_frame, 1);
    }
}
