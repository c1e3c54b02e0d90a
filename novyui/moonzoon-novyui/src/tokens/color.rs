// Color tokens as theme-reactive signals

use super::theme::{Theme, theme};
use zoon::*;

/// One color token: its value in each theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorToken {
    pub light: &'static str,
    pub dark: &'static str,
}

impl ColorToken {
    pub const fn new(light: &'static str, dark: &'static str) -> Self {
        Self { light, dark }
    }

    pub fn resolve(self, theme: Theme) -> &'static str {
        match theme {
            Theme::Light => self.light,
            Theme::Dark => self.dark,
        }
    }

    pub fn signal(self) -> impl Signal<Item = &'static str> {
        theme().map(move |theme| self.resolve(theme))
    }
}

pub const PRIMARY_3: ColorToken = ColorToken::new("oklch(90% 0.05 250)", "oklch(30% 0.05 250)");
pub const PRIMARY_7: ColorToken = ColorToken::new("oklch(55% 0.16 250)", "oklch(65% 0.16 250)");
pub const NEUTRAL_1: ColorToken = ColorToken::new("oklch(99% 0.025 255)", "oklch(12% 0.025 255)");
pub const NEUTRAL_3: ColorToken = ColorToken::new("oklch(95% 0.025 255)", "oklch(22% 0.025 255)");
pub const NEUTRAL_5: ColorToken = ColorToken::new("oklch(75% 0.025 255)", "oklch(40% 0.025 255)");
pub const NEUTRAL_8: ColorToken = ColorToken::new("oklch(45% 0.025 255)", "oklch(70% 0.025 255)");
pub const NEUTRAL_11: ColorToken = ColorToken::new("oklch(20% 0.025 255)", "oklch(92% 0.025 255)");

pub fn primary_7() -> impl Signal<Item = &'static str> {
    PRIMARY_7.signal()
}

pub fn neutral_1() -> impl Signal<Item = &'static str> {
    NEUTRAL_1.signal()
}

pub fn neutral_3() -> impl Signal<Item = &'static str> {
    NEUTRAL_3.signal()
}

pub fn neutral_5() -> impl Signal<Item = &'static str> {
    NEUTRAL_5.signal()
}

pub fn neutral_8() -> impl Signal<Item = &'static str> {
    NEUTRAL_8.signal()
}

pub fn neutral_11() -> impl Signal<Item = &'static str> {
    NEUTRAL_11.signal()
}
