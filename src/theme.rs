use colors_transform::{Color, Rgb};

use crate::error::{ClockError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub face: &'static str,
    pub hour_hand: &'static str,
    pub minute_hand: &'static str,
    pub second_hand: &'static str,
    pub marker: &'static str,
    pub center: &'static str,
}

/// Gold on black, used when a face is built without a theme.
pub const DEFAULT_THEME: Theme = Theme {
    background: "#000000",
    face: "#ffd700",
    hour_hand: "#ffd700",
    minute_hand: "#ffffff",
    second_hand: "#ff0000",
    marker: "#ffd700",
    center: "#ffd700",
};

pub const PALETTE: [Theme; 10] = [
    // Gold
    DEFAULT_THEME,
    // Silver on midnight
    Theme {
        background: "#001f3f",
        face: "#c0c0c0",
        hour_hand: "#c0c0c0",
        minute_hand: "#ffffff",
        second_hand: "#00ffff",
        marker: "#c0c0c0",
        center: "#c0c0c0",
    },
    // Bronze on maroon
    Theme {
        background: "#800000",
        face: "#cd7f32",
        hour_hand: "#cd7f32",
        minute_hand: "#ffffff",
        second_hand: "#ffa500",
        marker: "#cd7f32",
        center: "#cd7f32",
    },
    // Emerald
    Theme {
        background: "#013220",
        face: "#50c878",
        hour_hand: "#50c878",
        minute_hand: "#90ee90",
        second_hand: "#00ff00",
        marker: "#50c878",
        center: "#50c878",
    },
    // Magenta on purple
    Theme {
        background: "#a020f0",
        face: "#ff00ff",
        hour_hand: "#ff00ff",
        minute_hand: "#ffffff",
        second_hand: "#ffc0cb",
        marker: "#ff00ff",
        center: "#ff00ff",
    },
    // Slate
    Theme {
        background: "#a9a9a9",
        face: "#d3d3d3",
        hour_hand: "#ffffff",
        minute_hand: "#add8e6",
        second_hand: "#ff0000",
        marker: "#d3d3d3",
        center: "#ffffff",
    },
    // Gold on navy
    Theme {
        background: "#000080",
        face: "#ffd700",
        hour_hand: "#ffd700",
        minute_hand: "#ffffff",
        second_hand: "#ff0000",
        marker: "#ffd700",
        center: "#ffd700",
    },
    // Ember
    Theme {
        background: "#000000",
        face: "#ff0000",
        hour_hand: "#ff0000",
        minute_hand: "#ffa500",
        second_hand: "#ffff00",
        marker: "#ff0000",
        center: "#ff0000",
    },
    // Papyrus
    Theme {
        background: "#654321",
        face: "#d2b48c",
        hour_hand: "#d2b48c",
        minute_hand: "#ffffff",
        second_hand: "#ffa500",
        marker: "#d2b48c",
        center: "#d2b48c",
    },
    // Silver on midnight blue
    Theme {
        background: "#191970",
        face: "#c0c0c0",
        hour_hand: "#c0c0c0",
        minute_hand: "#add8e6",
        second_hand: "#00ffff",
        marker: "#c0c0c0",
        center: "#c0c0c0",
    },
];

impl Default for Theme {
    fn default() -> Self {
        DEFAULT_THEME
    }
}

/// Resolve a hex literal from a theme into a color.
pub fn parse_color(hex: &str) -> Result<Rgb> {
    Rgb::from_hex_str(hex).map_err(|_| ClockError::InvalidColor(hex.to_string()))
}

/// A theme whose colors have been parsed once.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedTheme {
    pub background: Rgb,
    pub face: Rgb,
    pub hour_hand: Rgb,
    pub minute_hand: Rgb,
    pub second_hand: Rgb,
    pub marker: Rgb,
    pub center: Rgb,
}

impl Theme {
    pub fn resolve(&self) -> Result<ResolvedTheme> {
        Ok(ResolvedTheme {
            background: parse_color(self.background)?,
            face: parse_color(self.face)?,
            hour_hand: parse_color(self.hour_hand)?,
            minute_hand: parse_color(self.minute_hand)?,
            second_hand: parse_color(self.second_hand)?,
            marker: parse_color(self.marker)?,
            center: parse_color(self.center)?,
        })
    }
}
