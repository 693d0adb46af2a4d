// Dark/light theme and the colours each one selects.

use serde::{Deserialize, Serialize};

use crate::types::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Colours used while a theme is active
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Points and connection lines
    pub accent: Rgb,
    /// Page colour the canvas is cleared to
    pub background: Rgb,
}

/// Theme configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme active at startup
    pub initial: Theme,
    pub dark: Palette,
    pub light: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            initial: Theme::Dark,
            dark: Palette { accent: Rgb(217, 70, 239), background: Rgb(9, 9, 11) },
            light: Palette { accent: Rgb(139, 92, 246), background: Rgb(250, 250, 250) },
        }
    }
}

impl ThemeConfig {
    pub fn palette(&self, theme: Theme) -> Palette {
        match theme {
            Theme::Dark => self.dark,
            Theme::Light => self.light,
        }
    }
}
