//! Color theme state, as far as the search surface cares about it.
//!
//! The theme-toggle quick action needs to know the current mode (its label
//! and icon invert) and needs a way to flip it. Rendering the theme is the
//! host application's business.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn inverted(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Shared current theme mode.
#[derive(Debug, Default)]
pub struct ThemeState {
    mode: RwLock<ThemeMode>,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        ThemeState {
            mode: RwLock::new(mode),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.read()
    }

    pub fn is_dark(&self) -> bool {
        self.mode() == ThemeMode::Dark
    }

    /// Flip the mode and return the new one.
    pub fn toggle(&self) -> ThemeMode {
        let mut mode = self.mode.write();
        *mode = mode.inverted();
        *mode
    }
}
