//! Light/dark theme selection.
//!
//! The active theme is seeded from the logged-in user's profile
//! preference and can be toggled from the account page. Rendering
//! resolves colors through `ui::styles` with the active theme.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_wire_format() {
        // Profile payloads carry the theme as a lowercase string
        assert_eq!(serde_json::to_string(&Theme::Dark).expect("serialize"), r#""dark""#);
        let parsed: Theme = serde_json::from_str(r#""light""#).expect("parse");
        assert_eq!(parsed, Theme::Light);
    }
}
