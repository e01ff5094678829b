//! Colour themes cycled by the theme button.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Night,
    Retro,
    Nuclear,
}

impl Theme {
    const CYCLE: [Theme; 4] = [Theme::Default, Theme::Night, Theme::Retro, Theme::Nuclear];

    /// Next theme in the cycle, wrapping back to the default.
    pub fn next(self) -> Theme {
        let idx = Self::CYCLE.iter().position(|t| *t == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Night => "night",
            Theme::Retro => "retro",
            Theme::Nuclear => "nuclear",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Default => "Classic Springfield",
            Theme::Night => "Night Mode",
            Theme::Retro => "Retro 90s",
            Theme::Nuclear => "Nuclear Glow",
        }
    }

    /// Body class for this theme. The default theme carries none.
    pub fn body_class(self) -> Option<String> {
        match self {
            Theme::Default => None,
            other => Some(format!("theme-{}", other.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps() {
        assert_eq!(Theme::Default.next(), Theme::Night);
        assert_eq!(Theme::Night.next(), Theme::Retro);
        assert_eq!(Theme::Retro.next(), Theme::Nuclear);
        assert_eq!(Theme::Nuclear.next(), Theme::Default);
    }

    #[test]
    fn body_classes() {
        assert_eq!(Theme::Default.body_class(), None);
        assert_eq!(Theme::Retro.body_class().as_deref(), Some("theme-retro"));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Theme::Nuclear).unwrap(), "\"nuclear\"");
        let t: Theme = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(t, Theme::Night);
        assert!(serde_json::from_str::<Theme>("\"disco\"").is_err());
    }
}
