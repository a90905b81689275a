//! Storage encoding for the page's display preferences.

use crate::types::{DEFAULT_THEME, Preference};

pub const THEME_KEY: &str = "theme";
pub const DARK_KEY: &str = "dark";

/// The dark flag is stored as the literal strings `"true"` / `"false"`.
pub fn format_dark_flag(dark_mode: bool) -> &'static str {
    if dark_mode { "true" } else { "false" }
}

/// Storage entries for a preference, in the order they are written.
pub fn format_preference(preference: &Preference) -> [(&'static str, String); 2] {
    [
        (THEME_KEY, preference.theme.clone()),
        (DARK_KEY, format_dark_flag(preference.dark_mode).to_string()),
    ]
}

/// Decode stored values. A missing or empty theme falls back to the default;
/// anything other than exactly `"true"` is light mode.
pub fn parse_preference(theme: Option<String>, dark: Option<String>) -> Preference {
    let theme = theme
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());
    let dark_mode = dark.as_deref() == Some("true");
    Preference { theme, dark_mode }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let pref = parse_preference(None, None);
        assert_eq!(pref.theme, "ocean");
        assert!(!pref.dark_mode);
    }

    #[test]
    fn test_dark_flag_requires_exact_literal() {
        assert!(parse_preference(None, Some("true".into())).dark_mode);
        assert!(!parse_preference(None, Some("TRUE".into())).dark_mode);
        assert!(!parse_preference(None, Some("1".into())).dark_mode);
        assert!(!parse_preference(None, Some("false".into())).dark_mode);
    }

    #[test]
    fn test_empty_theme_uses_default() {
        let pref = parse_preference(Some(String::new()), None);
        assert_eq!(pref.theme, "ocean");
    }

    #[test]
    fn test_unknown_theme_is_kept() {
        let pref = parse_preference(Some("neon".into()), None);
        assert_eq!(pref.theme, "neon");
    }

    #[test]
    fn test_format_preference_entries() {
        let pref = Preference {
            theme: "sunset".into(),
            dark_mode: false,
        };
        let entries = format_preference(&pref);
        assert_eq!(entries[0], ("theme", "sunset".to_string()));
        assert_eq!(entries[1], ("dark", "false".to_string()));
    }
}
