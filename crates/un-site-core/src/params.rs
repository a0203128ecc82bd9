//! URL query parameters observed by the page.

use crate::theme::ThemePreference;

/// `?source=mobile` embeds the page in a native shell: shared chrome
/// (header/footer) is suppressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChromeMode {
    #[default]
    Full,
    Embedded,
}

pub fn chrome_mode(source: Option<&str>) -> ChromeMode {
    match source {
        Some(s) if s.eq_ignore_ascii_case("mobile") => ChromeMode::Embedded,
        _ => ChromeMode::Full,
    }
}

/// `?theme=` overrides and persists the stored preference when it names
/// a valid value; anything else is ignored.
pub fn theme_override(raw: Option<&str>) -> Option<ThemePreference> {
    raw?.to_ascii_lowercase().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_source_embeds() {
        assert_eq!(chrome_mode(Some("mobile")), ChromeMode::Embedded);
        assert_eq!(chrome_mode(Some("MOBILE")), ChromeMode::Embedded);
    }

    #[test]
    fn other_sources_keep_chrome() {
        assert_eq!(chrome_mode(None), ChromeMode::Full);
        assert_eq!(chrome_mode(Some("web")), ChromeMode::Full);
        assert_eq!(chrome_mode(Some("")), ChromeMode::Full);
    }

    #[test]
    fn valid_theme_param_overrides() {
        assert_eq!(theme_override(Some("light")), Some(ThemePreference::Light));
        assert_eq!(theme_override(Some("Dark")), Some(ThemePreference::Dark));
        assert_eq!(theme_override(Some("SYSTEM")), Some(ThemePreference::System));
    }

    #[test]
    fn invalid_theme_param_is_ignored() {
        assert_eq!(theme_override(None), None);
        assert_eq!(theme_override(Some("neon")), None);
        assert_eq!(theme_override(Some("")), None);
    }
}
