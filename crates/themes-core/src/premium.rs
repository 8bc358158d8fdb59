//! Premium classification and stylesheet helpers.

use crate::config::ThemesConfig;
use crate::json::is_truthy;
use crate::models::Theme;

/// Whether the theme's stylesheet marks it as premium.
pub fn is_premium(theme: &Theme) -> bool {
    theme
        .stylesheet
        .as_deref()
        .is_some_and(|s| s.starts_with(ThemesConfig::PREMIUM_STYLESHEET_PREFIX))
}

/// Premium check that also accepts a missing theme and falls back to cost
/// data for endpoints that omit the stylesheet.
pub fn is_premium_theme(theme: Option<&Theme>) -> bool {
    let Some(theme) = theme else {
        return false;
    };

    if is_premium(theme) {
        return true;
    }

    theme
        .cost
        .as_ref()
        .and_then(|cost| cost.number.as_ref())
        .is_some_and(is_truthy)
}

/// Theme id from an `owner/slug` stylesheet.
///
/// Returns the segment after the first `/`, or the stylesheet unchanged when
/// there is no such segment.
///
/// # Examples
///
/// ```
/// use themes_core::get_theme_id_from_stylesheet;
///
/// assert_eq!(get_theme_id_from_stylesheet("pub/twentysixteen"), "twentysixteen");
/// assert_eq!(get_theme_id_from_stylesheet("twentysixteen"), "twentysixteen");
/// ```
pub fn get_theme_id_from_stylesheet(stylesheet: &str) -> &str {
    match stylesheet.split('/').nth(1) {
        Some(slug) if !slug.is_empty() => slug,
        _ => stylesheet,
    }
}
