use snackbar_config::ToastKind;
use tracing::warn;

/// RGBA color (values 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Accent colors for the fixed toast kinds
pub mod kind_colors {
    use super::Color;

    /// Neutral fallback when no kind is set or the name is unrecognized
    pub const NEUTRAL: Color = Color::new(0.5, 0.5, 0.5, 0.7);

    /// Informational - accent blue
    pub const INFO: Color = Color::rgb(0.2, 0.6, 1.0);

    /// Success - confirmation green
    pub const SUCCESS: Color = Color::rgb(0.25, 0.75, 0.4);

    /// Warning - amber
    pub const WARNING: Color = Color::rgb(1.0, 0.7, 0.15);

    /// Error - alert red
    pub const ERROR: Color = Color::rgb(1.0, 0.3, 0.3);
}

/// Get the accent color for a toast kind
pub fn kind_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Info => kind_colors::INFO,
        ToastKind::Success => kind_colors::SUCCESS,
        ToastKind::Warning => kind_colors::WARNING,
        ToastKind::Error => kind_colors::ERROR,
    }
}

/// Accent color for an optional kind; absent falls back to neutral
pub fn accent_color(kind: Option<ToastKind>) -> Color {
    kind.map(kind_color).unwrap_or(kind_colors::NEUTRAL)
}

/// Parse a kind name from untyped host data.
///
/// Unrecognized names are a recoverable condition: logged, then treated as
/// no kind at all (neutral color, no icon).
pub fn parse_kind(name: &str) -> Option<ToastKind> {
    match name {
        "info" => Some(ToastKind::Info),
        "success" => Some(ToastKind::Success),
        "warning" => Some(ToastKind::Warning),
        "error" => Some(ToastKind::Error),
        other => {
            warn!("Unrecognized toast kind: {}", other);
            None
        }
    }
}

/// Get a suggested icon name for a toast kind
pub fn kind_icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Info => "dialog-information-symbolic",
        ToastKind::Success => "emblem-ok-symbolic",
        ToastKind::Warning => "dialog-warning-symbolic",
        ToastKind::Error => "dialog-error-symbolic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_color_info() {
        let color = kind_color(ToastKind::Info);
        assert_eq!(color, kind_colors::INFO);
    }

    #[test]
    fn test_kind_color_error() {
        let color = kind_color(ToastKind::Error);
        assert_eq!(color, kind_colors::ERROR);
        assert!(color.r > 0.5); // Errors should be reddish
    }

    #[test]
    fn test_accent_color_fallback() {
        assert_eq!(accent_color(None), kind_colors::NEUTRAL);
        assert!(accent_color(None).a < 1.0); // Neutral should be muted
        assert_eq!(accent_color(Some(ToastKind::Success)), kind_colors::SUCCESS);
    }

    #[test]
    fn test_parse_kind_known() {
        assert_eq!(parse_kind("info"), Some(ToastKind::Info));
        assert_eq!(parse_kind("success"), Some(ToastKind::Success));
        assert_eq!(parse_kind("warning"), Some(ToastKind::Warning));
        assert_eq!(parse_kind("error"), Some(ToastKind::Error));
    }

    #[test]
    fn test_parse_kind_unknown() {
        assert_eq!(parse_kind("fatal"), None);
        assert_eq!(parse_kind(""), None);
        // Lookup is exact; the serde names are lowercase
        assert_eq!(parse_kind("Info"), None);
    }

    #[test]
    fn test_kind_icon() {
        assert_eq!(kind_icon(ToastKind::Warning), "dialog-warning-symbolic");
        assert_eq!(kind_icon(ToastKind::Error), "dialog-error-symbolic");
    }

    #[test]
    fn test_color_constructors() {
        let rgba = Color::new(1.0, 0.5, 0.0, 0.8);
        assert_eq!(rgba.a, 0.8);

        let rgb = Color::rgb(1.0, 0.5, 0.0);
        assert_eq!(rgb.a, 1.0);
    }
}
