use types::{ThemeKind, WidgetConfig};

const DARK_TEXT: &str = "#e0e0e0";
const DARK_BACKGROUND: &str = "#0f0f14";
const DARK_ROW_BACKGROUND: &str = "rgba(0, 0, 0, 0.3)";
const LIGHT_TEXT: &str = "#1a1a1a";
const LIGHT_BACKGROUND: &str = "#ffffff";
const LIGHT_ROW_BACKGROUND: &str = "rgba(0, 0, 0, 0.05)";

/// Styling parameters of a widget.
///
/// Only affects how rows look, never which rows exist. Explicit background
/// and text colors apply to the container; rows keep the `dark_mode`
/// palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme<'a> {
    pub kind: ThemeKind,
    pub accent_color: &'a str,
    pub dark_mode: bool,
    pub background_color: Option<&'a str>,
    pub text_color: Option<&'a str>,
    pub border_radius: u32,
    pub border_style: &'a str,
    pub shadow_intensity: u32,
    pub font_family: &'a str,
}

impl<'a> From<&'a WidgetConfig> for Theme<'a> {
    fn from(config: &'a WidgetConfig) -> Self {
        Self {
            kind: config.theme,
            accent_color: &config.accent_color,
            dark_mode: config.dark_mode,
            background_color: config.background_color.as_deref(),
            text_color: config.text_color.as_deref(),
            border_radius: config.border_radius,
            border_style: &config.border_style,
            shadow_intensity: config.shadow_intensity,
            font_family: &config.font_family,
        }
    }
}

impl Theme<'_> {
    const fn palette_text(&self) -> &'static str {
        if self.dark_mode { DARK_TEXT } else { LIGHT_TEXT }
    }

    const fn palette_background(&self) -> &'static str {
        if self.dark_mode {
            DARK_BACKGROUND
        } else {
            LIGHT_BACKGROUND
        }
    }

    const fn row_background(&self) -> &'static str {
        if self.dark_mode {
            DARK_ROW_BACKGROUND
        } else {
            LIGHT_ROW_BACKGROUND
        }
    }

    /// Glow blur radius in pixels.
    const fn shadow_blur(&self) -> u32 {
        20 + self.shadow_intensity / 5
    }

    pub(crate) fn container_class(&self) -> String {
        format!(
            "sw-widget sw-theme-{} sw-{}",
            self.kind,
            if self.dark_mode { "dark" } else { "light" }
        )
    }

    pub(crate) fn container_style(&self) -> String {
        format!(
            "font-family: {}; background: {}; color: {}; \
             border: 2px {} {}; border-radius: {}px; \
             box-shadow: 0 0 {}px {}40; padding: 16px;",
            self.font_family,
            self.background_color.unwrap_or(self.palette_background()),
            self.text_color.unwrap_or(self.palette_text()),
            self.border_style,
            self.accent_color,
            self.border_radius,
            self.shadow_blur(),
            self.accent_color
        )
    }

    pub(crate) fn row_style(&self) -> String {
        format!(
            "display: flex; justify-content: space-between; padding: 8px 12px; \
             margin-bottom: 8px; background: {}; color: {}; \
             border-left: 3px solid {}; border-radius: 8px;",
            self.row_background(),
            self.palette_text(),
            self.accent_color
        )
    }

    pub(crate) fn title_style(&self) -> String {
        format!("color: {}; font-weight: 700; margin: 0;", self.accent_color)
    }

    pub(crate) fn badge_style(&self) -> String {
        format!(
            "display: inline-block; background: {}; color: #000; \
             border-radius: 8px; padding: 4px 8px; font-weight: 700;",
            self.accent_color
        )
    }
}
