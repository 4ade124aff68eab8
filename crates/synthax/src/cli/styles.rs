//! Styles for the Synthax CLI.
//!
//! Render code works with semantic names only (a title, a timestamp, a success
//! message) and never with raw colors. Each [`Theme`] maps those names to concrete
//! `console` styles, so the light and dark palettes differ only here.
//!
//! The palette follows the theme saved by `synthax theme`. Before one has been
//! saved, the terminal's own mode is detected with `dark-light`.
//!
//! `console` drops all styling when stdout is not a terminal, so piped output and
//! tests see plain text.

use console::Style;
use synthaxapp::state::theme::Theme;

/// Semantic styles shared by every renderer.
#[derive(Debug, Clone)]
pub struct Palette {
    pub regular: Style,
    pub muted: Style,
    pub title: Style,
    pub accent: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub time: Style,
    pub tag: Style,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => build_light_palette(),
            Theme::Dark => build_dark_palette(),
        }
    }
}

/// The terminal's mode, used only until a theme has been saved.
pub fn detect_terminal_theme() -> Theme {
    match dark_light::detect() {
        dark_light::Mode::Light => Theme::Light,
        _ => Theme::Dark,
    }
}

fn build_light_palette() -> Palette {
    let regular = Style::new().black();
    let muted = Style::new().color256(243);
    Palette {
        title: regular.clone().bold(),
        accent: Style::new().color256(136).bold(), // dark gold
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
        error: Style::new().red().bold(),
        time: muted.clone().italic(),
        tag: Style::new().blue(),
        regular,
        muted,
    }
}

fn build_dark_palette() -> Palette {
    let regular = Style::new().white();
    let muted = Style::new().color256(249);
    Palette {
        title: regular.clone().bold(),
        accent: Style::new().color256(220).bold(), // yellow
        success: Style::new().green(),
        warning: Style::new().yellow().bold(),
        error: Style::new().red().bold(),
        time: muted.clone().italic(),
        tag: Style::new().cyan(),
        regular,
        muted,
    }
}
