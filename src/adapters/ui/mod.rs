pub mod banner;
pub mod tui;

use inquire::ui::{Color, RenderConfig, Styled};

/// Prints the welcome banner and applies the theme for all subsequent inquire prompts.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui() {
    banner::print_welcome();
    apply_theme();
}

/// Indigo/emerald accents matching the banner.
pub fn apply_theme() {
    let mut config = RenderConfig::default_colored();
    config.prompt_prefix = Styled::new("?").with_fg(Color::LightBlue);
    config.highlighted_option_prefix = Styled::new("›").with_fg(Color::LightGreen);
    config.answered_prompt_prefix = Styled::new("✓").with_fg(Color::LightGreen);
    inquire::set_global_render_config(config);
}
