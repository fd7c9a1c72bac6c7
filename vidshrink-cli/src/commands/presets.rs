//! Implementation of the 'presets' subcommand.

use vidshrink_core::config::DEFAULT_PRESET;
use vidshrink_core::{Preset, terminal};

/// Lists every preset with its description and encoder flags.
pub fn run_presets() {
    terminal::print_section("Presets");
    for preset in Preset::ALL {
        let title = if preset == DEFAULT_PRESET {
            format!("{} (default)", preset.name())
        } else {
            preset.name().to_string()
        };
        terminal::print_subsection(&title);
        terminal::print_sub_item(preset.description());
        terminal::print_sub_item(&preset.encoder_args().join(" "));
    }
}
