// src/user_experience.rs
use crate::config::Config;
use crate::user_interaction::{print_insight, print_insight_level_2, print_list};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Quit,
    Back,
    Help,
}

/// Recognises the flags accepted at any prompt.
pub fn parse_flag(input: &str) -> Option<Flag> {
    match input.trim() {
        "@q" => Some(Flag::Quit),
        "@b" | "@c" => Some(Flag::Back),
        "@f" | "@flags" => Some(Flag::Help),
        _ => None,
    }
}

pub fn print_flags() {
    let flags = [
        "@b / @c      : Any prompt => Back to the main menu",
        "@f / @flags  : Any prompt => View all flags",
        "@q           : Any prompt => Quit",
    ];
    print_insight("Serving your flags ...");
    print_list(&flags);
    println!();
}

pub fn show_settings(config: &Config, config_path: Option<&Path>) {
    match config_path {
        Some(path) => print_insight(&format!("Settings are read from {}", path.display())),
        None => print_insight("No home directory found; running with default settings."),
    }
    let output_dir = config
        .default_output_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(current folder)".to_string());
    print_insight_level_2(&format!("default_output_dir : {}", output_dir));
    print_insight_level_2(&format!("merge_default_name : {}", config.merge_default_name));
    print_insight_level_2(&format!("wipe_default_name  : {}", config.wipe_default_name));
    print_insight_level_2(&format!("log_filter         : {}", config.log_filter));
    print_insight_level_2("Edit the file and restart to change them.");
    println!();
}
