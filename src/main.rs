use merge_wiper::config::{default_config_path, load_config, Config};
use merge_wiper::logging::init_logging;
use merge_wiper::user_experience::show_settings;
use merge_wiper::user_interaction::{
    determine_action_as_text, get_user_input, print_insight, print_list, Prompt,
};
use merge_wiper::xlsx_manager::{handle_merge, handle_wipe};
use std::env;
use tracing::{info, warn};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    if env::args().any(|arg| arg == "--version") {
        print_insight(VERSION);
        return;
    }

    let config_path = default_config_path();
    let (config, config_error) = match config_path.as_deref().map(load_config) {
        Some(Ok(config)) => (config, None),
        Some(Err(e)) => (Config::default(), Some(e)),
        None => (Config::default(), None),
    };

    init_logging(&config.log_filter);
    info!(version = VERSION, "startup");
    if let Some(e) = config_error {
        warn!(error = %e, "falling back to default settings");
        print_insight(&format!("{}. Using default settings.", e));
    }

    println!(
        r#"
  __  __                               __          ___
 |  \/  | ___ _ __ __ _  ___           \ \        / (_)_ __   ___ _ __
 | |\/| |/ _ \ '__/ _` |/ _ \  _____    \ \  /\  / /| | '_ \ / _ \ '__|
 | |  | |  __/ | | (_| |  __/ |_____|    \ \/  \/ / | | |_) |  __/ |
 |_|  |_|\___|_|  \__, |\___|             \  /\  /  |_| .__/ \___|_|
                  |___/                     \/  \/     |_|
"#
    );

    let menu_options = ["MERGE", "WIPE", "SETTINGS", "EXIT"];

    loop {
        print_list(&menu_options);
        let choice = match get_user_input("Your move: ") {
            Prompt::Chosen(choice) => choice,
            Prompt::Cancelled => continue,
            Prompt::QuitRequested => break,
        };

        let outcome = match determine_action_as_text(&menu_options, &choice).as_deref() {
            Some("MERGE") => handle_merge(&config),
            Some("WIPE") => handle_wipe(&config),
            Some("SETTINGS") => {
                show_settings(&config, config_path.as_deref());
                Prompt::Chosen(())
            }
            Some("EXIT") => Prompt::QuitRequested,
            _ => {
                print_insight("That action's a no-go. Give it another whirl, alright?");
                Prompt::Chosen(())
            }
        };

        if outcome.is_quit() {
            break;
        }
        println!();
    }

    info!("shutdown");
}
