// user_interaction.rs
use crate::user_experience::{parse_flag, print_flags, Flag};
use fuzzywuzzy::fuzz;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Result of asking the operator for something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<T> {
    Chosen(T),
    /// Back to the main menu.
    Cancelled,
    /// Leave the program.
    QuitRequested,
}

impl<T> Prompt<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Prompt<U> {
        match self {
            Prompt::Chosen(value) => Prompt::Chosen(f(value)),
            Prompt::Cancelled => Prompt::Cancelled,
            Prompt::QuitRequested => Prompt::QuitRequested,
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Prompt::QuitRequested)
    }
}

/// Unwraps a `Prompt::Chosen` or returns the cancel/quit outcome to the caller.
#[macro_export]
macro_rules! chosen {
    ($prompt:expr) => {
        match $prompt {
            $crate::user_interaction::Prompt::Chosen(value) => value,
            $crate::user_interaction::Prompt::Cancelled => {
                return $crate::user_interaction::Prompt::Cancelled
            }
            $crate::user_interaction::Prompt::QuitRequested => {
                return $crate::user_interaction::Prompt::QuitRequested
            }
        }
    };
}

const BOLD_ORANGE: &str = "\x1b[1;38;5;208m";
const ORANGE: &str = "\x1b[0;38;5;208m";
const BOLD_YELLOW: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

fn read_line(styled_prompt: &str) -> Prompt<String> {
    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            println!("Failed to initialize editor: {:?}", err);
            return Prompt::QuitRequested;
        }
    };

    loop {
        match rl.readline(styled_prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                return match parse_flag(&line) {
                    Some(Flag::Quit) => Prompt::QuitRequested,
                    Some(Flag::Back) => Prompt::Cancelled,
                    Some(Flag::Help) => {
                        print_flags();
                        continue;
                    }
                    None => Prompt::Chosen(line.trim().to_string()),
                };
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Prompt::QuitRequested;
            }
            Err(err) if is_transient(&err) => continue,
            Err(err) => {
                // The terminal is gone; asking again would fail the same way.
                println!("Error reading line: {:?}", err);
                return Prompt::QuitRequested;
            }
        }
    }
}

fn is_transient(err: &ReadlineError) -> bool {
    matches!(err, ReadlineError::WindowResized)
}

pub fn get_user_input(prompt: &str) -> Prompt<String> {
    read_line(&format!("{}@merge_wiper: {}{}", BOLD_ORANGE, prompt, RESET))
}

pub fn get_user_input_level_2(prompt: &str) -> Prompt<String> {
    read_line(&format!("  {}@merge_wiper: {}{}", ORANGE, prompt, RESET))
}

/// Asks a yes/no question; anything but `y`/`yes` counts as no.
pub fn confirm(prompt: &str) -> Prompt<bool> {
    get_user_input_level_2(&format!("{} (y/N): ", prompt)).map(|answer| is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn print_list(options: &[&str]) {
    // Calculate the length of the longest index to ensure neat indentation
    let max_digits = options.len().to_string().len();

    for (index, option) in options.iter().enumerate() {
        let padded_index = format!("{:width$}:", index + 1, width = max_digits);
        println!("  {}{} {}{}", BOLD_YELLOW, padded_index, option, RESET);
    }
}

pub fn print_insight(message: &str) {
    println!("{}@merge_wiper: {}{}", BOLD_ORANGE, message, RESET);
}

pub fn print_insight_level_2(message: &str) {
    println!("  {}@merge_wiper: {}{}", ORANGE, message, RESET);
}

/// Fuzzy matches below this score are treated as no match.
const MIN_FUZZY_SCORE: u8 = 60;

/// Picks a menu option by 1-based number or by closest text.
pub fn determine_action_as_text(menu_options: &[&str], choice: &str) -> Option<String> {
    let choice = choice.trim().to_lowercase();

    if let Ok(index) = choice.parse::<usize>() {
        return (index > 0 && index <= menu_options.len())
            .then(|| menu_options[index - 1].to_string());
    }

    menu_options
        .iter()
        .map(|option| (option, fuzz::ratio(&choice, &option.to_lowercase())))
        .max_by_key(|&(_, score)| score)
        .filter(|&(_, score)| score >= MIN_FUZZY_SCORE)
        .map(|(option, _)| option.to_string())
}
