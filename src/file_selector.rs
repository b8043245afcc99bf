// file_selector.rs
use crate::chosen;
use crate::config::Config;
use crate::user_interaction::{
    confirm, determine_action_as_text, get_user_input, get_user_input_level_2, print_insight,
    print_insight_level_2, print_list, Prompt,
};
use crate::xlsx_reader::{ensure_xlsx_input, has_xlsx_extension, XLSX_EXTENSION};
use chrono::{DateTime, Local};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// An `.xlsx` file found in a folder.
#[derive(Debug, Clone)]
pub struct XlsxEntry {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

/// Lists the `.xlsx` files directly inside `folder`, sorted by file name.
pub fn list_xlsx_files(folder: &Path) -> io::Result<Vec<XlsxEntry>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && has_xlsx_extension(&path) {
            let modified = entry.metadata().and_then(|m| m.modified()).ok();
            files.push(XlsxEntry { path, modified });
        }
    }
    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}

fn describe(entry: &XlsxEntry) -> String {
    let name = entry
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match entry.modified {
        Some(modified) => {
            let datetime: DateTime<Local> = modified.into();
            format!("{} (Modified: {})", name, datetime.format("%Y-%m-%d %H:%M:%S"))
        }
        None => name,
    }
}

/// Asks for one input file, or several when `multiple` is set.
pub fn select_input_files(multiple: bool) -> Prompt<Vec<PathBuf>> {
    let menu_options = ["ENTER FILE PATHS", "PICK FROM A FOLDER"];
    loop {
        print_insight("How do you want to pick the xlsx files?");
        print_list(&menu_options);
        let choice = chosen!(get_user_input("Enter your choice: "));
        match determine_action_as_text(&menu_options, &choice).as_deref() {
            Some("ENTER FILE PATHS") => return enter_file_paths(multiple),
            Some("PICK FROM A FOLDER") => return pick_from_folder(multiple),
            _ => print_insight("Invalid option."),
        }
    }
}

fn enter_file_paths(multiple: bool) -> Prompt<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    loop {
        let input = chosen!(get_user_input_level_2(
            "File path (leave empty to finish): "
        ));
        if input.is_empty() {
            if multiple && !files.is_empty() {
                break;
            } else if !multiple {
                print_insight_level_2("You need to enter at least one file.");
                continue;
            } else {
                print_insight_level_2("No files selected.");
                return Prompt::Cancelled;
            }
        }

        let path = PathBuf::from(&input);
        if let Err(e) = ensure_xlsx_input(&path) {
            print_insight_level_2(&e.to_string());
            continue;
        }
        files.push(path);
        if !multiple {
            break;
        }
    }
    Prompt::Chosen(files)
}

fn pick_from_folder(multiple: bool) -> Prompt<Vec<PathBuf>> {
    let input = chosen!(get_user_input_level_2(
        "Folder path (leave empty for the current folder): "
    ));
    let folder = if input.is_empty() {
        current_dir()
    } else {
        PathBuf::from(input)
    };

    let files = match list_xlsx_files(&folder) {
        Ok(files) if !files.is_empty() => files,
        Ok(_) => {
            print_insight_level_2("No .xlsx files found in that folder.");
            return Prompt::Cancelled;
        }
        Err(e) => {
            print_insight_level_2(&format!("Could not read {}: {}", folder.display(), e));
            return Prompt::Cancelled;
        }
    };

    let descriptions: Vec<String> = files.iter().map(describe).collect();
    let description_slices: Vec<&str> = descriptions.iter().map(AsRef::as_ref).collect();
    print_list(&description_slices);

    if multiple {
        if !chosen!(confirm(&format!("Use all {} files?", files.len()))) {
            return Prompt::Cancelled;
        }
        return Prompt::Chosen(files.into_iter().map(|f| f.path).collect());
    }

    loop {
        let choice = chosen!(get_user_input_level_2(
            "Enter the serial number of the file to open: "
        ));
        match choice.parse::<usize>() {
            Ok(serial) if serial > 0 && serial <= files.len() => {
                return Prompt::Chosen(vec![files[serial - 1].path.clone()]);
            }
            _ => print_insight_level_2("Invalid choice."),
        }
    }
}

fn current_dir() -> PathBuf {
    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Joins `folder` and `name`, adding the `.xlsx` extension unless present.
pub fn resolve_output_path(folder: &Path, name: &str) -> PathBuf {
    let name = name.trim();
    let path = folder.join(name);
    if has_xlsx_extension(&path) {
        path
    } else {
        folder.join(format!("{}.{}", name, XLSX_EXTENSION))
    }
}

/// Asks where the output should go; an existing file needs explicit consent.
pub fn select_output_path(config: &Config, default_name: &str) -> Prompt<PathBuf> {
    print_insight("Where should the output file be saved?");
    let fallback = config
        .default_output_dir
        .clone()
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(current_dir);

    let input = chosen!(get_user_input_level_2(&format!(
        "Folder path (leave empty for {}): ",
        fallback.display()
    )));
    let folder = if input.is_empty() {
        fallback
    } else {
        let folder = PathBuf::from(input);
        if folder.is_dir() {
            folder
        } else {
            print_insight_level_2(&format!(
                "That folder does not exist. Using {}.",
                fallback.display()
            ));
            fallback
        }
    };

    loop {
        let name = chosen!(get_user_input_level_2(&format!(
            "Output file name without extension (default '{}'): ",
            default_name
        )));
        let name = if name.is_empty() {
            default_name.to_string()
        } else {
            name
        };
        let path = resolve_output_path(&folder, &name);
        if path.exists()
            && !chosen!(confirm(&format!("{} already exists. Overwrite?", path.display())))
        {
            continue;
        }
        return Prompt::Chosen(path);
    }
}
