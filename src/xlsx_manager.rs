// xlsx_manager.rs
use crate::chosen;
use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::file_selector::{select_input_files, select_output_path};
use crate::report::{merge_report, print_report, wipe_report};
use crate::user_interaction::{
    get_user_input_level_2, print_insight, print_insight_level_2, Prompt,
};
use crate::xlsx_merger::merge;
use crate::xlsx_reader::read_header;
use crate::xlsx_table::Cell;
use crate::xlsx_validator::check_same_headers;
use crate::xlsx_wiper::{column_letter, wipe, KeyColumn};
use tracing::{error, warn};

/// Prints a failed invocation and logs it by kind. The session carries on.
pub fn report_error(operation: &str, err: &Error) {
    match err.kind() {
        ErrorKind::Validation => {
            warn!(operation, error = %err, "validation failed");
            print_insight(&format!("{}. Operation cancelled.", err));
        }
        ErrorKind::Io => {
            warn!(operation, error = %err, "file error");
            print_insight(&format!("{}. Operation cancelled.", err));
        }
        ErrorKind::Unexpected => {
            error!(operation, error = %err, "operation failed");
            print_insight(&format!("Error during {}: {}", operation, err));
        }
    }
}

pub fn handle_merge(config: &Config) -> Prompt<()> {
    print_insight("MERGE - combine xlsx files that share one header row");
    let files = chosen!(select_input_files(true));

    if let Err(e) = check_same_headers(&files) {
        report_error("merge", &e);
        return Prompt::Chosen(());
    }

    let destination = chosen!(select_output_path(config, &config.merge_default_name));
    match merge(&files, &destination) {
        Ok(summary) => {
            print_insight(&format!("Files merged into {}", destination.display()));
            print_report(&merge_report(&summary));
        }
        Err(e) => report_error("merge", &e),
    }
    Prompt::Chosen(())
}

pub fn handle_wipe(config: &Config) -> Prompt<()> {
    print_insight("WIPE - remove duplicate rows from one xlsx file");
    let files = chosen!(select_input_files(false));
    let Some(file) = files.into_iter().next() else {
        return Prompt::Cancelled;
    };

    let header = match read_header(&file) {
        Ok(header) => header,
        Err(e) => {
            report_error("wipe", &e);
            return Prompt::Chosen(());
        }
    };
    if header.is_empty() {
        print_insight("That sheet has no header row. Operation cancelled.");
        return Prompt::Chosen(());
    }

    let key = chosen!(ask_key_column(&header));
    let destination = chosen!(select_output_path(config, &config.wipe_default_name));
    match wipe(&file, key, &destination) {
        Ok(summary) => {
            print_insight(&format!("Duplicates wiped into {}", destination.display()));
            print_report(&wipe_report(&summary));
        }
        Err(e) => report_error("wipe", &e),
    }
    Prompt::Chosen(())
}

fn ask_key_column(header: &[Cell]) -> Prompt<KeyColumn> {
    print_insight_level_2("Available columns:");
    for (index, name) in header.iter().enumerate() {
        println!("    Column {} - {}", column_letter(index), name);
    }

    loop {
        let input = chosen!(get_user_input_level_2(
            "Which column holds the unique values? (column letter or number): "
        ));
        match KeyColumn::parse(&input, header.len()) {
            Ok(key) => return Prompt::Chosen(key),
            Err(e) => print_insight_level_2(&e.to_string()),
        }
    }
}
