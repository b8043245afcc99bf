// report.rs
use crate::user_interaction::print_insight;
use crate::xlsx_merger::MergeSummary;
use crate::xlsx_wiper::WipeSummary;
use std::path::Path;
use std::time::Duration;

const SEPARATOR_WIDTH: usize = 60;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn output_lines(output_path: &Path, output_size: u64, elapsed: Duration) -> Vec<String> {
    let folder = output_path
        .parent()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    vec![
        format!("Elapsed: {:.2} seconds", elapsed.as_secs_f64()),
        format!("Output size: {} KB", output_size / 1024),
        format!("Output file: {}", output_path.display()),
        format!("Output folder: {}", folder),
    ]
}

pub fn merge_report(summary: &MergeSummary) -> Vec<String> {
    let mut lines = vec![
        "MERGE REPORT".to_string(),
        format!("Files processed: {}", summary.files_processed()),
        "Rows per file:".to_string(),
    ];
    lines.extend(
        summary
            .file_rows
            .iter()
            .map(|f| format!("  {} - {} rows", file_name(&f.path), f.rows)),
    );
    lines.push(format!("Rows before: {} total", summary.rows_in));
    lines.push(format!("Rows after: {} merged", summary.rows_out));
    lines.extend(output_lines(
        &summary.output_path,
        summary.output_size,
        summary.elapsed,
    ));
    lines
}

pub fn wipe_report(summary: &WipeSummary) -> Vec<String> {
    let mut lines = vec![
        "WIPE REPORT".to_string(),
        "Files processed: 1".to_string(),
        format!(
            "  {} - {} rows",
            file_name(&summary.input_path),
            summary.rows_in
        ),
        format!("Key column: {}", summary.key_column),
        format!("Rows before: {} total", summary.rows_in),
        format!(
            "Rows after: {} kept - {} duplicate rows removed",
            summary.rows_out,
            summary.rows_removed()
        ),
    ];
    lines.extend(output_lines(
        &summary.output_path,
        summary.output_size,
        summary.elapsed,
    ));
    lines
}

pub fn print_report(lines: &[String]) {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    println!("{}", separator);
    for line in lines {
        print_insight(line);
    }
    println!("{}", separator);
}
