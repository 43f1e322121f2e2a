use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::listview::filter::parse_timestamp;
use crate::model::{Column, FieldFormat, Record};

/// The rendered form of one controller page: plain data, so the table (or
/// any other target) is a pure consumer and tests assert on the structure
/// instead of on markup.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub count_summary: String,
    pub page_indicator: Option<String>,
    pub empty_message: String,
}

/// Formats one record field for display, substituting the column's
/// placeholder for missing or null values. Never fails.
pub fn format_field(record: &Record, column: &Column) -> String {
    let raw = match record.display_value(column.field) {
        Some(raw) => raw,
        None => return column.placeholder.to_string(),
    };
    match column.format {
        FieldFormat::Text | FieldFormat::Integer => raw,
        FieldFormat::Currency => match record.f64_field(column.field) {
            Some(value) => format_currency(value),
            None => column.placeholder.to_string(),
        },
        FieldFormat::DateTime => match format_datetime(&raw) {
            Some(formatted) => formatted,
            None => column.placeholder.to_string(),
        },
        FieldFormat::Label(map) => map.resolve(&raw).to_string(),
    }
}

/// Colombian-peso format matching the original pages' Intl output:
/// `$ 1.500.000`, no decimals, dot thousands separators.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// `dd/mm/yyyy HH:MM`, or `None` when the raw value is not a timestamp.
pub fn format_datetime(raw: &str) -> Option<String> {
    parse_timestamp(raw).map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
}

/// Plain-text aligned table for a view model. An empty page renders the
/// "no results" line; the count summary is always present.
pub fn render_table(vm: &ViewModel) -> String {
    let mut out = String::new();
    if vm.rows.is_empty() {
        out.push_str(&vm.empty_message);
        out.push('\n');
    } else {
        let mut widths: Vec<usize> = vm.headers.iter().map(|h| h.chars().count()).collect();
        for row in &vm.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }
        push_row(&mut out, &vm.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_row(&mut out, &rule, &widths);
        for row in &vm.rows {
            push_row(&mut out, row, &widths);
        }
    }
    out.push_str(&vm.count_summary);
    if let Some(indicator) = &vm.page_indicator {
        out.push_str("  ::  ");
        out.push_str(indicator);
    }
    out.push('\n');
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let cell = cell.as_ref();
        out.push_str(cell);
        let pad = widths.get(i).copied().unwrap_or(0).saturating_sub(cell.chars().count());
        for _ in 0..pad {
            out.push(' ');
        }
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

pub fn print_view(vm: &ViewModel) {
    println!();
    println!(":: {} ::", vm.title.bold());
    println!();
    print!("{}", render_table(vm));
}

pub fn info(msg: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "INF".bold().blue(),
        "]".bold().white(),
        msg
    );
}

pub fn warn(msg: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "WRN".bold().yellow(),
        "]".bold().white(),
        msg
    );
}

pub fn error(msg: &str) {
    eprintln!(
        "{}{}{} {}",
        "[".bold().white(),
        "ERR".bold().red(),
        "]".bold().white(),
        msg
    );
}

/// Spinner shown while a network call is in flight.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb
}
