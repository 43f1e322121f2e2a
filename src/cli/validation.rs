use std::path::Path;

use regex::Regex;

use crate::cli::args::{
    BoatAction, CliArgs, Command, DocumentAction, ListOpts, MaintenanceAction, OwnerAction,
    PaymentAction,
};
use crate::listview::filter;
use crate::model::EntityKind;

pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

pub fn validate(args: &CliArgs) -> Result<(), String> {
    match &args.command {
        Command::Boats { action } => match action {
            BoatAction::List(opts) => validate_list_opts(EntityKind::Boats, opts),
            BoatAction::Create { price, .. } => validate_price(*price),
            BoatAction::Update { price, .. } => price.map_or(Ok(()), validate_price),
            _ => Ok(()),
        },
        Command::Maintenances { action } => match action {
            MaintenanceAction::List(opts) => validate_list_opts(EntityKind::Maintenances, opts),
            MaintenanceAction::Create { cost, .. } => validate_price(*cost),
            MaintenanceAction::Update { cost, .. } => cost.map_or(Ok(()), validate_price),
            _ => Ok(()),
        },
        Command::Payments { action } => match action {
            PaymentAction::List(opts) => validate_list_opts(EntityKind::Payments, opts),
            PaymentAction::Create { amount, .. } => validate_price(*amount),
            PaymentAction::AttachReceipt { file, .. } => {
                validate_upload_file(Path::new(file), MAX_UPLOAD_BYTES, ALLOWED_UPLOAD_EXTENSIONS)
            }
            _ => Ok(()),
        },
        Command::Owners { action } => match action {
            OwnerAction::List(opts) => validate_list_opts(EntityKind::Owners, opts),
            OwnerAction::Create { email, .. } => validate_email(email),
            OwnerAction::Update {
                email: Some(email), ..
            } => validate_email(email),
            _ => Ok(()),
        },
        Command::Documents { action } => match action {
            DocumentAction::List { opts, .. } => validate_list_opts(EntityKind::Documents, opts),
            DocumentAction::Upload { file, .. } => {
                validate_upload_file(Path::new(file), MAX_UPLOAD_BYTES, ALLOWED_UPLOAD_EXTENSIONS)
            }
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

fn validate_list_opts(kind: EntityKind, opts: &ListOpts) -> Result<(), String> {
    if let Some(size) = opts.size {
        if size == 0 {
            return Err("invalid --size, expected positive integer".to_string());
        }
    }
    for raw in &opts.filter {
        let (field, value) = parse_filter_kv(raw)?;
        if !kind.filter_fields().contains(&field.as_str()) {
            return Err(format!(
                "unknown filter field '{field}' for {}, expected one of: {}",
                kind.label(),
                kind.filter_fields().join(", ")
            ));
        }
        if field == "month"
            && !value.eq_ignore_ascii_case("all")
            && !filter::MONTH_WINDOWS.contains(&value.as_str())
        {
            return Err(format!(
                "unknown month window '{value}', expected one of: all, {}",
                filter::MONTH_WINDOWS.join(", ")
            ));
        }
    }
    Ok(())
}

pub fn parse_filter_kv(raw: &str) -> Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid filter '{raw}', expected FIELD=VALUE"))?;
    let field = field.trim();
    let value = value.trim();
    if field.is_empty() || value.is_empty() {
        return Err(format!("invalid filter '{raw}', expected FIELD=VALUE"));
    }
    Ok((field.to_string(), value.to_string()))
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| format!("failed to build email pattern: {e}"))?;
    if re.is_match(email.trim()) {
        Ok(())
    } else {
        Err(format!("invalid email '{email}'"))
    }
}

fn validate_price(value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err("invalid amount, expected a non-negative number".to_string())
    }
}

/// Mirrors the browser-side receipt checks: extension whitelist and a 5 MB
/// size cap, applied before any bytes go over the wire.
pub fn validate_upload_file(
    path: &Path,
    max_bytes: u64,
    allowed_extensions: &[&str],
) -> Result<(), String> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !allowed_extensions.contains(&extension.as_str()) {
        return Err(format!(
            "file type '{extension}' not allowed, expected one of: {}",
            allowed_extensions.join(", ")
        ));
    }
    let metadata = std::fs::metadata(path)
        .map_err(|e| format!("cannot read upload file '{}': {e}", path.display()))?;
    if metadata.len() > max_bytes {
        return Err(format!(
            "file too large ({} bytes), maximum is {} bytes",
            metadata.len(),
            max_bytes
        ));
    }
    Ok(())
}
