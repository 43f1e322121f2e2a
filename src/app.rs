use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{ApiClient, ApiError, CreateTarget, Scope};
use crate::cli::args::{
    BoatAction, CliArgs, Command, ConfigAction, DocumentAction, ListOpts, MaintenanceAction,
    OwnerAction, PaymentAction,
};
use crate::cli::validation::{self, parse_filter_kv};
use crate::config::{self, ConfigFile};
use crate::listview::{self, FilterState, ListView, PaginationMode};
use crate::model::{EntityKind, Record};
use crate::output;
use crate::session::{self, Session};

/// Effective settings after merging CLI flags over the config file.
#[derive(Clone, Debug)]
pub struct Settings {
    pub base_url: String,
    pub page_size: usize,
    pub timeout: u64,
    pub server_side: bool,
    pub demo_data: bool,
}

fn build_settings(args: &CliArgs, cfg: ConfigFile) -> Settings {
    Settings {
        base_url: args
            .base_url
            .clone()
            .or(cfg.base_url)
            .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string()),
        page_size: cfg.page_size.unwrap_or(config::DEFAULT_PAGE_SIZE).max(1),
        timeout: args
            .timeout
            .or(cfg.timeout)
            .unwrap_or(config::DEFAULT_TIMEOUT_SECONDS),
        server_side: cfg.server_side.unwrap_or(false),
        demo_data: cfg.demo_data.unwrap_or(false),
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    if args.no_color || cfg.no_color.unwrap_or(false) {
        colored::control::set_override(false);
    }

    validation::validate(&args)?;
    let settings = build_settings(&args, cfg);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(args.command, settings))
}

async fn run_async(command: Command, settings: Settings) -> Result<(), String> {
    match command {
        Command::Login {
            username,
            password,
            user_type,
        } => run_login(&settings, &username, &password, &user_type).await,
        Command::Logout => {
            if session::clear()? {
                output::info("sesión cerrada");
            } else {
                output::info("no había sesión activa");
            }
            Ok(())
        }
        Command::Config { action } => match action {
            ConfigAction::Init => {
                let path = config::default_config_path()
                    .ok_or_else(|| "could not determine home directory".to_string())?;
                config::ensure_default_config_file(&path)?;
                output::info(&format!("config file at {}", path.display()));
                Ok(())
            }
        },
        Command::Boats { action } => run_boats(action, &settings).await,
        Command::Maintenances { action } => run_maintenances(action, &settings).await,
        Command::Payments { action } => run_payments(action, &settings).await,
        Command::Owners { action } => run_owners(action, &settings).await,
        Command::Documents { action } => run_documents(action, &settings).await,
    }
}

async fn run_login(
    settings: &Settings,
    username: &str,
    password: &str,
    user_type: &str,
) -> Result<(), String> {
    let client =
        ApiClient::new(&settings.base_url, None, settings.timeout).map_err(|e| e.to_string())?;
    let pb = output::spinner("autenticando…");
    let resp = client.login(username, password).await;
    pb.finish_and_clear();
    let resp = resp.map_err(|e| e.to_string())?;
    if !resp.status || resp.jwt.is_empty() {
        return Err(resp
            .message
            .unwrap_or_else(|| "credenciales incorrectas".to_string()));
    }
    session::store(&Session {
        user_type: user_type.to_string(),
        username: username.to_string(),
        user_id: resp.id,
        jwt: resp.jwt,
        refresh_token: resp.refresh_token,
    })?;
    output::info(&format!("sesión iniciada como {}", username.bold()));
    Ok(())
}

fn authed_client(settings: &Settings) -> Result<ApiClient, String> {
    let token = session::load()?.map(|s| s.jwt);
    if token.is_none() {
        return Err(ApiError::MissingSession.to_string());
    }
    ApiClient::new(&settings.base_url, token, settings.timeout).map_err(|e| e.to_string())
}

/// Builds the controller for one listing: pagination mode, scope, initial
/// filter state, optional demo fallback.
fn build_view(
    kind: EntityKind,
    client: ApiClient,
    opts: &ListOpts,
    settings: &Settings,
    scope: Scope,
) -> Result<ListView, String> {
    let wants_server = opts.server_side || settings.server_side;
    let mode = if wants_server && kind.server_pagination() {
        PaginationMode::ServerSide
    } else {
        if wants_server && !kind.server_pagination() {
            output::warn(&format!(
                "{} no soporta paginación del servidor, usando modo local",
                kind.label()
            ));
        }
        PaginationMode::ClientSide
    };
    let size = opts.size.unwrap_or(settings.page_size).max(1);
    let mut view = ListView::new(kind, client, mode, size).with_scope(scope);
    if settings.demo_data {
        if let Some(records) = listview::demo_dataset(kind) {
            view = view.with_fallback(records);
        }
    }
    let mut filter = FilterState::new();
    if let Some(text) = &opts.search {
        filter.set_search(text);
    }
    for raw in &opts.filter {
        let (field, value) = parse_filter_kv(raw)?;
        filter.set(&field, &value);
    }
    view.set_filter_state(filter);
    Ok(view)
}

async fn run_list(
    kind: EntityKind,
    opts: ListOpts,
    settings: &Settings,
    scope: Scope,
) -> Result<(), String> {
    let client = authed_client(settings)?;
    let mut view = build_view(kind, client, &opts, settings, scope)?;
    let pb = output::spinner(&format!("cargando {}…", kind.label()));
    let vm = view.load(opts.page.unwrap_or(0)).await;
    pb.finish_and_clear();
    if kind == EntityKind::Payments && scope == Scope::All {
        print_payment_metrics(view.collection());
    }
    output::print_view(&vm);
    if opts.browse {
        browse_loop(&mut view).await?;
    }
    Ok(())
}

/// Loads the full collection client-side so a mutation can be merged and
/// the refreshed table shown, the way the original pages did.
async fn loaded_view(
    kind: EntityKind,
    settings: &Settings,
    scope: Scope,
) -> Result<ListView, String> {
    let client = authed_client(settings)?;
    let mut view = ListView::new(kind, client, PaginationMode::ClientSide, settings.page_size)
        .with_scope(scope);
    let pb = output::spinner(&format!("cargando {}…", kind.label()));
    view.load(0).await;
    pb.finish_and_clear();
    Ok(view)
}

async fn run_boats(action: BoatAction, settings: &Settings) -> Result<(), String> {
    match action {
        BoatAction::List(opts) => {
            let scope = opts.owner.map_or(Scope::All, Scope::Owner);
            run_list(EntityKind::Boats, opts, settings, scope).await
        }
        BoatAction::Show { id } => {
            let client = authed_client(settings)?;
            let record = client
                .get(EntityKind::Boats, id)
                .await
                .map_err(|e| e.to_string())?;
            print_record(EntityKind::Boats, &record);
            Ok(())
        }
        BoatAction::Create {
            name,
            model,
            boat_type,
            location,
            price,
        } => {
            let mut view = loaded_view(EntityKind::Boats, settings, Scope::All).await?;
            let payload = json!({
                "name": name,
                "model": model,
                "type": boat_type.to_uppercase(),
                "location": location,
                "price": price,
            });
            let created = view
                .create(CreateTarget::Root, &payload)
                .await
                .map_err(|e| e.to_string())?;
            output::info("embarcación creada");
            print_record(EntityKind::Boats, &created);
            Ok(())
        }
        BoatAction::Update {
            id,
            name,
            model,
            boat_type,
            location,
            price,
        } => {
            let mut view = loaded_view(EntityKind::Boats, settings, Scope::All).await?;
            let base = find_record(&view, id)?;
            let payload = merge_changes(
                &base,
                vec![
                    ("name", name.map(Value::from)),
                    ("model", model.map(Value::from)),
                    ("type", boat_type.map(|t| Value::from(t.to_uppercase()))),
                    ("location", location.map(Value::from)),
                    ("price", price.map(Value::from)),
                ],
            );
            let updated = view.update(id, &payload).await.map_err(|e| e.to_string())?;
            output::info("embarcación actualizada");
            print_record(EntityKind::Boats, &updated);
            Ok(())
        }
        BoatAction::Delete { id } => {
            let mut view = loaded_view(EntityKind::Boats, settings, Scope::All).await?;
            view.delete(id).await.map_err(|e| e.to_string())?;
            output::info(&format!("embarcación {id} eliminada"));
            output::print_view(&view.view_model());
            Ok(())
        }
        BoatAction::AssignOwner { boat_id, owner_id } => {
            let client = authed_client(settings)?;
            let mut view = loaded_view(EntityKind::Boats, settings, Scope::All).await?;
            let updated = client
                .assign_owner(boat_id, owner_id)
                .await
                .map_err(|e| e.to_string())?;
            view.merge_updated(updated.clone());
            output::info("propietario asignado");
            print_record(EntityKind::Boats, &updated);
            Ok(())
        }
    }
}

async fn run_maintenances(action: MaintenanceAction, settings: &Settings) -> Result<(), String> {
    match action {
        MaintenanceAction::List(opts) => {
            let scope = opts.owner.map_or(Scope::All, Scope::Owner);
            run_list(EntityKind::Maintenances, opts, settings, scope).await
        }
        MaintenanceAction::Create {
            boat_id,
            maintenance_type,
            description,
            cost,
            scheduled_date,
            priority,
        } => {
            let mut view = loaded_view(EntityKind::Maintenances, settings, Scope::All).await?;
            let payload = json!({
                "type": maintenance_type.to_uppercase(),
                "description": description,
                "cost": cost,
                "scheduledDate": scheduled_date,
                "priority": priority.to_uppercase(),
            });
            let created = view
                .create(CreateTarget::Boat(boat_id), &payload)
                .await
                .map_err(|e| e.to_string())?;
            output::info("mantenimiento creado");
            print_record(EntityKind::Maintenances, &created);
            Ok(())
        }
        MaintenanceAction::Update {
            id,
            maintenance_type,
            status,
            description,
            cost,
            scheduled_date,
            performed_date,
            priority,
        } => {
            let mut view = loaded_view(EntityKind::Maintenances, settings, Scope::All).await?;
            let base = find_record(&view, id)?;
            let payload = merge_changes(
                &base,
                vec![
                    (
                        "type",
                        maintenance_type.map(|v| Value::from(v.to_uppercase())),
                    ),
                    ("status", status.map(|v| Value::from(v.to_uppercase()))),
                    ("description", description.map(Value::from)),
                    ("cost", cost.map(Value::from)),
                    ("scheduledDate", scheduled_date.map(Value::from)),
                    ("performedDate", performed_date.map(Value::from)),
                    ("priority", priority.map(|v| Value::from(v.to_uppercase()))),
                ],
            );
            let updated = view.update(id, &payload).await.map_err(|e| e.to_string())?;
            output::info("mantenimiento actualizado");
            print_record(EntityKind::Maintenances, &updated);
            Ok(())
        }
        MaintenanceAction::Delete { id } => {
            let mut view = loaded_view(EntityKind::Maintenances, settings, Scope::All).await?;
            view.delete(id).await.map_err(|e| e.to_string())?;
            output::info(&format!("mantenimiento {id} eliminado"));
            output::print_view(&view.view_model());
            Ok(())
        }
    }
}

async fn run_payments(action: PaymentAction, settings: &Settings) -> Result<(), String> {
    match action {
        PaymentAction::List(opts) => {
            let scope = opts.owner.map_or(Scope::All, Scope::Owner);
            run_list(EntityKind::Payments, opts, settings, scope).await
        }
        PaymentAction::Create {
            boat_id,
            user_id,
            amount,
            reason,
            date,
            invoice,
        } => {
            let client = authed_client(settings)?;
            // The original page loaded owners and boats up front to populate
            // its selects; here they validate the target ids before posting.
            let pb = output::spinner("cargando propietarios y embarcaciones…");
            let lookups = futures::try_join!(
                client.list_all(EntityKind::Owners, Scope::All),
                client.list_all(EntityKind::Boats, Scope::All),
            );
            pb.finish_and_clear();
            let (owners, boats) = lookups.map_err(|e| e.to_string())?;
            if !owners.iter().any(|r| r.id() == Some(user_id)) {
                return Err(format!("no existe el propietario {user_id}"));
            }
            if !boats.iter().any(|r| r.id() == Some(boat_id)) {
                return Err(format!("no existe la embarcación {boat_id}"));
            }
            let mut view = loaded_view(EntityKind::Payments, settings, Scope::All).await?;
            let date = date
                .unwrap_or_else(|| Local::now().format("%Y-%m-%dT%H:%M:%S").to_string());
            let payload = json!({
                "mount": amount,
                "date": date,
                "reason": reason.to_uppercase(),
                "invoice_url": invoice,
            });
            let created = view
                .create(CreateTarget::BoatUser(boat_id, user_id), &payload)
                .await
                .map_err(|e| e.to_string())?;
            output::info("pago registrado");
            print_record(EntityKind::Payments, &created);
            Ok(())
        }
        PaymentAction::Delete { id } => {
            let mut view = loaded_view(EntityKind::Payments, settings, Scope::All).await?;
            view.delete(id).await.map_err(|e| e.to_string())?;
            output::info(&format!("pago {id} eliminado"));
            output::print_view(&view.view_model());
            Ok(())
        }
        PaymentAction::AttachReceipt { id, file } => {
            let client = authed_client(settings)?;
            let pb = output::spinner("subiendo recibo…");
            let result = client.attach_receipt(id, Path::new(&file)).await;
            pb.finish_and_clear();
            let updated = result.map_err(|e| e.to_string())?;
            output::info("recibo adjuntado");
            print_record(EntityKind::Payments, &updated);
            Ok(())
        }
        PaymentAction::DownloadReceipt { id, out } => {
            let client = authed_client(settings)?;
            let out = out.unwrap_or_else(|| format!("receipt-{id}.pdf"));
            let pb = output::spinner("descargando recibo…");
            let result = client.download_receipt(id, Path::new(&out)).await;
            pb.finish_and_clear();
            let bytes = result.map_err(|e| e.to_string())?;
            output::info(&format!("recibo guardado en {out} ({bytes} bytes)"));
            Ok(())
        }
    }
}

async fn run_owners(action: OwnerAction, settings: &Settings) -> Result<(), String> {
    match action {
        OwnerAction::List(opts) => run_list(EntityKind::Owners, opts, settings, Scope::All).await,
        OwnerAction::Show { id } => {
            let client = authed_client(settings)?;
            let record = client
                .get(EntityKind::Owners, id)
                .await
                .map_err(|e| e.to_string())?;
            print_record(EntityKind::Owners, &record);
            Ok(())
        }
        OwnerAction::Create {
            full_name,
            email,
            username,
            password,
        } => {
            let mut view = loaded_view(EntityKind::Owners, settings, Scope::All).await?;
            let payload = json!({
                "fullName": full_name,
                "email": email,
                "username": username,
                "password": password,
            });
            let created = view
                .create(CreateTarget::Root, &payload)
                .await
                .map_err(|e| e.to_string())?;
            output::info("propietario creado");
            print_record(EntityKind::Owners, &created);
            Ok(())
        }
        OwnerAction::Update {
            id,
            full_name,
            email,
        } => {
            let mut view = loaded_view(EntityKind::Owners, settings, Scope::All).await?;
            let base = find_record(&view, id)?;
            let payload = merge_changes(
                &base,
                vec![
                    ("fullName", full_name.map(Value::from)),
                    ("email", email.map(Value::from)),
                ],
            );
            let updated = view.update(id, &payload).await.map_err(|e| e.to_string())?;
            output::info("propietario actualizado");
            print_record(EntityKind::Owners, &updated);
            Ok(())
        }
        OwnerAction::Delete { id } => {
            let mut view = loaded_view(EntityKind::Owners, settings, Scope::All).await?;
            view.delete(id).await.map_err(|e| e.to_string())?;
            output::info(&format!("propietario {id} eliminado"));
            output::print_view(&view.view_model());
            Ok(())
        }
    }
}

async fn run_documents(action: DocumentAction, settings: &Settings) -> Result<(), String> {
    match action {
        DocumentAction::List { boat_id, opts } => {
            run_list(EntityKind::Documents, opts, settings, Scope::Boat(boat_id)).await
        }
        DocumentAction::Upload {
            boat_id,
            file,
            name,
        } => {
            let client = authed_client(settings)?;
            let path = Path::new(&file);
            let name = name.unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "documento".to_string())
            });
            let pb = output::spinner("subiendo documento…");
            let result = client.upload_document(boat_id, path, &name).await;
            pb.finish_and_clear();
            let created = result.map_err(|e| e.to_string())?;
            output::info("documento subido");
            print_record(EntityKind::Documents, &created);
            Ok(())
        }
        DocumentAction::Rename { boat_id, id, name } => {
            let client = authed_client(settings)?;
            let updated = client
                .rename_document(boat_id, id, &name)
                .await
                .map_err(|e| e.to_string())?;
            output::info("documento renombrado");
            print_record(EntityKind::Documents, &updated);
            Ok(())
        }
        DocumentAction::Delete { boat_id, id } => {
            let client = authed_client(settings)?;
            client
                .delete_document(boat_id, id)
                .await
                .map_err(|e| e.to_string())?;
            output::info(&format!("documento {id} eliminado"));
            Ok(())
        }
    }
}

fn find_record(view: &ListView, id: i64) -> Result<Record, String> {
    view.collection()
        .iter()
        .find(|r| r.id() == Some(id))
        .cloned()
        .ok_or_else(|| format!("no se encontró {} con id {id}", view.kind().label()))
}

/// Full-record payload for PUT: the current record with the provided
/// changes applied over it.
fn merge_changes(base: &Record, changes: Vec<(&str, Option<Value>)>) -> Value {
    let mut map = base.0.clone();
    for (field, value) in changes {
        if let Some(value) = value {
            map.insert(field.to_string(), value);
        }
    }
    Value::Object(map)
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<14}: {}", label, value);
}

fn print_record(kind: EntityKind, record: &Record) {
    println!();
    for column in kind.columns() {
        format_kv_line(column.header, &output::format_field(record, column));
    }
}

/// The metric cards from the payments page: totals, current-month amount
/// and distinct payers.
fn print_payment_metrics(records: &[Record]) {
    let total_amount: f64 = records.iter().filter_map(|r| r.f64_field("mount")).sum();
    let now = Local::now().naive_local();
    let monthly: f64 = records
        .iter()
        .filter(|r| listview::filter::matches_month(r, "current", now))
        .filter_map(|r| r.f64_field("mount"))
        .sum();
    let payers: HashSet<i64> = records
        .iter()
        .filter_map(|r| r.get("user.id").and_then(Value::as_i64))
        .collect();
    println!();
    format_kv_line("Pagos", &records.len().to_string());
    format_kv_line("Total", &output::format_currency(total_amount));
    format_kv_line("Mes actual", &output::format_currency(monthly));
    format_kv_line("Pagadores", &payers.len().to_string());
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BrowseCmd {
    Next,
    Prev,
    /// One-based page number, as shown in the page indicator.
    Goto(usize),
    Search(String),
    Filter(String, String),
    Reload,
    Quit,
    Help,
    Unknown,
}

fn parse_browse_command(line: &str) -> BrowseCmd {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('/') {
        return BrowseCmd::Search(rest.trim().to_string());
    }
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => BrowseCmd::Help,
        Some("n") | Some("next") => BrowseCmd::Next,
        Some("p") | Some("prev") => BrowseCmd::Prev,
        Some("g") | Some("go") => match parts.next().and_then(|v| v.parse::<usize>().ok()) {
            Some(page) if page >= 1 => BrowseCmd::Goto(page),
            _ => BrowseCmd::Unknown,
        },
        Some("f") | Some("filter") => match parts.next().map(parse_filter_kv) {
            Some(Ok((field, value))) => BrowseCmd::Filter(field, value),
            _ => BrowseCmd::Unknown,
        },
        Some("r") | Some("reload") => BrowseCmd::Reload,
        Some("q") | Some("quit") | Some("exit") => BrowseCmd::Quit,
        Some("h") | Some("help") | Some("?") => BrowseCmd::Help,
        _ => BrowseCmd::Unknown,
    }
}

fn print_browse_help() {
    println!(
        ":: [n]ext [p]rev [g N] [/texto] [f campo=valor] [r]eload [q]uit (f campo=all limpia)"
    );
}

/// The interactive loop standing in for the original page's event handlers:
/// each command maps to one controller method and ends in a redraw.
async fn browse_loop(view: &mut ListView) -> Result<(), String> {
    print_browse_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("fleetdesk> ");
        std::io::stdout()
            .flush()
            .map_err(|e| format!("failed to flush stdout: {e}"))?;
        let line = match lines
            .next_line()
            .await
            .map_err(|e| format!("failed to read input: {e}"))?
        {
            Some(line) => line,
            None => break,
        };
        let vm = match parse_browse_command(&line) {
            BrowseCmd::Quit => break,
            BrowseCmd::Next => {
                let page = view.meta().current_page + 1;
                view.change_page(page).await
            }
            BrowseCmd::Prev => {
                let current = view.meta().current_page;
                view.change_page(current.saturating_sub(1)).await
            }
            BrowseCmd::Goto(page) => view.change_page(page - 1).await,
            BrowseCmd::Search(text) => view.set_search(&text).await,
            BrowseCmd::Filter(field, value) => {
                if !view.kind().filter_fields().contains(&field.as_str()) {
                    output::warn(&format!(
                        "campo de filtro desconocido '{field}', esperaba: {}",
                        view.kind().filter_fields().join(", ")
                    ));
                    continue;
                }
                view.set_filter(&field, &value).await
            }
            BrowseCmd::Reload => {
                let current = view.meta().current_page;
                view.load(current).await
            }
            BrowseCmd::Help => {
                print_browse_help();
                continue;
            }
            BrowseCmd::Unknown => {
                output::warn("comando no reconocido, 'h' muestra la ayuda");
                continue;
            }
        };
        output::print_view(&vm);
    }
    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn browse_commands_parse() {
        assert_eq!(parse_browse_command("n"), BrowseCmd::Next);
        assert_eq!(parse_browse_command("  prev "), BrowseCmd::Prev);
        assert_eq!(parse_browse_command("g 3"), BrowseCmd::Goto(3));
        assert_eq!(parse_browse_command("g 0"), BrowseCmd::Unknown);
        assert_eq!(
            parse_browse_command("/manta ray"),
            BrowseCmd::Search("manta ray".to_string())
        );
        assert_eq!(
            parse_browse_command("f status=PROGRAMADO"),
            BrowseCmd::Filter("status".to_string(), "PROGRAMADO".to_string())
        );
        assert_eq!(parse_browse_command("q"), BrowseCmd::Quit);
        assert_eq!(parse_browse_command("bogus"), BrowseCmd::Unknown);
    }

    #[test]
    fn cli_flags_override_config_file() {
        let args = CliArgs::parse_from([
            "fleetdesk",
            "--url",
            "http://fleet.example.com",
            "boats",
            "list",
        ]);
        let cfg = ConfigFile {
            base_url: Some("http://config.example.com".to_string()),
            page_size: Some(25),
            ..ConfigFile::default()
        };
        let settings = build_settings(&args, cfg);
        assert_eq!(settings.base_url, "http://fleet.example.com");
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.timeout, config::DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let args = CliArgs::parse_from(["fleetdesk", "logout"]);
        let settings = build_settings(&args, ConfigFile::default());
        assert_eq!(settings.base_url, config::DEFAULT_BASE_URL);
        assert_eq!(settings.page_size, config::DEFAULT_PAGE_SIZE);
        assert!(!settings.server_side);
        assert!(!settings.demo_data);
    }
}
