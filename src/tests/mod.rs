use chrono::NaiveDate;
use serde_json::json;

use crate::api::{ApiClient, ListResponse};
use crate::listview::filter::{self, FilterState};
use crate::listview::paginator::Paginator;
use crate::listview::{demo_dataset, ListView, PaginationMode};
use crate::model::{EntityKind, LabelMap, Record};
use crate::output;

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

fn boat(id: i64, name: &str, boat_type: &str) -> Record {
    record(json!({
        "id": id,
        "name": name,
        "type": boat_type,
        "model": "Lagoon 450",
        "location": "Cartagena",
        "price": 1_500_000.0
    }))
}

fn numbered_boats(count: i64) -> Vec<Record> {
    (1..=count)
        .map(|i| boat(i, &format!("Bote {i}"), "TURISMO"))
        .collect()
}

/// Client pointed at a closed port: every request fails fast, which is
/// exactly what the failure-path tests need.
fn dead_client() -> ApiClient {
    ApiClient::new("http://127.0.0.1:9", Some("token".to_string()), 1).unwrap()
}

#[test]
fn paginator_slices_25_records_into_3_pages() {
    let mut paginator = Paginator::new(numbered_boats(25), 10);
    assert_eq!(paginator.total_pages(), 3);
    assert_eq!(paginator.current_page_items().len(), 10);

    assert!(paginator.go_to_page(2));
    let items = paginator.current_page_items();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].id(), Some(21));
    assert_eq!(items[4].id(), Some(25));

    // out of range: rejected, stays on page 2
    assert!(!paginator.go_to_page(3));
    assert_eq!(paginator.current_page(), 2);
}

#[test]
fn paginator_empty_collection_has_no_pages() {
    let mut paginator: Paginator<Record> = Paginator::new(Vec::new(), 10);
    assert_eq!(paginator.total_pages(), 0);
    assert!(paginator.current_page_items().is_empty());
    assert!(!paginator.go_to_page(0));
    assert_eq!(paginator.current_page(), 0);
}

#[test]
fn paginator_update_items_resets_to_first_page() {
    let mut paginator = Paginator::new(numbered_boats(25), 10);
    paginator.go_to_page(2);
    paginator.update_items(numbered_boats(4));
    assert_eq!(paginator.current_page(), 0);
    assert_eq!(paginator.total_pages(), 1);
    assert_eq!(paginator.current_page_items().len(), 4);
}

#[test]
fn search_is_case_insensitive_over_declared_fields() {
    let records = vec![
        boat(1, "Catamarán Manta Explorer", "TURISMO"),
        boat(2, "Velero Alianza", "ALOJAMIENTO"),
    ];
    let mut state = FilterState::new();
    state.set_search("manta");
    let filtered = filter::apply(EntityKind::Boats, &records, &state);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id(), Some(1));
}

#[test]
fn search_reaches_nested_fields() {
    let records = vec![
        record(json!({
            "id": 1,
            "user": { "id": 7, "fullName": "María González", "email": "maria@flota.co" },
            "mount": 500_000.0,
            "reason": "COUTA"
        })),
        record(json!({
            "id": 2,
            "user": { "id": 8, "fullName": "Carlos Rodríguez", "email": "carlos@flota.co" },
            "mount": 750_000.0,
            "reason": "MANTENIMIENTO"
        })),
    ];
    let mut state = FilterState::new();
    state.set_search("maria@");
    let filtered = filter::apply(EntityKind::Payments, &records, &state);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id(), Some(1));
}

#[test]
fn filters_combine_and_preserve_relative_order() {
    let records = vec![
        boat(1, "Alfa", "TURISMO"),
        boat(2, "Beta", "ALOJAMIENTO"),
        boat(3, "Alfa Dos", "TURISMO"),
        boat(4, "Alfa Tres", "ALOJAMIENTO"),
    ];
    let mut state = FilterState::new();
    state.set("type", "TURISMO");
    state.set_search("alfa");
    let filtered = filter::apply(EntityKind::Boats, &records, &state);
    let ids: Vec<_> = filtered.iter().map(|r| r.id().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn filter_value_all_clears_the_constraint() {
    let records = vec![boat(1, "Alfa", "TURISMO"), boat(2, "Beta", "ALOJAMIENTO")];
    let mut state = FilterState::new();
    state.set("type", "TURISMO");
    assert_eq!(filter::apply(EntityKind::Boats, &records, &state).len(), 1);
    state.set("type", "all");
    assert!(state.is_empty());
    assert_eq!(filter::apply(EntityKind::Boats, &records, &state).len(), 2);
}

#[test]
fn month_windows_follow_the_first_of_month_rule() {
    let now = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let in_january = record(json!({ "id": 1, "date": "2025-01-02T08:00:00" }));
    let in_october = record(json!({ "id": 2, "date": "2024-10-01T00:00:00" }));
    let in_september = record(json!({ "id": 3, "date": "2024-09-30T23:59:59" }));
    let no_date = record(json!({ "id": 4 }));

    assert!(filter::matches_month(&in_january, "current", now));
    assert!(!filter::matches_month(&in_october, "current", now));
    // last3 window opens on 2024-10-01
    assert!(filter::matches_month(&in_october, "last3", now));
    assert!(!filter::matches_month(&in_september, "last3", now));
    assert!(filter::matches_month(&in_september, "last6", now));
    assert!(!filter::matches_month(&no_date, "current", now));

    // an unrecognized window matches nothing instead of everything
    let ancient = record(json!({ "id": 5, "date": "2019-03-01T00:00:00" }));
    assert!(!filter::matches_month(&ancient, "last12", now));
    assert!(!filter::matches_month(&in_january, "last12", now));
}

#[test]
fn every_kind_declares_a_column_layout() {
    let kinds = [
        EntityKind::Boats,
        EntityKind::Maintenances,
        EntityKind::Payments,
        EntityKind::Owners,
        EntityKind::Documents,
    ];
    for kind in kinds {
        let columns = kind.columns();
        assert!(!columns.is_empty());
        assert_eq!(columns[0].header, "ID");
        assert_eq!(columns[0].field, "id");
    }
}

#[test]
fn record_dot_paths_and_missing_fields() {
    let payment = record(json!({
        "id": 9,
        "user": { "id": 1, "fullName": "Carlos Rodríguez" },
        "invoice_url": null
    }));
    assert_eq!(payment.id(), Some(9));
    assert_eq!(payment.str_field("user.fullName"), Some("Carlos Rodríguez"));
    assert_eq!(payment.display_value("invoice_url"), None);
    assert_eq!(payment.display_value("user"), None);
    assert_eq!(payment.display_value("nonexistent"), None);
}

#[test]
fn label_maps_translate_known_codes_and_pass_through_unknown() {
    assert_eq!(LabelMap::BoatType.resolve("TURISMO"), "Turismo");
    assert_eq!(
        LabelMap::BoatType.resolve("EVENTOS_NEGOCIOS"),
        "Eventos y Negocios"
    );
    assert_eq!(LabelMap::PaymentReason.resolve("COUTA"), "Cuota");
    assert_eq!(LabelMap::Priority.resolve("CRITICA"), "Crítica");
    assert_eq!(LabelMap::MaintenanceStatus.resolve("WHATEVER"), "WHATEVER");
}

#[test]
fn currency_uses_colombian_peso_grouping() {
    assert_eq!(output::format_currency(1_500_000.0), "$ 1.500.000");
    assert_eq!(output::format_currency(500_000.0), "$ 500.000");
    assert_eq!(output::format_currency(0.0), "$ 0");
    assert_eq!(output::format_currency(999.6), "$ 1.000");
}

#[test]
fn datetimes_render_localized() {
    assert_eq!(
        output::format_datetime("2024-12-15T10:00:00").as_deref(),
        Some("15/12/2024 10:00")
    );
    assert_eq!(
        output::format_datetime("2024-12-15T10:00:00.123").as_deref(),
        Some("15/12/2024 10:00")
    );
    assert_eq!(output::format_datetime("no es fecha"), None);
}

#[test]
fn paginated_and_bare_array_responses_normalize() {
    let paginated: ListResponse = serde_json::from_value(json!({
        "content": [{ "id": 1 }, { "id": 2 }],
        "totalPages": 5,
        "totalElements": 42
    }))
    .unwrap();
    let (records, meta) = paginated.normalize(1, 10);
    assert_eq!(records.len(), 2);
    assert_eq!(meta.total_pages, 5);
    assert_eq!(meta.total_elements, 42);
    assert_eq!(meta.current_page, 1);

    let bare: ListResponse =
        serde_json::from_value(json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }])).unwrap();
    let (records, meta) = bare.normalize(0, 10);
    assert_eq!(records.len(), 3);
    assert_eq!(meta.total_pages, 1);
    assert_eq!(meta.total_elements, 3);

    let empty: ListResponse = serde_json::from_value(json!([])).unwrap();
    let (_, meta) = empty.normalize(0, 10);
    assert_eq!(meta.total_pages, 0);
}

#[tokio::test]
async fn view_model_pages_and_counts_a_loaded_collection() {
    let mut view = ListView::new(EntityKind::Boats, dead_client(), PaginationMode::ClientSide, 10);
    view.replace_collection(numbered_boats(25));

    let vm = view.view_model();
    assert_eq!(vm.rows.len(), 10);
    assert_eq!(vm.count_summary, "25 de 25 embarcaciones");
    assert_eq!(vm.page_indicator.as_deref(), Some("página 1 de 3"));

    let vm = view.change_page(2).await;
    assert_eq!(vm.rows.len(), 5);
    assert_eq!(vm.page_indicator.as_deref(), Some("página 3 de 3"));

    // out of range: idempotent redraw, no state change
    let vm = view.change_page(3).await;
    assert_eq!(vm.rows.len(), 5);
    assert_eq!(view.meta().current_page, 2);
}

#[tokio::test]
async fn setting_a_filter_narrows_and_resets_the_page() {
    let mut view = ListView::new(EntityKind::Boats, dead_client(), PaginationMode::ClientSide, 10);
    let mut records = numbered_boats(25);
    records.push(boat(26, "Catamarán Manta Explorer", "ALOJAMIENTO"));
    view.replace_collection(records);
    view.change_page(2).await;

    let vm = view.set_filter("type", "ALOJAMIENTO").await;
    assert_eq!(vm.rows.len(), 1);
    assert_eq!(vm.count_summary, "1 de 26 embarcaciones");
    assert_eq!(view.meta().current_page, 0);

    let vm = view.set_search("manta").await;
    assert_eq!(vm.rows.len(), 1);
    let vm_empty = view.set_filter("type", "TURISMO").await;
    assert_eq!(vm_empty.rows.len(), 0);
    assert_eq!(vm_empty.count_summary, "0 de 26 embarcaciones");
}

#[tokio::test]
async fn failed_load_resets_to_an_empty_renderable_state() {
    let mut view =
        ListView::new(EntityKind::Payments, dead_client(), PaginationMode::ClientSide, 10);
    view.replace_collection(vec![record(json!({ "id": 1, "mount": 100.0 }))]);

    let vm = view.load(0).await;
    assert!(vm.rows.is_empty());
    assert_eq!(vm.count_summary, "0 de 0 pagos");
    assert_eq!(view.meta().total_elements, 0);
    assert!(view.collection().is_empty());
}

#[tokio::test]
async fn failed_load_with_fallback_renders_the_demo_dataset() {
    let demo = demo_dataset(EntityKind::Payments).unwrap();
    let mut view =
        ListView::new(EntityKind::Payments, dead_client(), PaginationMode::ClientSide, 10)
            .with_fallback(demo.clone());

    let vm = view.load(0).await;
    assert_eq!(vm.rows.len(), demo.len());
    assert_eq!(view.collection(), &demo[..]);
}

#[tokio::test]
async fn failed_mutations_leave_the_collection_untouched() {
    let mut view = ListView::new(EntityKind::Boats, dead_client(), PaginationMode::ClientSide, 10);
    view.replace_collection(numbered_boats(3));
    let before = view.collection().to_vec();

    assert!(view.delete(2).await.is_err());
    assert_eq!(view.collection(), &before[..]);

    assert!(view
        .create(crate::api::CreateTarget::Root, &json!({ "name": "Nueva" }))
        .await
        .is_err());
    assert_eq!(view.collection(), &before[..]);

    assert!(view.update(1, &json!({ "name": "Otro" })).await.is_err());
    assert_eq!(view.collection(), &before[..]);
    assert_eq!(view.view_model().count_summary, "3 de 3 embarcaciones");
}

#[test]
fn side_channel_updates_merge_in_place() {
    let mut view = ListView::new(EntityKind::Boats, dead_client(), PaginationMode::ClientSide, 10);
    view.replace_collection(numbered_boats(3));

    let mut renamed = boat(2, "Bote 2 renovado", "TURISMO");
    renamed
        .0
        .insert("owner".to_string(), json!({ "id": 5, "fullName": "Ana Pérez" }));
    view.merge_updated(renamed.clone());

    assert_eq!(view.collection().len(), 3);
    assert_eq!(view.collection()[1], renamed);
    let vm = view.view_model();
    assert_eq!(vm.rows[1][1], "Bote 2 renovado");
    assert_eq!(vm.rows[1][6], "Ana Pérez");
}

#[test]
fn empty_view_renders_placeholder_row_and_summary() {
    let view = ListView::new(EntityKind::Maintenances, dead_client(), PaginationMode::ClientSide, 10);
    let vm = view.view_model();
    let table = output::render_table(&vm);
    assert!(table.contains("No se encontraron mantenimientos"));
    assert!(table.contains("0 de 0 mantenimientos"));
}

#[test]
fn missing_optional_fields_render_placeholders() {
    let boat = record(json!({
        "id": 1,
        "name": "Sin dueño",
        "type": "TURISMO",
        "model": "X",
        "location": "Y",
        "price": 1000.0,
        "owner": null
    }));
    let columns = EntityKind::Boats.columns();
    let owner_column = columns.iter().find(|c| c.field == "owner.fullName").unwrap();
    assert_eq!(output::format_field(&boat, owner_column), "Sin asignar");

    let maintenance = record(json!({ "id": 2, "type": "PREVENTIVO" }));
    let columns = EntityKind::Maintenances.columns();
    let performed = columns.iter().find(|c| c.field == "performedDate").unwrap();
    assert_eq!(output::format_field(&maintenance, performed), "Pendiente");
    let description = columns.iter().find(|c| c.field == "description").unwrap();
    assert_eq!(output::format_field(&maintenance, description), "Sin descripción");
}

#[test]
fn unknown_filter_fields_are_rejected_up_front() {
    use crate::cli::args::CliArgs;
    use crate::cli::validation;
    use clap::Parser;

    let args = CliArgs::parse_from(["fleetdesk", "boats", "list", "-f", "bogus=1"]);
    assert!(validation::validate(&args).is_err());

    let args = CliArgs::parse_from(["fleetdesk", "boats", "list", "-f", "type=TURISMO"]);
    assert!(validation::validate(&args).is_ok());

    let args = CliArgs::parse_from(["fleetdesk", "payments", "list", "-f", "month=last12"]);
    assert!(validation::validate(&args).is_err());
    let args = CliArgs::parse_from(["fleetdesk", "payments", "list", "-f", "month=last3"]);
    assert!(validation::validate(&args).is_ok());
    let args = CliArgs::parse_from(["fleetdesk", "payments", "list", "-f", "month=all"]);
    assert!(validation::validate(&args).is_ok());
}

#[test]
fn filter_pairs_and_emails_validate() {
    use crate::cli::validation::{parse_filter_kv, validate_email};

    assert_eq!(
        parse_filter_kv("status=PROGRAMADO").unwrap(),
        ("status".to_string(), "PROGRAMADO".to_string())
    );
    assert!(parse_filter_kv("sin-igual").is_err());
    assert!(parse_filter_kv("=vacio").is_err());

    assert!(validate_email("carlos.rodriguez@email.com").is_ok());
    assert!(validate_email("no-es-un-email").is_err());
}
