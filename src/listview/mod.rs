pub mod filter;
pub mod paginator;

pub use filter::FilterState;
pub use paginator::Paginator;

use serde_json::{json, Value};

use crate::api::{ApiClient, ApiError, CreateTarget, Scope};
use crate::model::{EntityKind, PageMeta, Record};
use crate::output::{self, ViewModel};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaginationMode {
    /// The whole collection is loaded once and sliced locally.
    ClientSide,
    /// Each page is a fresh backend request; filters travel as query
    /// parameters and the pagination metadata is the backend's.
    ServerSide,
}

/// The authoritative local view of one backend collection.
///
/// Owns the records, the active filter, and the pagination state for one
/// entity kind, and keeps them consistent through every load, filter change
/// or mutation. Loads never propagate errors: every failure path ends in a
/// well-defined (empty or fallback) state and a renderable view model.
/// Failed mutations leave the local state untouched.
pub struct ListView {
    kind: EntityKind,
    client: ApiClient,
    mode: PaginationMode,
    scope: Scope,
    page_size: usize,
    collection: Vec<Record>,
    paginator: Paginator<Record>,
    meta: PageMeta,
    filter: FilterState,
    fallback: Option<Vec<Record>>,
}

impl ListView {
    pub fn new(
        kind: EntityKind,
        client: ApiClient,
        mode: PaginationMode,
        page_size: usize,
    ) -> Self {
        let page_size = page_size.max(1);
        Self {
            kind,
            client,
            mode,
            scope: Scope::All,
            page_size,
            collection: Vec::new(),
            paginator: Paginator::new(Vec::new(), page_size),
            meta: PageMeta::empty(page_size),
            filter: FilterState::new(),
            fallback: None,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Static placeholder dataset rendered when a load fails, for demo
    /// continuity only. The failure is still logged.
    pub fn with_fallback(mut self, records: Vec<Record>) -> Self {
        self.fallback = Some(records);
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn collection(&self) -> &[Record] {
        &self.collection
    }

    pub fn meta(&self) -> PageMeta {
        match self.mode {
            PaginationMode::ServerSide => self.meta,
            PaginationMode::ClientSide => PageMeta {
                current_page: self.paginator.current_page(),
                total_pages: self.paginator.total_pages(),
                total_elements: self.paginator.total_elements(),
                page_size: self.page_size,
            },
        }
    }

    /// Seeds the filter state before the first load (server-side mode sends
    /// it as query parameters; client-side mode applies it after loading).
    pub fn set_filter_state(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Merges a record updated through a side channel (owner assignment,
    /// receipt attachment) into the collection, then re-renders.
    pub fn merge_updated(&mut self, record: Record) {
        if let Some(slot) = self
            .collection
            .iter_mut()
            .find(|r| r.id().is_some() && r.id() == record.id())
        {
            *slot = record;
        }
        self.resync_preserving_page();
    }

    /// Requests data and replaces the collection wholesale. On any failure
    /// the collection resets to the fallback dataset (when one is defined)
    /// or to a single empty page; either way the returned view model is
    /// renderable, never stale.
    pub async fn load(&mut self, page: usize) -> ViewModel {
        match self.mode {
            PaginationMode::ServerSide => {
                match self
                    .client
                    .list(self.kind, page, self.page_size, &self.filter)
                    .await
                {
                    Ok((records, meta)) => {
                        self.collection = records.clone();
                        self.paginator.update_items(records);
                        self.meta = meta;
                    }
                    Err(e) => self.recover_failed_load(&e),
                }
            }
            PaginationMode::ClientSide => {
                match self.client.list_all(self.kind, self.scope).await {
                    Ok(records) => {
                        self.collection = records;
                        self.refresh_filtered();
                        self.paginator.go_to_page(page);
                    }
                    Err(e) => self.recover_failed_load(&e),
                }
            }
        }
        self.view_model()
    }

    /// Updates one equality filter. Client-side mode re-filters the loaded
    /// collection; server-side mode reloads from page 0 since the result
    /// set size may change.
    pub async fn set_filter(&mut self, field: &str, value: &str) -> ViewModel {
        self.filter.set(field, value);
        match self.mode {
            PaginationMode::ClientSide => {
                self.refresh_filtered();
                self.view_model()
            }
            PaginationMode::ServerSide => self.load(0).await,
        }
    }

    pub async fn set_search(&mut self, text: &str) -> ViewModel {
        self.filter.set_search(text);
        match self.mode {
            PaginationMode::ClientSide => {
                self.refresh_filtered();
                self.view_model()
            }
            PaginationMode::ServerSide => self.load(0).await,
        }
    }

    /// Moves to page `page`; out-of-range indices are a no-op beyond the
    /// idempotent redraw.
    pub async fn change_page(&mut self, page: usize) -> ViewModel {
        match self.mode {
            PaginationMode::ClientSide => {
                self.paginator.go_to_page(page);
                self.view_model()
            }
            PaginationMode::ServerSide => {
                if page != self.meta.current_page && page < self.meta.total_pages {
                    self.load(page).await
                } else {
                    self.view_model()
                }
            }
        }
    }

    pub async fn create(
        &mut self,
        target: CreateTarget,
        payload: &Value,
    ) -> Result<Record, ApiError> {
        let created = self.client.create(self.kind, target, payload).await?;
        self.collection.push(created.clone());
        if self.mode == PaginationMode::ServerSide {
            self.meta.total_elements += 1;
        }
        self.resync_preserving_page();
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, payload: &Value) -> Result<Record, ApiError> {
        let updated = self.client.update(self.kind, id, payload).await?;
        if let Some(slot) = self.collection.iter_mut().find(|r| r.id() == Some(id)) {
            *slot = updated.clone();
        }
        self.resync_preserving_page();
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> Result<(), ApiError> {
        self.client.delete(self.kind, id).await?;
        self.collection.retain(|r| r.id() != Some(id));
        if self.mode == PaginationMode::ServerSide {
            self.meta.total_elements = self.meta.total_elements.saturating_sub(1);
        }
        self.resync_preserving_page();
        Ok(())
    }

    /// Installs a collection directly (fallback datasets, tests).
    pub fn replace_collection(&mut self, records: Vec<Record>) {
        self.collection = records;
        match self.mode {
            PaginationMode::ClientSide => self.refresh_filtered(),
            PaginationMode::ServerSide => {
                self.paginator.update_items(self.collection.clone());
                self.meta = PageMeta {
                    current_page: 0,
                    total_pages: usize::from(!self.collection.is_empty()),
                    total_elements: self.collection.len(),
                    page_size: self.page_size,
                };
            }
        }
    }

    /// Builds the plain-data rendering of the current page.
    pub fn view_model(&self) -> ViewModel {
        let columns = self.kind.columns();
        let items = match self.mode {
            PaginationMode::ClientSide => self.paginator.current_page_items(),
            PaginationMode::ServerSide => self.paginator.items(),
        };
        let rows = items
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| output::format_field(record, column))
                    .collect()
            })
            .collect();
        let (shown, total) = match self.mode {
            PaginationMode::ClientSide => {
                (self.paginator.total_elements(), self.collection.len())
            }
            PaginationMode::ServerSide => {
                (self.meta.total_elements, self.meta.total_elements)
            }
        };
        let meta = self.meta();
        let page_indicator = (meta.total_pages > 1).then(|| {
            format!("página {} de {}", meta.current_page + 1, meta.total_pages)
        });
        ViewModel {
            title: capitalize(self.kind.label()),
            headers: columns.iter().map(|c| c.header.to_string()).collect(),
            rows,
            count_summary: format!("{} de {} {}", shown, total, self.kind.label()),
            page_indicator,
            empty_message: format!("No se encontraron {}", self.kind.label()),
        }
    }

    fn refresh_filtered(&mut self) {
        let filtered = filter::apply(self.kind, &self.collection, &self.filter);
        self.paginator.update_items(filtered);
    }

    /// After a successful mutation the filtered view is re-derived; the
    /// current page is kept when it still exists, otherwise clamped to the
    /// last page.
    fn resync_preserving_page(&mut self) {
        let previous = self.paginator.current_page();
        match self.mode {
            PaginationMode::ClientSide => self.refresh_filtered(),
            PaginationMode::ServerSide => {
                self.paginator.update_items(self.collection.clone())
            }
        }
        let last = self.paginator.total_pages().saturating_sub(1);
        self.paginator.go_to_page(previous.min(last));
    }

    fn recover_failed_load(&mut self, error: &ApiError) {
        output::error(&format!("failed to load {}: {error}", self.kind.label()));
        match self.fallback.clone() {
            Some(records) => {
                output::warn("backend unavailable, rendering demo dataset");
                self.replace_collection(records);
            }
            None => {
                self.collection.clear();
                self.paginator.update_items(Vec::new());
                self.meta = PageMeta::empty(self.page_size);
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Sample rows mirroring the originals' `showFallbackData()`, used only
/// when `demo_data` is enabled and a load fails.
pub fn demo_dataset(kind: EntityKind) -> Option<Vec<Record>> {
    let values = match kind {
        EntityKind::Boats => json!([
            {
                "id": 1,
                "name": "Catamarán Manta Explorer",
                "type": "TURISMO",
                "model": "Lagoon 450",
                "location": "Cartagena",
                "price": 850_000_000.0,
                "owner": { "id": 1, "fullName": "Carlos Rodríguez" }
            },
            {
                "id": 2,
                "name": "Velero Alianza",
                "type": "ALOJAMIENTO",
                "model": "Beneteau Oceanis 46",
                "location": "Santa Marta",
                "price": 620_000_000.0,
                "owner": null
            }
        ]),
        EntityKind::Payments => json!([
            {
                "id": 1,
                "user": { "id": 1, "fullName": "Carlos Rodríguez", "email": "carlos.rodriguez@email.com" },
                "mount": 500_000.0,
                "date": "2024-12-15T10:00:00",
                "reason": "COUTA",
                "invoice_url": "INV-001-2024"
            },
            {
                "id": 2,
                "user": { "id": 2, "fullName": "María González", "email": "maria.gonzalez@email.com" },
                "mount": 750_000.0,
                "date": "2024-12-10T14:00:00",
                "reason": "MANTENIMIENTO",
                "invoice_url": null
            }
        ]),
        _ => return None,
    };
    serde_json::from_value(values).ok()
}
