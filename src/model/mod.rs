use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One backend entity instance (boat, maintenance, payment, owner, document).
/// Records are passed through opaquely; the controller only reaches into the
/// fields a kind declares for filtering and display.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Record(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    /// Dot-path lookup, e.g. `user.fullName`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current: &Value = self.0.get(path.split('.').next()?)?;
        for segment in path.split('.').skip(1) {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn str_field(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn f64_field(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Scalar field rendered as a plain string, `None` for null/missing
    /// fields and for nested objects or arrays.
    pub fn display_value(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Pagination metadata for the current view, either computed locally over a
/// fully loaded collection or taken verbatim from a paginated response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    pub page_size: usize,
}

impl PageMeta {
    pub fn empty(page_size: usize) -> Self {
        Self {
            current_page: 0,
            total_pages: 0,
            total_elements: 0,
            page_size,
        }
    }
}

/// Enumerated-code label tables carried over from the backend entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMap {
    BoatType,
    MaintenanceType,
    MaintenanceStatus,
    Priority,
    PaymentReason,
}

impl LabelMap {
    /// Human label for a backend code. Unknown codes pass through verbatim.
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        let label = match self {
            LabelMap::BoatType => match code {
                "TURISMO" => "Turismo",
                "ALOJAMIENTO" => "Alojamiento",
                "EVENTOS_NEGOCIOS" => "Eventos y Negocios",
                "DISENO_EXCLUSIVO" => "Diseño Exclusivo",
                _ => code,
            },
            LabelMap::MaintenanceType => match code {
                "PREVENTIVO" => "Preventivo",
                "CORRECTIVO" => "Correctivo",
                "PREDICTIVO" => "Predictivo",
                _ => code,
            },
            LabelMap::MaintenanceStatus => match code {
                "PROGRAMADO" => "Programado",
                "EN_PROCESO" => "En Proceso",
                "COMPLETADO" => "Completado",
                "CANCELADO" => "Cancelado",
                _ => code,
            },
            LabelMap::Priority => match code {
                "BAJA" => "Baja",
                "MEDIA" => "Media",
                "ALTA" => "Alta",
                "CRITICA" => "Crítica",
                _ => code,
            },
            LabelMap::PaymentReason => match code {
                "COUTA" => "Cuota",
                "MANTENIMIENTO" => "Mantenimiento",
                _ => code,
            },
        };
        label
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldFormat {
    Text,
    Integer,
    Currency,
    DateTime,
    Label(LabelMap),
}

/// One table column: header, source field (dot path) and how to format it.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
    pub format: FieldFormat,
    pub placeholder: &'static str,
}

const fn col(header: &'static str, field: &'static str, format: FieldFormat) -> Column {
    Column {
        header,
        field,
        format,
        placeholder: "N/A",
    }
}

const fn col_ph(
    header: &'static str,
    field: &'static str,
    format: FieldFormat,
    placeholder: &'static str,
) -> Column {
    Column {
        header,
        field,
        format,
        placeholder,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Boats,
    Maintenances,
    Payments,
    Owners,
    Documents,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Boats => "embarcaciones",
            EntityKind::Maintenances => "mantenimientos",
            EntityKind::Payments => "pagos",
            EntityKind::Owners => "propietarios",
            EntityKind::Documents => "documentos",
        }
    }

    /// Path segment under `/api/v1` for the plain CRUD endpoints.
    pub fn base_path(&self) -> &'static str {
        match self {
            EntityKind::Boats => "boat",
            EntityKind::Maintenances => "maintenances",
            EntityKind::Payments => "payments",
            EntityKind::Owners => "auth",
            EntityKind::Documents => "documents",
        }
    }

    /// Path for the full-collection list, where it differs from the CRUD
    /// base (admin maintenance listing lives under /admin).
    pub fn list_path(&self) -> &'static str {
        match self {
            EntityKind::Maintenances => "admin/maintenances",
            _ => self.base_path(),
        }
    }

    /// Whether the backend paginates this collection server-side.
    pub fn server_pagination(&self) -> bool {
        matches!(self, EntityKind::Boats | EntityKind::Owners)
    }

    /// Fields matched case-insensitively by the free-text search.
    pub fn search_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Boats => &["name", "model", "location"],
            EntityKind::Maintenances => &["description", "boatName"],
            EntityKind::Payments => &["user.fullName", "user.email", "invoice_url"],
            EntityKind::Owners => &["fullName", "email", "username"],
            EntityKind::Documents => &["name"],
        }
    }

    /// Equality-filter keys accepted for this kind ("all" = unconstrained).
    pub fn filter_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Boats => &["type", "status"],
            EntityKind::Maintenances => &["type", "status", "priority"],
            EntityKind::Payments => &["reason", "month"],
            EntityKind::Owners => &[],
            EntityKind::Documents => &[],
        }
    }

    /// Filter keys forwarded as query parameters in server-side mode.
    pub fn query_filters(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Boats => &["type", "status"],
            _ => &[],
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        const BOAT_COLUMNS: &[Column] = &[
            col("ID", "id", FieldFormat::Integer),
            col("Nombre", "name", FieldFormat::Text),
            col("Tipo", "type", FieldFormat::Label(LabelMap::BoatType)),
            col("Modelo", "model", FieldFormat::Text),
            col("Ubicación", "location", FieldFormat::Text),
            col("Precio", "price", FieldFormat::Currency),
            col_ph(
                "Propietario",
                "owner.fullName",
                FieldFormat::Text,
                "Sin asignar",
            ),
        ];
        const MAINTENANCE_COLUMNS: &[Column] = &[
            col("ID", "id", FieldFormat::Integer),
            col("Embarcación", "boatName", FieldFormat::Text),
            col("Tipo", "type", FieldFormat::Label(LabelMap::MaintenanceType)),
            col(
                "Estado",
                "status",
                FieldFormat::Label(LabelMap::MaintenanceStatus),
            ),
            col(
                "Prioridad",
                "priority",
                FieldFormat::Label(LabelMap::Priority),
            ),
            col("Programado", "scheduledDate", FieldFormat::DateTime),
            col_ph(
                "Realizado",
                "performedDate",
                FieldFormat::DateTime,
                "Pendiente",
            ),
            col("Costo", "cost", FieldFormat::Currency),
            col_ph(
                "Descripción",
                "description",
                FieldFormat::Text,
                "Sin descripción",
            ),
        ];
        const PAYMENT_COLUMNS: &[Column] = &[
            col("ID", "id", FieldFormat::Integer),
            col("Propietario", "user.fullName", FieldFormat::Text),
            col(
                "Razón",
                "reason",
                FieldFormat::Label(LabelMap::PaymentReason),
            ),
            col("Monto", "mount", FieldFormat::Currency),
            col("Fecha", "date", FieldFormat::DateTime),
            col_ph(
                "Factura",
                "invoice_url",
                FieldFormat::Text,
                "Sin factura",
            ),
        ];
        const OWNER_COLUMNS: &[Column] = &[
            col("ID", "id", FieldFormat::Integer),
            col("Nombre", "fullName", FieldFormat::Text),
            col("Email", "email", FieldFormat::Text),
            col("Usuario", "username", FieldFormat::Text),
        ];
        const DOCUMENT_COLUMNS: &[Column] = &[
            col("ID", "id", FieldFormat::Integer),
            col("Nombre", "name", FieldFormat::Text),
            col("Subido", "uploadDate", FieldFormat::DateTime),
        ];
        match self {
            EntityKind::Boats => BOAT_COLUMNS,
            EntityKind::Maintenances => MAINTENANCE_COLUMNS,
            EntityKind::Payments => PAYMENT_COLUMNS,
            EntityKind::Owners => OWNER_COLUMNS,
            EntityKind::Documents => DOCUMENT_COLUMNS,
        }
    }
}
