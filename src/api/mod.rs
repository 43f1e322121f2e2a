use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{EntityKind, PageMeta, Record};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status} from {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },

    #[error("unexpected response shape from {path}: {source}")]
    Shape {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no active session, run 'fleetdesk login' first")]
    MissingSession,

    #[error("failed to read upload file {path}: {source}")]
    UploadRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write download to {path}: {source}")]
    DownloadWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// List endpoints answer either a Spring page object or a bare array; the
/// two shapes are normalized here, once, instead of `data.content || data`
/// checks at every call site.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paginated {
        content: Vec<Record>,
        #[serde(rename = "totalPages")]
        total_pages: usize,
        #[serde(rename = "totalElements")]
        total_elements: usize,
    },
    Plain(Vec<Record>),
}

impl ListResponse {
    /// Flattens to records plus pagination metadata. Bare arrays become a
    /// single page (page 0) sized to the full response.
    pub fn normalize(self, requested_page: usize, page_size: usize) -> (Vec<Record>, PageMeta) {
        match self {
            ListResponse::Paginated {
                content,
                total_pages,
                total_elements,
            } => {
                let meta = PageMeta {
                    current_page: requested_page.min(total_pages.saturating_sub(1)),
                    total_pages,
                    total_elements,
                    page_size,
                };
                (content, meta)
            }
            ListResponse::Plain(records) => {
                let meta = PageMeta {
                    current_page: 0,
                    total_pages: usize::from(!records.is_empty()),
                    total_elements: records.len(),
                    page_size,
                };
                (records, meta)
            }
        }
    }
}

/// Where a created record hangs off the endpoint tree.
#[derive(Clone, Copy, Debug)]
pub enum CreateTarget {
    Root,
    /// `POST /maintenances/{boatId}`
    Boat(i64),
    /// `POST /payments/{boatId}/{userId}`
    BoatUser(i64, i64),
}

/// What slice of a collection a listing is scoped to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    All,
    /// Documents of one boat.
    Boat(i64),
    /// Collections visible to one owner (dashboard payload / per-user list).
    Owner(i64),
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub status: bool,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub jwt: String,
    #[serde(default, rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Authenticated client for the fleet backend. JSON requests carry
/// `Content-Type: application/json` plus the bearer token when one is
/// present; multipart uploads carry only the token.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout_seconds: u64,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|source| ApiError::ClientBuild { source })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(
        &self,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<String, ApiError> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;
        let status = resp.status();
        let body = resp.text().await.map_err(|source| ApiError::Transport {
            path: path.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
                body: body.chars().take(300).collect(),
            });
        }
        Ok(body)
    }

    async fn get_value(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let req = self.http.get(self.url(path)).query(query);
        let body = self.execute(path, req).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Shape {
            path: path.to_string(),
            source,
        })
    }

    fn decode_record(path: &str, body: &str) -> Result<Record, ApiError> {
        serde_json::from_str(body).map_err(|source| ApiError::Shape {
            path: path.to_string(),
            source,
        })
    }

    fn decode_records(path: &str, value: Value) -> Result<Vec<Record>, ApiError> {
        serde_json::from_value(value).map_err(|source| ApiError::Shape {
            path: path.to_string(),
            source,
        })
    }

    /// One page of a server-paginated collection, with the active filter
    /// values forwarded as query parameters.
    pub async fn list(
        &self,
        kind: EntityKind,
        page: usize,
        size: usize,
        filter: &crate::listview::FilterState,
    ) -> Result<(Vec<Record>, PageMeta), ApiError> {
        let path = kind.list_path();
        let mut query: Vec<(&str, String)> =
            vec![("page", page.to_string()), ("size", size.to_string())];
        if !filter.search().is_empty() && kind == EntityKind::Boats {
            query.push(("search", filter.search().to_string()));
        }
        for key in kind.query_filters() {
            if let Some(value) = filter.get(key) {
                query.push((key, value.to_string()));
            }
        }
        let value = self.get_value(path, &query).await?;
        let parsed: ListResponse =
            serde_json::from_value(value).map_err(|source| ApiError::Shape {
                path: path.to_string(),
                source,
            })?;
        Ok(parsed.normalize(page, size))
    }

    /// The full collection for client-side filtering and pagination. The
    /// originals fetched `page=0&size=100` and treated it as everything.
    pub async fn list_all(
        &self,
        kind: EntityKind,
        scope: Scope,
    ) -> Result<Vec<Record>, ApiError> {
        match (kind, scope) {
            (EntityKind::Documents, Scope::Boat(boat_id)) => {
                let path = format!("boat/{boat_id}/documents");
                let value = self.get_value(&path, &[]).await?;
                Self::decode_records(&path, value)
            }
            (EntityKind::Payments, Scope::Owner(user_id)) => {
                let path = format!("payments/{user_id}");
                let value = self.get_value(&path, &[]).await?;
                Self::decode_records(&path, value)
            }
            (EntityKind::Maintenances, Scope::Owner(user_id))
            | (EntityKind::Boats, Scope::Owner(user_id)) => {
                let path = format!("owner/dashboard/{user_id}");
                let value = self.get_value(&path, &[]).await?;
                let field = match kind {
                    EntityKind::Maintenances => "allMaintenances",
                    _ => "boats",
                };
                let slice = value.get(field).cloned().unwrap_or(Value::Array(vec![]));
                Self::decode_records(&path, slice)
            }
            _ => {
                let path = kind.list_path();
                let query = [("page", "0".to_string()), ("size", "100".to_string())];
                let value = self.get_value(path, &query).await?;
                let parsed: ListResponse =
                    serde_json::from_value(value).map_err(|source| ApiError::Shape {
                        path: path.to_string(),
                        source,
                    })?;
                let (records, _) = parsed.normalize(0, 100);
                Ok(records)
            }
        }
    }

    pub async fn get(&self, kind: EntityKind, id: i64) -> Result<Record, ApiError> {
        let path = format!("{}/{id}", kind.base_path());
        let req = self.http.get(self.url(&path));
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn create(
        &self,
        kind: EntityKind,
        target: CreateTarget,
        payload: &Value,
    ) -> Result<Record, ApiError> {
        let base = match kind {
            // Owner accounts are created through a dedicated endpoint.
            EntityKind::Owners => "auth/create-owner".to_string(),
            _ => kind.base_path().to_string(),
        };
        let path = match target {
            CreateTarget::Root => base,
            CreateTarget::Boat(boat_id) => format!("{base}/{boat_id}"),
            CreateTarget::BoatUser(boat_id, user_id) => format!("{base}/{boat_id}/{user_id}"),
        };
        let req = self.http.post(self.url(&path)).json(payload);
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        payload: &Value,
    ) -> Result<Record, ApiError> {
        let path = format!("{}/{id}", kind.base_path());
        let req = self.http.put(self.url(&path)).json(payload);
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn delete(&self, kind: EntityKind, id: i64) -> Result<(), ApiError> {
        let path = format!("{}/{id}", kind.base_path());
        let req = self.http.delete(self.url(&path));
        self.execute(&path, req).await?;
        Ok(())
    }

    /// `PUT /boat/{boatId}/owner/{ownerId}`, returns the updated boat.
    pub async fn assign_owner(&self, boat_id: i64, owner_id: i64) -> Result<Record, ApiError> {
        let path = format!("boat/{boat_id}/owner/{owner_id}");
        let req = self.http.put(self.url(&path));
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn upload_document(
        &self,
        boat_id: i64,
        file: &Path,
        name: &str,
    ) -> Result<Record, ApiError> {
        let path = format!("boat/{boat_id}/documents");
        let form = Self::file_form(file, "file").await?.text("name", name.to_string());
        let req = self.http.post(self.url(&path)).multipart(form);
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn rename_document(
        &self,
        boat_id: i64,
        document_id: i64,
        name: &str,
    ) -> Result<Record, ApiError> {
        let path = format!("boat/{boat_id}/documents/{document_id}");
        let req = self
            .http
            .put(self.url(&path))
            .query(&[("name", name.to_string())]);
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn delete_document(&self, boat_id: i64, document_id: i64) -> Result<(), ApiError> {
        let path = format!("boat/{boat_id}/documents/{document_id}");
        let req = self.http.delete(self.url(&path));
        self.execute(&path, req).await?;
        Ok(())
    }

    /// `PUT /payments/{id}/attach-receipt`: multipart, auth header only.
    pub async fn attach_receipt(&self, payment_id: i64, file: &Path) -> Result<Record, ApiError> {
        let path = format!("payments/{payment_id}/attach-receipt");
        let form = Self::file_form(file, "receipt").await?;
        let req = self.http.put(self.url(&path)).multipart(form);
        let body = self.execute(&path, req).await?;
        Self::decode_record(&path, &body)
    }

    pub async fn download_receipt(
        &self,
        payment_id: i64,
        out_path: &Path,
    ) -> Result<u64, ApiError> {
        let path = format!("payments/{payment_id}/download-receipt");
        let resp = self
            .authorized(self.http.get(self.url(&path)))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.clone(),
                source,
            })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                path,
                body: body.chars().take(300).collect(),
            });
        }
        let bytes = resp.bytes().await.map_err(|source| ApiError::Transport {
            path: path.clone(),
            source,
        })?;
        tokio::fs::write(out_path, &bytes)
            .await
            .map_err(|source| ApiError::DownloadWrite {
                path: out_path.display().to_string(),
                source,
            })?;
        Ok(bytes.len() as u64)
    }

    /// `POST /auth/login` is the one unauthenticated JSON call.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let path = "auth/login";
        let payload = serde_json::json!({ "username": username, "password": password });
        let req = self.http.post(self.url(path)).json(&payload);
        let body = self.execute(path, req).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Shape {
            path: path.to_string(),
            source,
        })
    }

    async fn file_form(
        file: &Path,
        part_name: &'static str,
    ) -> Result<reqwest::multipart::Form, ApiError> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|source| ApiError::UploadRead {
                path: file.display().to_string(),
                source,
            })?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.bin".to_string());
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        Ok(reqwest::multipart::Form::new().part(part_name, part))
    }
}
