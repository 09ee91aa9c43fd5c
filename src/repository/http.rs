//! REST implementation of the repository traits.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::category::Category;
use crate::domain::subcategory::{NewSubCategory, SubCategory, WrittenSubCategory};
use crate::domain::types::{CategoryId, SubCategoryId};
use crate::models::category::CategoryRecord;
use crate::models::config::{ApiPaths, ServerConfig};
use crate::models::subcategory::{ListEnvelope, RecordEnvelope, SubCategoryBody, SubCategoryRecord};
use crate::repository::{
    CategoryReader, RepositoryError, RepositoryResult, SubCategoryListQuery, SubCategoryReader,
    SubCategoryWriter,
};

/// Words that mark a 400/422 response as a uniqueness conflict.
const DUPLICATE_HINTS: &[&str] = &["already exists", "duplicate", "unique", "taken"];

/// Repository backed by the catalog REST API.
///
/// `reqwest::Client` is reference counted internally, so cloning the
/// repository is cheap.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
    paths: ApiPaths,
}

impl HttpRepository {
    /// Build a repository from configuration, applying the request timeout.
    pub fn new(config: &ServerConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            paths: config.paths.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> RepositoryResult<String> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(&body, status);
        log::debug!("Backend responded with {status}: {message}");
        Err(classify_status(status, message))
    }

    async fn fetch_list<T>(&self, request: RequestBuilder) -> RepositoryResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let body = self.send(request).await?;
        serde_json::from_str::<ListEnvelope<T>>(&body)
            .map(ListEnvelope::into_items)
            .map_err(|e| RepositoryError::Decode(e.to_string()))
    }

    /// Records breaking a value constraint are skipped with a warning so one
    /// bad row does not hide the rest of the listing.
    async fn fetch_subcategories(
        &self,
        request: RequestBuilder,
    ) -> RepositoryResult<Vec<SubCategory>> {
        let records = self.fetch_list::<SubCategoryRecord>(request).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                match SubCategory::try_from(record) {
                    Ok(subcategory) => Some(subcategory),
                    Err(e) => {
                        log::warn!("Skipping subcategory record {id}: {e}");
                        None
                    }
                }
            })
            .collect())
    }

    async fn write(&self, request: RequestBuilder) -> RepositoryResult<WrittenSubCategory> {
        let body = self.send(request).await?;
        let record = serde_json::from_str::<RecordEnvelope<SubCategoryRecord>>(&body)
            .map_err(|e| RepositoryError::Decode(e.to_string()))?
            .into_record();
        WrittenSubCategory::try_from(record).map_err(RepositoryError::from)
    }
}

fn transport_error(error: reqwest::Error) -> RepositoryError {
    if error.is_timeout() {
        RepositoryError::Timeout
    } else {
        RepositoryError::Transport(error.to_string())
    }
}

/// Pull a human readable message out of an error body.
fn error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

fn classify_status(status: StatusCode, message: String) -> RepositoryError {
    let lowered = message.to_lowercase();
    let looks_duplicate = DUPLICATE_HINTS.iter().any(|hint| lowered.contains(hint));
    match status {
        StatusCode::CONFLICT => RepositoryError::Conflict(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY if looks_duplicate => {
            RepositoryError::Conflict(message)
        }
        _ => RepositoryError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl CategoryReader for HttpRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let request = self.client.get(self.url(&self.paths.categories));
        self.fetch_list::<CategoryRecord>(request)
            .await?
            .into_iter()
            .map(|record| Category::try_from(record).map_err(RepositoryError::from))
            .collect()
    }
}

#[async_trait]
impl SubCategoryReader for HttpRepository {
    async fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<Vec<SubCategory>> {
        let request = self
            .client
            .get(self.url(&self.paths.subcategories))
            .query(&[("categoryId", query.category_id.get())]);
        self.fetch_subcategories(request).await
    }

    async fn list_available_parents(
        &self,
        category_id: CategoryId,
        exclude_id: Option<SubCategoryId>,
    ) -> RepositoryResult<Vec<SubCategory>> {
        let mut params = vec![("categoryId", category_id.get())];
        if let Some(exclude_id) = exclude_id {
            params.push(("excludeId", exclude_id.get()));
        }
        let request = self
            .client
            .get(self.url(&self.paths.available_parents))
            .query(&params);
        self.fetch_subcategories(request).await
    }
}

#[async_trait]
impl SubCategoryWriter for HttpRepository {
    async fn create_subcategory(
        &self,
        subcategory: &NewSubCategory,
    ) -> RepositoryResult<WrittenSubCategory> {
        let request = self
            .client
            .post(self.url(&self.paths.subcategories))
            .json(&SubCategoryBody::from(subcategory));
        self.write(request).await
    }

    async fn update_subcategory(
        &self,
        id: SubCategoryId,
        subcategory: &NewSubCategory,
    ) -> RepositoryResult<WrittenSubCategory> {
        let path = format!("{}/{}", self.paths.subcategories, id);
        let request = self
            .client
            .put(self.url(&path))
            .json(&SubCategoryBody::from(subcategory));
        self.write(request).await
    }
}
