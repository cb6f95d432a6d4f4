//! HTTP client for the product backend REST API

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    CategoryNode, DraftProduct, DraftSubmission, FabricCombination, VariantAttributeValue, VendorSummary,
};
use shared::response::ApiEnvelope;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for the product backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    catalog_status: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            catalog_status: config.catalog_status.clone(),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET and parse the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let response = self.authorize(self.client.get(self.url(path))).send().await?;
        Self::handle_response(response).await
    }

    /// GET and unwrap the `response` envelope
    pub async fn get_response<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get::<ApiEnvelope<T>>(path)
            .await?
            .into_response()
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing response payload for {path}")))
    }

    /// POST a multipart form; the body of a successful answer is returned as JSON,
    /// or `Null` when it is empty
    pub async fn post_multipart(&self, path: &str, form: Form) -> ClientResult<serde_json::Value> {
        tracing::debug!(path, "POST multipart");
        let response = self
            .authorize(self.client.post(self.url(path)).multipart(form))
            .send()
            .await?;
        let text = Self::check_status(response).await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(Into::into)
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let text = Self::check_status(response).await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Map non-success statuses to errors, returning the body text otherwise
    async fn check_status(response: reqwest::Response) -> ClientResult<String> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return Ok(text);
        }

        let message = error_message(&text).unwrap_or_else(|| status.to_string());
        tracing::warn!(status = status.as_u16(), %message, "Backend request failed");
        Err(match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        })
    }

    // ========== Catalog API ==========

    /// Category groups with their nested children
    pub async fn categories(&self) -> ClientResult<Vec<CategoryNode>> {
        self.get_response(&format!("product-category?status={}", self.catalog_status))
            .await
    }

    /// One category by id, including its parent id
    pub async fn category(&self, id: &str) -> ClientResult<CategoryNode> {
        self.get_response(&format!("product-category/category/{id}")).await
    }

    pub async fn variant_attributes(&self) -> ClientResult<Vec<VariantAttributeValue>> {
        self.get_response("variant").await
    }

    /// Named fabric combinations
    pub async fn fabric_combinations(&self) -> ClientResult<Vec<FabricCombination>> {
        self.get_response(&format!("fabric?status={}", self.catalog_status))
            .await
    }

    // ========== Draft API ==========

    pub async fn draft_product(&self, id: &str) -> ClientResult<DraftProduct> {
        self.get_response(&format!("draftProduct/get/{id}")).await
    }

    pub async fn vendor(&self, id: &str) -> ClientResult<VendorSummary> {
        self.get_response(&format!("vendor/{id}")).await
    }

    /// Fetch a draft and fill in its vendor's username
    ///
    /// A failed vendor lookup leaves the username as stored.
    pub async fn load_draft(&self, id: &str) -> ClientResult<DraftProduct> {
        let mut draft = self.draft_product(id).await?;
        if !draft.vendor_id.trim().is_empty() {
            match self.vendor(&draft.vendor_id).await {
                Ok(vendor) if !vendor.username.is_empty() => draft.vendor_username = vendor.username,
                Ok(_) => {}
                Err(e) => tracing::warn!(vendor_id = %draft.vendor_id, error = %e, "Vendor lookup failed"),
            }
        }
        Ok(draft)
    }

    /// Create or update a draft; the record travels as the `product` form part
    pub async fn submit_draft(&self, submission: &DraftSubmission) -> ClientResult<serde_json::Value> {
        let json = serde_json::to_string(submission)?;
        let part = Part::text(json).mime_str("application/json")?;
        let form = Form::new().part("product", part);
        let answer = self.post_multipart("draftProduct", form).await?;
        tracing::info!(id = ?submission.product.id, "Draft product submitted");
        Ok(answer)
    }

    /// Displayable URL of a stored image path
    ///
    /// Stored paths carry the API prefix once (`/api/images/..`) which is
    /// already part of the base URL. Absolute URIs pass through.
    pub fn image_url(&self, path: &str) -> String {
        if path.contains("://") {
            return path.to_string();
        }
        let relative = path.replacen("/api", "", 1);
        format!("{}/{}", self.base_url, relative.trim_start_matches('/'))
    }
}

/// `message` (or `error`) field of a JSON error body, else the raw text
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let from_json = serde_json::from_str::<serde_json::Value>(body).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|k| v.get(*k).and_then(|m| m.as_str()).map(String::from))
    });
    Some(from_json.unwrap_or_else(|| body.to_string()))
}
