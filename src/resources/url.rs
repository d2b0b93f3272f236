use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiClient, BranchError, RequestOptions};
use crate::domain::schema::URL_SCHEMA;
use crate::domain::{BranchKey, BranchSecret, Params, validate};
use crate::transport::Method;

const CREATE_REQUIRED: &[&str] = &[BranchKey::FIELD];
const MODIFY_REQUIRED: &[&str] = &[BranchKey::FIELD, BranchSecret::FIELD];

#[derive(Clone)]
/// Deep-linking URLs (`/v1/url`).
pub struct Url {
    api: Arc<ApiClient>,
}

impl Url {
    pub const RESOURCE: &'static str = "/v1/url";

    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn with_key(&self, mut params: Params) -> Params {
        params.insert(BranchKey::FIELD, self.api.config().branch_key().as_str());
        params
    }

    /// Create one deep-linking URL.
    pub async fn create(&self, params: Params) -> Result<Value, BranchError> {
        let params = validate(&URL_SCHEMA, self.with_key(params), CREATE_REQUIRED)?;
        self.api
            .request(Method::Post, Self::RESOURCE, RequestOptions::new().json(params))
            .await
    }

    /// Create several deep-linking URLs in one call.
    ///
    /// Every bag is validated on its own; the first failure aborts the whole
    /// batch before anything is sent.
    pub async fn bulk_create(&self, links: Vec<Params>) -> Result<Value, BranchError> {
        let body = links
            .into_iter()
            .map(|params| {
                validate(&URL_SCHEMA, self.with_key(params), CREATE_REQUIRED).map(Value::from)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let path = format!(
            "{}/bulk/{}",
            Self::RESOURCE,
            self.api.config().branch_key().as_str()
        );
        self.api
            .request(Method::Post, &path, RequestOptions::new().json(body))
            .await
    }

    /// Modify the existing link `url`; needs the configured secret.
    pub async fn modify(&self, url: &str, params: Params) -> Result<Value, BranchError> {
        let mut params = self.with_key(params);
        if let Some(secret) = self.api.config().branch_secret() {
            params.insert(BranchSecret::FIELD, secret.as_str());
        }
        let params = validate(&URL_SCHEMA, params, MODIFY_REQUIRED)?;

        let options = RequestOptions::new().query("url", url).json(params);
        self.api.request(Method::Put, Self::RESOURCE, options).await
    }

    /// Read the state of the existing link `url`.
    pub async fn state(&self, url: &str) -> Result<Value, BranchError> {
        let options = RequestOptions::new()
            .query("url", url)
            .query(BranchKey::FIELD, self.api.config().branch_key().as_str());
        self.api.request(Method::Get, Self::RESOURCE, options).await
    }
}
