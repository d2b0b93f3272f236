use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiClient, BranchError, RequestOptions};
use crate::domain::schema::CREDITS_SCHEMA;
use crate::domain::{BranchKey, Params, validate};
use crate::transport::Method;

const ADD_REQUIRED: &[&str] = &["branch_key", "branch_secret", "identity", "amount"];

#[derive(Clone)]
/// Credits ledger (`/v1/credits`).
pub struct Credits {
    api: Arc<ApiClient>,
}

impl Credits {
    pub const RESOURCE: &'static str = "/v1/credits";

    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Credit balance of `identity` under the configured key.
    pub async fn count(&self, identity: &str) -> Result<Value, BranchError> {
        let options = RequestOptions::new()
            .query(BranchKey::FIELD, self.api.config().branch_key().as_str())
            .query("identity", identity);
        self.api.request(Method::Get, Self::RESOURCE, options).await
    }

    /// Add credits. The caller passes `branch_key`, `branch_secret`,
    /// `identity` and `amount` explicitly; optional `bucket`.
    pub async fn add(&self, params: Params) -> Result<Value, BranchError> {
        let params = validate(&CREDITS_SCHEMA, params, ADD_REQUIRED)?;
        self.api
            .request(Method::Post, Self::RESOURCE, RequestOptions::new().json(params))
            .await
    }
}
