use std::sync::Arc;

use serde_json::Value;

use crate::client::{ApiClient, BranchError, RequestOptions};
use crate::domain::schema::APP_SCHEMA;
use crate::domain::{BranchSecret, Params, validate};
use crate::transport::Method;

const CREATE_REQUIRED: &[&str] = &["user_id", "app_name", "dev_name", "dev_email"];
const MODIFY_REQUIRED: &[&str] = &["dev_name", "branch_secret"];

#[derive(Clone)]
/// Branch app configuration (`/v1/app`).
pub struct App {
    api: Arc<ApiClient>,
}

impl App {
    pub const RESOURCE: &'static str = "/v1/app";

    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn app_path(&self) -> String {
        format!(
            "{}/{}",
            Self::RESOURCE,
            self.api.config().branch_key().as_str()
        )
    }

    /// Create a new app config.
    ///
    /// Requires `user_id`, `app_name`, `dev_name` and `dev_email`.
    pub async fn create(&self, params: Params) -> Result<Value, BranchError> {
        let params = validate(&APP_SCHEMA, params, CREATE_REQUIRED)?;
        self.api
            .request(Method::Post, Self::RESOURCE, RequestOptions::new().json(params))
            .await
    }

    /// Update the app config of the configured key.
    ///
    /// The configured secret is added as `branch_secret`; `dev_name` is required.
    pub async fn modify(&self, mut params: Params) -> Result<Value, BranchError> {
        if let Some(secret) = self.api.config().branch_secret() {
            params.insert(BranchSecret::FIELD, secret.as_str());
        }
        let params = validate(&APP_SCHEMA, params, MODIFY_REQUIRED)?;

        let path = self.app_path();
        let options = RequestOptions::new()
            .query("url", path.as_str())
            .json(params);
        self.api.request(Method::Put, &path, options).await
    }

    /// Fetch the current app config of the configured key.
    pub async fn current(&self) -> Result<Value, BranchError> {
        let mut options = RequestOptions::new();
        if let Some(secret) = self.api.config().branch_secret() {
            options = options.query(BranchSecret::FIELD, secret.as_str());
        }
        self.api.request(Method::Get, &self.app_path(), options).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::fake::FakeTransport;
    use crate::domain::ValidationError;
    use crate::resources::test_support::{BASE, KEY, SECRET, client};

    use super::*;

    fn create_params() -> Params {
        Params::new()
            .with("user_id", 1234)
            .with("app_name", "Demo")
            .with("dev_name", "Dev")
            .with("dev_email", "dev@example.com")
    }

    #[tokio::test]
    async fn create_posts_validated_params() {
        let transport = FakeTransport::json(200, r#"{"branch_key":"key_live_new"}"#);
        let client = client(&transport, false);

        let params = create_params().with("android_app", 9);
        let response = client.app().create(params).await.unwrap();
        assert_eq!(response["branch_key"], "key_live_new");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{BASE}/v1/app"));
        assert_eq!(
            request.body,
            Some(json!({
                "user_id": 1234,
                "app_name": "Demo",
                "dev_name": "Dev",
                "dev_email": "dev@example.com",
                "android_app": 2
            }))
        );
    }

    #[tokio::test]
    async fn create_requires_every_mandatory_field() {
        for field in CREATE_REQUIRED {
            let transport = FakeTransport::json(200, "{}");
            let client = client(&transport, true);
            let params: Params = create_params()
                .iter()
                .filter(|(key, _)| key != field)
                .map(|(key, value)| (key, value.clone()))
                .collect();

            let err = client.app().create(params).await.unwrap_err();
            assert!(
                matches!(
                    err,
                    BranchError::Validation(ValidationError::MissingRequiredField { field: f }) if f == *field
                ),
                "{field}: {err:?}"
            );
            assert!(transport.requests().is_empty());
        }
    }

    #[tokio::test]
    async fn create_rejects_unknown_fields_before_sending() {
        let transport = FakeTransport::json(200, "{}");
        let client = client(&transport, false);
        let err = client
            .app()
            .create(create_params().with("favourite_colour", "blue"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BranchError::Validation(ValidationError::UndefinedField { .. })
        ));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn modify_puts_to_key_path_with_secret_and_url_query() {
        let transport = FakeTransport::json(200, "{}");
        let client = client(&transport, true);

        client
            .app()
            .modify(Params::new().with("dev_name", "New Dev"))
            .await
            .unwrap();

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(
            request.url,
            format!("{BASE}/v1/app/{KEY}?url=%2Fv1%2Fapp%2F{KEY}")
        );
        assert_eq!(
            request.body,
            Some(json!({"dev_name": "New Dev", "branch_secret": SECRET}))
        );
    }

    #[tokio::test]
    async fn modify_without_configured_secret_is_rejected() {
        let transport = FakeTransport::json(200, "{}");
        let client = client(&transport, false);
        let err = client
            .app()
            .modify(Params::new().with("dev_name", "New Dev"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BranchError::Validation(ValidationError::MissingRequiredField {
                field: "branch_secret"
            })
        ));
    }

    #[tokio::test]
    async fn modify_requires_dev_name() {
        let transport = FakeTransport::json(200, "{}");
        let client = client(&transport, true);
        let err = client.app().modify(Params::new()).await.unwrap_err();
        assert!(matches!(
            err,
            BranchError::Validation(ValidationError::MissingRequiredField { field: "dev_name" })
        ));
    }

    #[tokio::test]
    async fn current_gets_key_path_with_secret_query_and_no_body() {
        let transport = FakeTransport::json(200, r#"{"app_name":"Demo"}"#);
        let client = client(&transport, true);

        let response = client.app().current().await.unwrap();
        assert_eq!(response["app_name"], "Demo");

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url,
            format!("{BASE}/v1/app/{KEY}?branch_secret={SECRET}")
        );
        assert_eq!(request.body, None);
    }
}
