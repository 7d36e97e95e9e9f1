//! HTTP implementation of the engine's [`Store`] for a json-server style REST API.
//!
//! Resources live at `/operations`, `/categories` and `/users`; listing supports
//! equality filters and `_sort`/`_order` query parameters.

use api_types::{
    Id,
    category::{Category, CategoryNew},
    operation::{Operation, OperationNew},
    user::User,
};
use engine::{Filter, GatewayError, GatewayResult, Store};
use reqwest::{Method, Url};
use serde::{Serialize, de::DeserializeOwned};

mod error;

const OPERATIONS: &str = "operations";
const CATEGORIES: &str = "categories";
const USERS: &str = "users";

#[derive(Clone, Debug)]
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, proxies, ...).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> GatewayResult<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|err| GatewayError::InvalidUrl(format!("{base_url}: {err}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<TResp: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<TResp> {
        tracing::debug!(path, ?query, "GET");
        let res = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(error::transport)?;

        if res.status().is_success() {
            return res.json::<TResp>().await.map_err(error::transport);
        }
        Err(error::status(res).await)
    }

    async fn send_json<TReq: Serialize + ?Sized, TResp: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
    ) -> GatewayResult<TResp> {
        tracing::debug!(%method, path, "sending");
        let res = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .map_err(error::transport)?;

        if res.status().is_success() {
            return res.json::<TResp>().await.map_err(error::transport);
        }
        Err(error::status(res).await)
    }

    async fn delete(&self, path: &str) -> GatewayResult<()> {
        tracing::debug!(path, "DELETE");
        let res = self
            .http
            .delete(self.url(path))
            .send()
            .await
            .map_err(error::transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error::status(res).await)
    }
}

fn item(resource: &str, id: &Id) -> String {
    format!("{resource}/{id}")
}

impl Store for HttpStore {
    async fn list_operations(&self, filter: &Filter) -> GatewayResult<Vec<Operation>> {
        self.get_json(OPERATIONS, &filter.query()).await
    }

    async fn create_operation(&self, payload: &OperationNew) -> GatewayResult<Operation> {
        self.send_json(Method::POST, OPERATIONS, payload).await
    }

    async fn update_operation(&self, id: &Id, payload: &OperationNew) -> GatewayResult<Operation> {
        self.send_json(Method::PUT, &item(OPERATIONS, id), payload)
            .await
    }

    async fn remove_operation(&self, id: &Id) -> GatewayResult<()> {
        self.delete(&item(OPERATIONS, id)).await
    }

    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        self.get_json(CATEGORIES, &[]).await
    }

    async fn create_category(&self, payload: &CategoryNew) -> GatewayResult<Category> {
        self.send_json(Method::POST, CATEGORIES, payload).await
    }

    async fn update_category(&self, id: &Id, payload: &CategoryNew) -> GatewayResult<Category> {
        self.send_json(Method::PUT, &item(CATEGORIES, id), payload)
            .await
    }

    async fn remove_category(&self, id: &Id) -> GatewayResult<()> {
        self.delete(&item(CATEGORIES, id)).await
    }

    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.get_json(USERS, &[]).await
    }
}
