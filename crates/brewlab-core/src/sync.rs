//! Client for the spreadsheet-backed sync webhook.
//!
//! The endpoint is a single URL. Entities are pushed with a POST whose body
//! is the JSON text `{"type": <kind>, "data": <entity>}`; everything stored
//! remotely is fetched with `GET <url>?action=getAll`.
//!
//! Sync is best effort: pushes report success as a `bool` and fetches as an
//! `Option`, and neither ever fails a local operation.

use std::time::Duration;

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::{
    error::{LabError, Result},
    models::{BrewMethod, BrewRecord, CoffeeBean, GrinderProfile},
};

/// Entity kinds understood by the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncKind {
    Log,
    Bean,
    Grinder,
    Method,
}

impl SyncKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncKind::Log => "LOG",
            SyncKind::Bean => "BEAN",
            SyncKind::Grinder => "GRINDER",
            SyncKind::Method => "METHOD",
        }
    }
}

/// Serialize an entity into the `data` field of a push.
pub fn entity_payload<T: Serialize>(entity: &T) -> Result<Value> {
    Ok(serde_json::to_value(entity)?)
}

/// Beans go out with their flavor notes as one `", "`-joined string, which
/// is how the spreadsheet column stores them.
pub fn bean_payload(bean: &CoffeeBean) -> Result<Value> {
    let mut value = entity_payload(bean)?;
    if let Some(doc) = value.as_object_mut() {
        doc.insert(
            "flavorNotes".to_string(),
            Value::String(bean.flavor_notes.join(", ")),
        );
    }
    Ok(value)
}

/// Whether a successful response body reports success.
///
/// A JSON body must carry `"status": "success"`. Anything that is not JSON
/// counts as success, since the status code already was.
fn body_reports_success(body: &str) -> bool {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value.get("status").and_then(Value::as_str) == Some("success"),
        Err(_) => true,
    }
}

/// Everything the endpoint returned for `getAll`, still as raw JSON.
///
/// Collections the endpoint leaves out are empty. Entities are parsed one by
/// one so that a single malformed row does not hide the rest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSnapshot {
    #[serde(default)]
    pub beans: Vec<Value>,
    #[serde(default)]
    pub grinders: Vec<Value>,
    #[serde(default)]
    pub methods: Vec<Value>,
    #[serde(default, alias = "records")]
    pub logs: Vec<Value>,
}

impl RemoteSnapshot {
    /// Parse a `getAll` response body. The collections may sit at the top
    /// level or inside a `data` object.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let root = match value.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => value,
        };
        Ok(serde_json::from_value(root)?)
    }

    pub fn beans(&self) -> Vec<CoffeeBean> {
        parse_entities("bean", &self.beans)
    }

    pub fn grinders(&self) -> Vec<GrinderProfile> {
        parse_entities("grinder", &self.grinders)
    }

    pub fn methods(&self) -> Vec<BrewMethod> {
        parse_entities("method", &self.methods)
    }

    pub fn records(&self) -> Vec<BrewRecord> {
        parse_entities("brew record", &self.logs)
    }
}

fn parse_entities<T: DeserializeOwned>(kind: &str, values: &[Value]) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| match serde_json::from_value(value.clone()) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!("Skipping remote {kind} that failed to parse: {e}");
                None
            }
        })
        .collect()
}

/// HTTP client bound to one webhook URL.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    client: reqwest::Client,
    url: String,
}

impl SheetsClient {
    /// Build a client for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(LabError::invalid_input("sync_url").with_reason("URL must not be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LabError::Sync {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Push one entity. Returns whether the endpoint accepted it.
    pub async fn submit(&self, kind: SyncKind, data: Value) -> bool {
        let body = json!({ "type": kind.as_str(), "data": data }).to_string();

        let response = match self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Sync push of {} failed: {e}", kind.as_str());
                return false;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Sync push of {} rejected with {status}", kind.as_str());
            return false;
        }

        match response.text().await {
            Ok(text) => {
                let accepted = body_reports_success(&text);
                debug!("Sync push of {} accepted: {accepted}", kind.as_str());
                accepted
            }
            Err(e) => {
                warn!("Sync push of {} lost its response: {e}", kind.as_str());
                false
            }
        }
    }

    /// Fetch everything stored remotely. Any failure yields `None`.
    pub async fn fetch_all(&self) -> Option<RemoteSnapshot> {
        let url = format!("{}?action=getAll", self.url);

        let response = match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("Sync fetch rejected with {}", response.status());
                return None;
            }
            Err(e) => {
                warn!("Sync fetch failed: {e}");
                return None;
            }
        };

        let text = response
            .text()
            .await
            .inspect_err(|e| warn!("Sync fetch lost its response: {e}"))
            .ok()?;

        RemoteSnapshot::from_json(&text)
            .inspect_err(|e| warn!("Sync fetch returned an unreadable snapshot: {e}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use jiff::civil::date;
    use uuid::Uuid;

    use super::*;
    use crate::models::RoastLevel;

    fn endpoint(server: &MockServer) -> String {
        server.url("/exec")
    }

    fn client(url: &str) -> SheetsClient {
        SheetsClient::new(url, Duration::from_secs(5)).unwrap()
    }

    fn sample_bean() -> CoffeeBean {
        CoffeeBean {
            id: Uuid::new_v4(),
            name: "Yirgacheffe Kochere".to_string(),
            roast_level: RoastLevel::Light,
            shop: Some("Simple Kaffa".to_string()),
            purchase_date: date(2024, 3, 1),
            weight: 200.0,
            flavor_notes: vec!["jasmine".to_string(), "lemon".to_string()],
            is_active: true,
        }
    }

    #[test]
    fn test_body_reports_success() {
        assert!(body_reports_success(r#"{"status":"success"}"#));
        assert!(!body_reports_success(r#"{"status":"error","message":"bad"}"#));
        assert!(!body_reports_success("42"));
        assert!(body_reports_success("OK"));
        assert!(body_reports_success(""));
    }

    #[test]
    fn test_bean_payload_joins_flavor_notes() {
        let payload = bean_payload(&sample_bean()).unwrap();
        assert_eq!(payload["flavorNotes"], "jasmine, lemon");
        assert_eq!(payload["roastLevel"], "light");
    }

    #[test]
    fn test_snapshot_tolerates_missing_and_bad_entities() {
        let bean = bean_payload(&sample_bean()).unwrap();
        let body = json!({
            "status": "success",
            "data": {
                "beans": [bean, {"name": "no id"}],
                "records": []
            }
        })
        .to_string();

        let snapshot = RemoteSnapshot::from_json(&body).unwrap();
        let beans = snapshot.beans();
        assert_eq!(beans.len(), 1);
        assert_eq!(beans[0].flavor_notes, vec!["jasmine", "lemon"]);
        assert!(snapshot.grinders().is_empty());
        assert!(snapshot.methods().is_empty());
        assert!(snapshot.records().is_empty());
    }

    #[test]
    fn test_empty_url_is_rejected() {
        assert!(SheetsClient::new("  ", Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn test_submit_posts_typed_payload() {
        let server = MockServer::start();
        let bean = bean_payload(&sample_bean()).unwrap();
        let push = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/exec")
                .header("content-type", "text/plain;charset=utf-8")
                .json_body(json!({ "type": "BEAN", "data": bean.clone() }));
            then.status(200).body(r#"{"status":"success"}"#);
        });

        let accepted = client(&endpoint(&server)).submit(SyncKind::Bean, bean).await;

        assert!(accepted);
        push.assert();
    }

    #[tokio::test]
    async fn test_submit_reports_endpoint_error() {
        let server = MockServer::start();
        let push = server.mock(|when, then| {
            when.method(Method::POST).path("/exec").body_includes(r#""type":"LOG""#);
            then.status(200).body(r#"{"status":"error"}"#);
        });

        assert!(!client(&endpoint(&server)).submit(SyncKind::Log, json!({})).await);
        push.assert();
    }

    #[tokio::test]
    async fn test_submit_plain_text_success() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/exec");
            then.status(200).body("Saved");
        });

        assert!(client(&endpoint(&server)).submit(SyncKind::Grinder, json!({})).await);
    }

    #[tokio::test]
    async fn test_submit_http_error_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::POST).path("/exec");
            then.status(500).body(r#"{"status":"success"}"#);
        });

        assert!(!client(&endpoint(&server)).submit(SyncKind::Method, json!({})).await);
    }

    #[tokio::test]
    async fn test_submit_unreachable_is_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());
        drop(listener);

        assert!(!client(&url).submit(SyncKind::Log, json!({})).await);
    }

    #[tokio::test]
    async fn test_fetch_all_requests_get_all() {
        let server = MockServer::start();
        let get_all = server.mock(|when, then| {
            when.method(Method::GET).path("/exec").query_param("action", "getAll");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"beans":[],"grinders":[]}"#);
        });

        let snapshot = client(&endpoint(&server)).fetch_all().await;

        assert!(snapshot.is_some());
        get_all.assert();
    }

    #[tokio::test]
    async fn test_fetch_all_unreadable_body_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/exec");
            then.status(200).body("not json");
        });

        assert!(client(&endpoint(&server)).fetch_all().await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_all_http_error_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(Method::GET).path("/exec");
            then.status(404).body("{}");
        });

        assert!(client(&endpoint(&server)).fetch_all().await.is_none());
    }
}
