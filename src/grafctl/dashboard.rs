//! Dashboard types and the REST operations on them.
//!
//! Each operation maps one endpoint of the dashboard API:
//!
//! | Operation                     | Endpoint                          |
//! |-------------------------------|-----------------------------------|
//! | [`Client::list_dashboards`]   | `GET /api/search`                 |
//! | [`Client::dashboard`]         | `GET /api/dashboards/db/{slug}`   |
//! | [`Client::save_dashboard`]    | `POST /api/dashboards/db`         |
//! | [`Client::delete_dashboard`]  | `DELETE /api/dashboards/db/{slug}`|
//!
//! The dashboard body itself ([`Model`]) is never interpreted, only carried.

use crate::client::Client;
use crate::error::{GrafctlError, Result};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::debug;

/// Opaque dashboard JSON. Key order is preserved from input to output.
pub type Model = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMeta {
    #[serde(rename = "isStarred", default)]
    pub is_starred: bool,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub meta: DashboardMeta,
    #[serde(rename = "dashboard")]
    pub model: Model,
}

/// One row of the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uri: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(rename = "isStarred", default)]
    pub is_starred: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSaveResponse {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub version: i64,
}

/// The search endpoint sends `null` for an untagged dashboard.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize)]
struct SaveRequest<'a> {
    dashboard: &'a Model,
    overwrite: bool,
}

/// Serializes with tab indentation, the layout dashboards are kept in on disk.
pub fn to_indented_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

fn dashboard_path(slug: &str) -> String {
    format!("/api/dashboards/db/{}", slug)
}

impl Client {
    pub fn list_dashboards(&self) -> Result<Vec<DashboardEntry>> {
        let req = self.build_request(Method::GET, "/api/search", None);
        let data = self.execute(&req)?;
        let entries: Vec<DashboardEntry> = serde_json::from_slice(&data)?;
        debug!(count = entries.len(), "listed dashboards");
        Ok(entries)
    }

    /// Any non-200 answer is reported as `NotFound`.
    pub fn dashboard(&self, slug: &str) -> Result<Dashboard> {
        let req = self.build_request(Method::GET, &dashboard_path(slug), None);
        let data = self.execute(&req).map_err(|e| match e {
            GrafctlError::Http(err) => GrafctlError::NotFound(err),
            other => other,
        })?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn save_dashboard(&self, model: &Model, overwrite: bool) -> Result<DashboardSaveResponse> {
        let body = serde_json::to_vec(&SaveRequest {
            dashboard: model,
            overwrite,
        })?;
        let req = self.build_request(Method::POST, "/api/dashboards/db", Some(body));
        let data = self.execute(&req)?;
        Ok(serde_json::from_slice(&data)?)
    }

    pub fn delete_dashboard(&self, slug: &str) -> Result<()> {
        let req = self.build_request(Method::DELETE, &dashboard_path(slug), None);
        self.execute(&req)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryTransport;
    use serde_json::json;

    fn client() -> (Client, MemoryTransport) {
        let transport = MemoryTransport::new();
        let client =
            Client::with_transport("token", "", "http://grafana.local", transport.clone()).unwrap();
        (client, transport)
    }

    #[test]
    fn list_decodes_entries() {
        let (client, transport) = client();
        transport.respond_json(
            200,
            &json!([
                {"id": 1, "title": "A", "uri": "db/a", "type": "dash-db",
                 "tags": ["prod"], "isStarred": true},
                {"id": 2, "title": "B", "uri": "db/b", "type": "dash-db",
                 "tags": [], "isStarred": false}
            ]),
        );

        let entries = client.list_dashboards().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].uri, "db/a");
        assert_eq!(entries[0].tags, vec!["prod".to_string()]);
        assert!(entries[0].is_starred);
        assert_eq!(entries[1].kind, "dash-db");

        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.path(), "/api/search");
    }

    #[test]
    fn null_or_missing_tags_are_empty() {
        let (client, transport) = client();
        transport.respond(
            200,
            r#"[{"id":1,"title":"A","uri":"db/a","tags":null},{"id":2,"title":"B","uri":"db/b"}]"#,
        );
        let entries = client.list_dashboards().unwrap();
        assert!(entries[0].tags.is_empty());
        assert!(entries[1].tags.is_empty());
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let (client, transport) = client();
        transport.respond(200, "[]");
        assert!(client.list_dashboards().unwrap().is_empty());
    }

    #[test]
    fn malformed_list_is_a_decode_error() {
        let (client, transport) = client();
        transport.respond(200, "<html>");
        assert!(matches!(
            client.list_dashboards(),
            Err(GrafctlError::Decode(_))
        ));
    }

    #[test]
    fn get_decodes_meta_and_model() {
        let (client, transport) = client();
        transport.respond_json(
            200,
            &json!({
                "meta": {"isStarred": false, "slug": "mydash"},
                "dashboard": {"title": "X", "rows": []}
            }),
        );

        let dash = client.dashboard("mydash").unwrap();
        assert_eq!(dash.meta.slug, "mydash");
        assert_eq!(dash.model["title"], json!("X"));
        assert_eq!(
            transport.requests()[0].url.path(),
            "/api/dashboards/db/mydash"
        );
    }

    #[test]
    fn get_twice_yields_the_same_model() {
        let (client, transport) = client();
        let body = json!({
            "meta": {"slug": "a"},
            "dashboard": {"title": "A", "panels": [{"id": 1}]}
        });
        transport.respond_json(200, &body);
        transport.respond_json(200, &body);

        let first = client.dashboard("a").unwrap();
        let second = client.dashboard("a").unwrap();
        assert_eq!(first.model, second.model);
    }

    #[test]
    fn get_missing_dashboard_is_not_found() {
        let (client, transport) = client();
        transport.respond(404, r#"{"message":"Dashboard not found"}"#);
        let err = client.dashboard("gone").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Dashboard not found");
    }

    #[test]
    fn get_server_error_is_not_found_too() {
        let (client, transport) = client();
        transport.respond(500, "");
        let err = client.dashboard("broken").unwrap_err();
        assert!(matches!(err, GrafctlError::NotFound(_)));
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.to_string(), "500 Internal Server Error");
    }

    #[test]
    fn save_wraps_model_with_overwrite_flag() {
        let (client, transport) = client();
        transport.respond_json(200, &json!({"slug": "foo", "status": "success", "version": 3}));

        let model: Model = serde_json::from_value(json!({"id": 7, "title": "Foo"})).unwrap();
        let resp = client.save_dashboard(&model, true).unwrap();
        assert_eq!(
            resp,
            DashboardSaveResponse {
                slug: "foo".into(),
                status: "success".into(),
                version: 3
            }
        );

        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.url.path(), "/api/dashboards/db");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(
            req.body_json().unwrap(),
            json!({"dashboard": {"id": 7, "title": "Foo"}, "overwrite": true})
        );
    }

    #[test]
    fn save_conflict_is_an_http_error() {
        let (client, transport) = client();
        transport.respond(412, "");
        let err = client.save_dashboard(&Model::new(), false).unwrap_err();
        assert!(matches!(err, GrafctlError::Http(_)));
        assert_eq!(err.to_string(), "412 Precondition Failed");
    }

    #[test]
    fn delete_uses_slug_path() {
        let (client, transport) = client();
        transport.respond(200, "");
        client.delete_dashboard("old").unwrap();
        let req = &transport.requests()[0];
        assert_eq!(req.method, Method::DELETE);
        assert_eq!(req.url.path(), "/api/dashboards/db/old");
        assert!(req.body.is_none());
    }

    #[test]
    fn delete_failure_is_reported() {
        let (client, transport) = client();
        transport.respond(500, "");
        assert_eq!(client.delete_dashboard("old").unwrap_err().status_code(), Some(500));
    }

    #[test]
    fn model_round_trips_with_key_order() {
        let text = r#"{"zeta":1,"alpha":{"nested":[true,null,2.5,"s"]},"id":null}"#;
        let model: Model = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&model).unwrap(), text);

        let indented = to_indented_json(&model).unwrap();
        let back: Model = serde_json::from_slice(&indented).unwrap();
        assert_eq!(back, model);
        assert!(String::from_utf8(indented).unwrap().starts_with("{\n\t\"zeta\": 1"));
    }
}
