use grafctl::client::{Client, MemoryTransport};
use grafctl::commands;
use grafctl::store::FileStore;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn client(transport: &MemoryTransport) -> Client {
    Client::with_transport(
        "admin:admin",
        "X-Grafana-Org-Id:1",
        "http://grafana.local",
        transport.clone(),
    )
    .unwrap()
}

#[test]
fn get_then_push_round_trip() {
    let temp = TempDir::new().unwrap();
    let transport = MemoryTransport::new();
    let client = client(&transport);

    transport.respond_json(
        200,
        &json!({
            "meta": {"isStarred": false, "slug": "mydash"},
            "dashboard": {"title": "My Dash", "id": 7, "rows": []}
        }),
    );
    let store = FileStore::new(temp.path().join("db"));
    commands::get::run(&client, &store, &["db/mydash"]).unwrap();

    let written = fs::read_to_string(temp.path().join("db").join("mydash.json")).unwrap();
    assert!(written.contains("\t\"title\": \"My Dash\""));
    assert!(written.ends_with("}\n"));

    let req = &transport.requests()[0];
    assert_eq!(req.url.path(), "/api/dashboards/db/mydash");
    assert_eq!(req.header("x-grafana-org-id"), Some("1"));
    assert!(req.header("authorization").unwrap().starts_with("Basic "));

    transport.respond_json(200, &json!({"slug": "mydash", "status": "success", "version": 2}));
    let result =
        commands::push::run(&client, &FileStore::new(temp.path()), &["mydash"], true).unwrap();
    assert_eq!(result.saved[0].version, 2);

    let body = transport.requests()[1].body_json().unwrap();
    assert_eq!(body["overwrite"], json!(true));
    assert_eq!(body["dashboard"]["id"], json!(7));
}

#[test]
fn push_recreates_dashboard_missing_on_the_service() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("db")).unwrap();
    fs::write(
        temp.path().join("db").join("foo.json"),
        json!({"id": 42, "title": "Foo"}).to_string(),
    )
    .unwrap();

    let transport = MemoryTransport::new();
    transport.respond_json(404, &json!({"message": "Dashboard not found"}));
    transport.respond_json(200, &json!({"slug": "foo", "status": "success", "version": 1}));

    let store = FileStore::new(temp.path());
    let result = commands::push::run(&client(&transport), &store, &[] as &[&str], false).unwrap();
    assert_eq!(result.saved.len(), 1);
    assert_eq!(result.saved[0].slug, "foo");

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body_json().unwrap()["dashboard"]["id"], json!(42));
    let retry = requests[1].body_json().unwrap();
    assert!(retry["dashboard"].get("id").is_none());
    assert_eq!(retry["dashboard"]["title"], json!("Foo"));
    assert_eq!(transport.pending(), 0);
}

#[test]
fn list_reads_the_search_endpoint() {
    let transport = MemoryTransport::new();
    transport.respond_json(
        200,
        &json!([{
            "id": 1,
            "title": "A",
            "uri": "db/a",
            "type": "dash-db",
            "tags": ["x"],
            "isStarred": true
        }]),
    );
    let result = commands::list::run(&client(&transport)).unwrap();
    assert_eq!(result.entries.len(), 1);
    assert_eq!(result.entries[0].uri, "db/a");
    assert!(result.entries[0].is_starred);
    assert_eq!(transport.requests()[0].url.path(), "/api/search");
}
