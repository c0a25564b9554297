mod common;

use common::{stub_config, TestServer};
use ghl_bridge::catalog::Catalog;
use ghl_bridge::config::GatewayConfig;
use ghl_bridge::protocol::gemini::DEFAULT_FUNCTION_NAME;
use serde_json::{json, Value};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn service_health_reports_liveness() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server.get("/health").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["toolCount"], json!(Catalog::builtin().len()));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn bridge_health_reports_credential_state() {
    let upstream = MockServer::start().await;

    let configured = TestServer::spawn(stub_config(&upstream)).await;
    let body: Value = configured.get("/api/ghl/health").await.json().await.unwrap();
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["configured"], json!(true));
    assert_eq!(body["availableTools"], json!(Catalog::builtin().len()));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));

    let unconfigured = TestServer::spawn(GatewayConfig {
        access_token: None,
        ..stub_config(&upstream)
    })
    .await;
    let body: Value = unconfigured.get("/api/ghl/health").await.json().await.unwrap();
    assert_eq!(body["configured"], json!(false));
}

#[tokio::test]
async fn catalog_listing_is_stable_and_complete() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let first: Value = server.get("/api/ghl/tools").await.json().await.unwrap();
    let second: Value = server.get("/api/ghl/tools").await.json().await.unwrap();
    assert_eq!(first["tools"], second["tools"]);

    let catalog = Catalog::builtin();
    assert_eq!(first["success"], json!(true));
    assert_eq!(first["totalTools"], json!(catalog.len()));
    assert_eq!(first["ghlMcpUrl"], json!(upstream.uri()));

    let tools = first["tools"].as_array().unwrap();
    assert_eq!(tools.len(), catalog.len());

    let get_contact = tools
        .iter()
        .find(|tool| tool["name"] == json!("contacts_get-contact"))
        .unwrap();
    assert_eq!(get_contact["description"], json!("Fetch contact details"));
    assert_eq!(get_contact["requiredParams"], json!(["contactId"]));
    assert_eq!(get_contact["optionalParams"], json!([]));
}

#[tokio::test]
async fn tool_schemas_are_derived_mechanically() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let body: Value = server.post("/tools/list", json!({})).await.json().await.unwrap();
    let tools = body["tools"].as_array().unwrap();
    assert_eq!(tools.len(), Catalog::builtin().len());

    let add_tags = tools
        .iter()
        .find(|tool| tool["name"] == json!("contacts_add-tags"))
        .unwrap();
    let schema = &add_tags["inputSchema"];
    assert_eq!(schema["type"], json!("object"));
    assert_eq!(schema["required"], json!(["contactId", "tags"]));
    assert_eq!(schema["properties"]["contactId"]["type"], json!("string"));
    assert_eq!(schema["properties"]["tags"]["type"], json!("array"));
    assert_eq!(schema["properties"]["tags"]["items"]["type"], json!("string"));

    let create = tools
        .iter()
        .find(|tool| tool["name"] == json!("contacts_create-contact"))
        .unwrap();
    assert_eq!(
        create["inputSchema"]["properties"]["customFields"]["type"],
        json!("object")
    );
    assert_eq!(create["inputSchema"]["required"], json!([]));
}

#[tokio::test]
async fn missing_tool_field_never_reaches_upstream() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post("/api/ghl/execute", json!({ "locationId": "loc-1" }))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("missing_field"));
    assert_eq!(body["error"]["message"], json!("Missing required field: tool"));
    assert_eq!(body["error"]["statusCode"], json!(400));
    assert!(body["timestamp"].is_string());

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_tenant_never_reaches_upstream() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post("/api/ghl/execute", json!({ "tool": "contacts_get-contacts" }))
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], json!("missing_field"));
    assert_eq!(
        body["error"]["message"],
        json!("Missing required field: locationId")
    );

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_tool_reports_the_whole_catalog() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post(
            "/api/ghl/execute",
            json!({ "tool": "contacts_delete-everything", "locationId": "loc-1" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], json!("unknown_tool"));
    assert_eq!(body["availableTools"], json!(Catalog::builtin().names()));

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_required_parameters_are_listed() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post(
            "/api/ghl/execute",
            json!({ "tool": "contacts_get-contact", "parameters": {}, "locationId": "loc-1" }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], json!("missing_required_parameter"));
    assert_eq!(body["missingParams"], json!(["contactId"]));

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn gemini_success_wraps_the_function_response() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contacts": [] })))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post(
            "/api/gemini/execute",
            json!({
                "name": "crm_lookup",
                "tool": "contacts_get-contacts",
                "locationId": "loc-1",
            }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let function = &body["functionResponse"];
    assert_eq!(function["name"], json!("crm_lookup"));
    assert_eq!(function["response"]["success"], json!(true));
    assert_eq!(function["response"]["tool"], json!("contacts_get-contacts"));
    assert_eq!(function["response"]["data"], json!({ "contacts": [] }));
}

#[tokio::test]
async fn gemini_validation_errors_stay_http_200() {
    let upstream = MockServer::start().await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post(
            "/api/gemini/execute",
            json!({ "tool": "contacts_delete-everything", "locationId": "loc-1" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    let function = &body["functionResponse"];
    assert_eq!(function["name"], json!(DEFAULT_FUNCTION_NAME));
    assert_eq!(function["response"]["success"], json!(false));
    assert!(function["response"]["error"]
        .as_str()
        .unwrap()
        .contains("not found"));

    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn gemini_upstream_failures_stay_http_200() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad token" })))
        .mount(&upstream)
        .await;
    let server = TestServer::spawn(stub_config(&upstream)).await;

    let response = server
        .post(
            "/api/gemini/execute",
            json!({ "tool": "contacts_get-contacts", "locationId": "loc-1" }),
        )
        .await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["functionResponse"]["response"]["success"], json!(false));
    assert_eq!(
        body["functionResponse"]["response"]["error"],
        json!("authentication failed")
    );
}
