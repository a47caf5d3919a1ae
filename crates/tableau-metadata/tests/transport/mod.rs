use std::collections::HashMap;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tableau_metadata::core::connect_params::ConnectParams;
use tableau_metadata::core::gql_client::ClientConfig;
use tableau_metadata::core::graphql_client::{
    DefaultGraphQLClient, GraphQLClient, GraphQLError, GraphqlErrorMessages,
};

use crate::support::serve;

async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };

    Json(json!({
        "data": {
            "token": header("x-tableau-auth"),
            "accept": header("accept"),
            "query": body["query"],
            "variables": body["variables"],
        }
    }))
}

fn client_for(endpoint: String) -> DefaultGraphQLClient {
    DefaultGraphQLClient::with_config(ClientConfig {
        endpoint,
        timeout: Some(5),
        headers: None,
        proxy: None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_sends_auth_header_and_variables() {
    let base = serve(Router::new().route("/api/metadata/graphql", post(echo))).await;
    let client = DefaultGraphQLClient::new(&ConnectParams::new(&base, "session-token")).unwrap();

    let data = client
        .query("query{workbooks{id}}", json!({"first": 5}))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        data,
        json!({
            "token": "session-token",
            "accept": "application/json",
            "query": "query{workbooks{id}}",
            "variables": {"first": 5},
        })
    );
}

#[tokio::test]
async fn test_follows_redirects() {
    let app = Router::new()
        .route("/api/metadata/graphql", post(echo))
        .route(
            "/absolute",
            post(|| async { (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, "/relative-hop")]) }),
        )
        .route(
            "/relative-hop",
            post(|| async {
                (
                    StatusCode::TEMPORARY_REDIRECT,
                    [(header::LOCATION, "api/metadata/graphql")],
                )
            }),
        );
    let base = serve(app).await;

    let mut headers = HashMap::new();
    headers.insert("X-Tableau-Auth".to_string(), "t".to_string());
    let client = DefaultGraphQLClient::with_config(ClientConfig {
        endpoint: format!("{base}/absolute"),
        timeout: Some(5),
        headers: Some(headers),
        proxy: None,
    })
    .unwrap();

    let data = client.query("query{a}", json!({})).await.unwrap().unwrap();

    assert_eq!(data["query"], "query{a}");
    assert_eq!(data["token"], "t");
}

#[tokio::test]
async fn test_cross_origin_redirect_drops_session_token() {
    let other = serve(Router::new().route("/api/metadata/graphql", post(echo))).await;

    let target = format!("{other}/api/metadata/graphql");
    let app = Router::new().route(
        "/api/metadata/graphql",
        post(move || {
            let target = target.clone();
            async move { (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, target)]) }
        }),
    );
    let base = serve(app).await;
    let client = DefaultGraphQLClient::new(&ConnectParams::new(&base, "session-token")).unwrap();

    let data = client.query("query{a}", json!({})).await.unwrap().unwrap();

    assert_eq!(data["query"], "query{a}");
    assert_eq!(data["token"], Value::Null);
    assert_eq!(data["accept"], "application/json");
}

#[tokio::test]
async fn test_location_on_success_is_not_followed() {
    let app = Router::new()
        .route(
            "/api/metadata/graphql",
            post(|| async {
                (
                    [(header::LOCATION, "/elsewhere")],
                    Json(json!({"data": {"workbooks": []}})),
                )
            }),
        )
        .route(
            "/elsewhere",
            post(|| async { (StatusCode::NOT_FOUND, "gone") }),
        );
    let base = serve(app).await;

    let data = client_for(format!("{base}/api/metadata/graphql"))
        .query("query{workbooks{id}}", json!({}))
        .await
        .unwrap();

    assert_eq!(data, Some(json!({"workbooks": []})));
}

#[tokio::test]
async fn test_redirect_loop_fails() {
    let app = Router::new().route(
        "/loop",
        post(|| async { (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, "/loop")]) }),
    );
    let base = serve(app).await;

    let err = client_for(format!("{base}/loop"))
        .query("query{a}", json!({}))
        .await
        .unwrap_err();

    match err {
        GraphQLError::HttpError(message) => assert!(message.contains("redirect"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_graphql_errors_become_domain_errors() {
    let app = Router::new().route(
        "/api/metadata/graphql",
        post(|| async {
            Json(json!({
                "data": null,
                "errors": [
                    {"message": "Validation error of type FieldUndefined: Field 'nope' in type 'Workbook' is undefined",
                     "locations": [{"line": 1, "column": 19}],
                     "extensions": {"classification": "ValidationError"}}
                ]
            }))
        }),
    );
    let base = serve(app).await;

    let err = client_for(format!("{base}/api/metadata/graphql"))
        .query("query{workbooks{nope}}", json!({}))
        .await
        .unwrap_err();

    match err {
        GraphQLError::DomainError { fields, .. } => assert_eq!(
            fields,
            GraphqlErrorMessages(vec![
                "Validation error of type FieldUndefined: Field 'nope' in type 'Workbook' is undefined"
                    .to_string()
            ])
        ),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_success_status() {
    let app = Router::new().route(
        "/api/metadata/graphql",
        post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"errors": []}))) }),
    );
    let base = serve(app).await;

    let err = client_for(format!("{base}/api/metadata/graphql"))
        .query("query{a}", json!({}))
        .await
        .unwrap_err();

    match err {
        GraphQLError::HttpError(message) => assert!(message.contains("[401]"), "{message}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_quoted() {
    let app = Router::new().route(
        "/api/metadata/graphql",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let base = serve(app).await;

    let err = client_for(format!("{base}/api/metadata/graphql"))
        .query("query{a}", json!({}))
        .await
        .unwrap_err();

    match err {
        GraphQLError::HttpError(message) => {
            assert!(message.contains("upstream unavailable"), "{message}")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_null_data() {
    let app = Router::new().route(
        "/api/metadata/graphql",
        post(|| async { Json(json!({"data": null})) }),
    );
    let base = serve(app).await;

    let data = client_for(format!("{base}/api/metadata/graphql"))
        .query("query{a}", json!({}))
        .await
        .unwrap();

    assert_eq!(data, None);
}
