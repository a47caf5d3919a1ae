use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tableau_metadata::errors::{ConnectError, MetadataError};
use tableau_metadata::operations::GetWorkbooks;
use tableau_metadata::{connect, AuthMethod, Config, WorkbookFilterBuilder};

use crate::support::serve;

fn workbook(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Workbook {id}"),
        "luid": format!("luid-{id}"),
        "uri": null,
        "projectName": "Finance",
        "owner": {"username": "jdoe"},
        "description": null,
        "createdAt": "2024-01-02T03:04:05Z",
        "updatedAt": "2024-02-03T04:05:06Z",
        "tags": [],
        "sheets": [],
        "dashboards": [],
        "embeddedDatasources": []
    })
}

/// Serves two pages of workbooks to callers holding `session-token`.
async fn metadata(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("x-tableau-auth").and_then(|v| v.to_str().ok()) != Some("session-token") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"errors": [{"message": "Invalid authentication credentials"}]})),
        );
    }

    let (nodes, page_info) = match body["variables"]["after"].as_str() {
        None => (
            vec![workbook("wb1"), workbook("wb2")],
            json!({"hasNextPage": true, "endCursor": "c2"}),
        ),
        Some("c2") => (
            vec![workbook("wb3")],
            json!({"hasNextPage": false, "endCursor": "c3"}),
        ),
        Some(other) => panic!("unexpected cursor {other}"),
    };

    (
        StatusCode::OK,
        Json(json!({
            "data": {
                "workbooksConnection": {
                    "nodes": nodes,
                    "pageInfo": page_info,
                    "totalCount": 3
                }
            }
        })),
    )
}

/// Counts sign-outs made with the session token.
async fn sign_out(State(sign_outs): State<Arc<AtomicUsize>>, headers: HeaderMap) -> StatusCode {
    if headers.get("x-tableau-auth").and_then(|v| v.to_str().ok()) != Some("session-token") {
        return StatusCode::UNAUTHORIZED;
    }

    sign_outs.fetch_add(1, Ordering::SeqCst);
    StatusCode::NO_CONTENT
}

fn app() -> (Router, Arc<AtomicUsize>) {
    let sign_outs = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/api/3.19/auth/signin",
            post(|| async {
                Json(json!({"credentials": {"token": "session-token", "site": {"id": "s"}, "user": {"id": "u"}}}))
            }),
        )
        .route("/api/3.19/auth/signout", post(sign_out))
        .route("/api/metadata/graphql", post(metadata))
        .with_state(sign_outs.clone());

    (app, sign_outs)
}

fn config(base: &str, auth: AuthMethod) -> Config {
    Config::new(base, auth, None, None, Some(5_000), Some(2))
}

fn pat() -> AuthMethod {
    AuthMethod::PersonalAccessToken {
        name: "ci".into(),
        secret: "s3cr3t".into(),
    }
}

#[tokio::test]
async fn test_fetch_all_workbooks() {
    let (app, sign_outs) = app();
    let base = serve(app).await;

    connect(config(&base, pat()), |conn| async move {
        let filter = WorkbookFilterBuilder::default()
            .project_name("Finance")
            .build()?;
        let workbooks = conn.fetch_all::<GetWorkbooks>(Some(filter), None).await?;

        assert_eq!(
            workbooks.iter().map(|w| w.id.as_str()).collect::<Vec<_>>(),
            vec!["wb1", "wb2", "wb3"]
        );
        assert_eq!(workbooks[0].owner.username.as_deref(), Some("jdoe"));

        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(sign_outs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_pages_report_total_count() {
    let (app, _) = app();
    let base = serve(app).await;

    connect(config(&base, pat()), |conn| async move {
        let pages = conn
            .pages::<GetWorkbooks>(None, None)
            .try_collect::<Vec<_>>()
            .await?;

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.total_count == 3));
        assert_eq!(pages[1].page_info.end_cursor.as_deref(), Some("c3"));

        Ok(())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_stale_session_token() {
    let (app, sign_outs) = app();
    let base = serve(app).await;

    let auth = AuthMethod::SessionToken("expired".into());
    connect(config(&base, auth), |conn| async move {
        let err = conn.fetch_all::<GetWorkbooks>(None, None).await.unwrap_err();
        assert!(matches!(err, MetadataError::Query(_)), "{err:?}");

        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(sign_outs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_sign_out_after_failed_session() {
    let (app, sign_outs) = app();
    let base = serve(app).await;

    let err = connect(config(&base, pat()), |_| async { Err(eyre::eyre!("report failed")) })
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectError::Session(_)), "{err:?}");
    assert_eq!(sign_outs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connect_fails_when_sign_in_fails() {
    let app = Router::new().route(
        "/api/3.19/auth/signin",
        post(|| async { StatusCode::UNAUTHORIZED }),
    );
    let base = serve(app).await;

    let err = connect(config(&base, pat()), |_| async { Ok(()) })
        .await
        .unwrap_err();

    assert!(matches!(err, ConnectError::Auth(_)), "{err:?}");
}
