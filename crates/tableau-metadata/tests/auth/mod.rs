use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tableau_metadata::core::auth::{self, AuthError, Credentials};
use tableau_metadata::{AuthMethod, Config};

use crate::support::serve;

fn pat_config(base: &str) -> Config {
    Config::new(
        base,
        AuthMethod::PersonalAccessToken {
            name: "ci".into(),
            secret: "s3cr3t".into(),
        },
        Some("marketing".into()),
        None,
        Some(5_000),
        None,
    )
}

async fn sign_in(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let creds = &body["credentials"];
    if creds["personalAccessTokenName"] != "ci" || creds["personalAccessTokenSecret"] != "s3cr3t" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": "401001", "summary": "Signin Error"}})),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "credentials": {
                "token": "session-token",
                "estimatedTimeToExpiration": "365:00:00",
                "site": {"id": "site-1", "contentUrl": creds["site"]["contentUrl"]},
                "user": {"id": "user-1"}
            }
        })),
    )
}

#[tokio::test]
async fn test_sign_in_with_personal_access_token() {
    let base = serve(Router::new().route("/api/3.19/auth/signin", post(sign_in))).await;

    let creds = auth::resolve(&pat_config(&base)).await.unwrap();

    assert_eq!(
        creds,
        Credentials {
            token: "session-token".into(),
            site_id: Some("site-1".into()),
            user_id: Some("user-1".into()),
        }
    );
}

#[tokio::test]
async fn test_sign_in_rejected() {
    let base = serve(Router::new().route("/api/3.19/auth/signin", post(sign_in))).await;

    let mut cfg = pat_config(&base);
    cfg.auth = AuthMethod::PersonalAccessToken {
        name: "ci".into(),
        secret: "wrong".into(),
    };

    match auth::resolve(&cfg).await.unwrap_err() {
        AuthError::Rejected { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Signin Error"), "{body}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_in_unparseable_response() {
    let app = Router::new().route(
        "/api/3.19/auth/signin",
        post(|| async { "<tsResponse/>" }),
    );
    let base = serve(app).await;

    let err = auth::resolve(&pat_config(&base)).await.unwrap_err();

    assert!(matches!(err, AuthError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn test_session_token_skips_sign_in() {
    // nothing listens here; resolving must not make a request
    let cfg = Config::new(
        "http://127.0.0.1:9",
        AuthMethod::SessionToken("given".into()),
        None,
        None,
        None,
        None,
    );

    let creds = auth::resolve(&cfg).await.unwrap();

    assert_eq!(creds.token, "given");
    assert_eq!(creds.site_id, None);
}

#[tokio::test]
async fn test_sign_out_sends_token() {
    let app = Router::new().route(
        "/api/3.19/auth/signout",
        post(|headers: HeaderMap| async move {
            match headers.get("x-tableau-auth").and_then(|v| v.to_str().ok()) {
                Some("session-token") => StatusCode::NO_CONTENT,
                _ => StatusCode::UNAUTHORIZED,
            }
        }),
    );
    let base = serve(app).await;
    let cfg = pat_config(&base);

    let creds = Credentials {
        token: "session-token".into(),
        site_id: None,
        user_id: None,
    };
    auth::sign_out(&cfg, &creds).await.unwrap();

    let stale = Credentials {
        token: "expired".into(),
        ..creds
    };
    match auth::sign_out(&cfg, &stale).await.unwrap_err() {
        AuthError::Rejected { status, .. } => assert_eq!(status, 401),
        other => panic!("unexpected error: {other:?}"),
    }
}
