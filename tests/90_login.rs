mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_requires_both_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "username": "admin" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn login_rejects_non_json_body() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/login"))
        .header("content-type", "text/plain")
        .body("username=admin")
        .send()
        .await?;

    assert!(res.status().is_client_error(), "got {}", res.status());
    Ok(())
}

#[tokio::test]
async fn unknown_user_never_gets_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/login"))
        .json(&json!({ "username": "no-such-user-7f3a", "password": "whatever" }))
        .send()
        .await?;

    // NOT_FOUND with a database; INTERNAL_SERVER_ERROR when it is unreachable
    assert!(
        res.status() == StatusCode::NOT_FOUND || res.status() == StatusCode::INTERNAL_SERVER_ERROR,
        "unexpected status: {}",
        res.status()
    );
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
    Ok(())
}
