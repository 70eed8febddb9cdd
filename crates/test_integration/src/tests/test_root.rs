use crate::runner::context::test_context::TestContext;
use color_eyre::Result;
use serde_json::Value;

pub async fn test_root_endpoint(context: &TestContext) -> Result<()> {
    // ACT
    let response = context.http_client.get(context.url("/")).send().await?;
    let status = response.status();
    let body = response.text().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "Memories API");

    Ok(())
}

pub async fn test_health_endpoint(context: &TestContext) -> Result<()> {
    // ARRANGE
    let url = context.url("/health");

    // ACT
    let response = context.http_client.get(&url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "OK");

    Ok(())
}

pub async fn test_api_docs(context: &TestContext) -> Result<()> {
    // ACT
    let response = context
        .http_client
        .get(context.url("/openapi.json"))
        .send()
        .await?;
    let status = response.status();
    let doc: Value = response.json().await?;

    // ASSERT
    assert_eq!(status, reqwest::StatusCode::OK);
    for path in ["/api/upload", "/api/memories-db", "/api/music-url-db", "/api/memories"] {
        assert!(doc["paths"].get(path).is_some(), "{path} is missing from the docs");
    }
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());

    Ok(())
}
