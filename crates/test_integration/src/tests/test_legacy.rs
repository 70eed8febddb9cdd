use crate::runner::context::test_context::TestContext;
use crate::test_helpers::login;
use color_eyre::Result;
use common_types::{Memory, SaveResponse};
use serde_json::{Value, json};

pub async fn test_legacy_memories_roundtrip(context: &TestContext) -> Result<()> {
    // ARRANGE
    let url = context.url("/api/memories");
    let token = login(context).await?;
    let memories = vec![Memory {
        id: "1".to_owned(),
        image_url: "/images/first.jpg".to_owned(),
        title: Some("First".to_owned()),
        date: Some("2023-06-01".to_owned()),
    }];

    // ACT
    let before: Value = context.http_client.get(&url).send().await?.json().await?;
    let unauthorized = context
        .http_client
        .post(&url)
        .json(&json!({ "memories": memories }))
        .send()
        .await?;
    let saved: SaveResponse = context
        .http_client
        .post(&url)
        .bearer_auth(&token)
        .json(&json!({ "memories": memories }))
        .send()
        .await?
        .json()
        .await?;
    let after: Value = context.http_client.get(&url).send().await?.json().await?;
    let file: Value =
        serde_json::from_str(&tokio::fs::read_to_string(&context.settings.legacy.memories_file).await?)?;

    // ASSERT
    assert_eq!(before, json!({ "memories": [] }));
    assert_eq!(unauthorized.status(), reqwest::StatusCode::UNAUTHORIZED);
    assert!(saved.success);
    assert_eq!(after["memories"][0]["imageUrl"], "/images/first.jpg");
    assert_eq!(after["memories"][0]["title"], "First");
    // The file holds the bare array.
    assert!(file.is_array());
    assert_eq!(file.as_array().map(Vec::len), Some(1));

    Ok(())
}
