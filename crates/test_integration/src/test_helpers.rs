use crate::runner::context::test_context::TestContext;
use crate::test_constants::ADMIN_PASSWORD;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use common_types::{LoginRequest, SessionToken};
use reqwest::multipart::{Form, Part};

/// Log in as admin and return the bearer token.
pub async fn login(context: &TestContext) -> Result<String> {
    let response = context
        .http_client
        .post(context.url("/api/auth/login"))
        .json(&LoginRequest {
            password: ADMIN_PASSWORD.to_owned(),
        })
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(eyre!("Login failed with {}", response.status()));
    }
    let token: SessionToken = response.json().await?;

    Ok(token.access_token)
}

/// A multipart upload form with a file part and an optional `type` field.
pub fn upload_form(file_name: &str, content_type: &str, bytes: &[u8], kind: Option<&str>) -> Result<Form> {
    let part = Part::bytes(bytes.to_vec())
        .file_name(file_name.to_owned())
        .mime_str(content_type)?;
    let form = Form::new().part("file", part);
    Ok(match kind {
        Some(kind) => form.text("type", kind.to_owned()),
        None => form,
    })
}
