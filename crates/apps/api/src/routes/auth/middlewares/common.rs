use crate::api_state::ApiContext;
use axum::extract::{FromRequestParts, State};
use color_eyre::eyre::eyre;
use common_services::api::auth::error::AuthError;
use http::header;
use http::request::Parts;

/// Pull the api context out of whatever state the router was built with.
pub async fn extract_context<S>(parts: &mut Parts, state: &S) -> Result<ApiContext, AuthError>
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    State::<ApiContext>::from_request_parts(parts, state)
        .await
        .map(|State(context)| context)
        .map_err(|_| AuthError::Internal(eyre!("Session check runs without the api context")))
}

/// Bearer token of the `Authorization` header. The scheme is matched case-insensitively.
pub fn extract_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = auth_header
        .split_once(' ')
        .ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidToken);
    }
    match token.trim() {
        "" => Err(AuthError::MissingToken),
        token => Ok(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(authorization: Option<&str>) -> Parts {
        let mut request = Request::builder();
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        request.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_bearer_token() {
        assert_eq!(extract_token(&parts(Some("Bearer abc"))).unwrap(), "abc");
        assert_eq!(extract_token(&parts(Some("bearer abc"))).unwrap(), "abc");
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert!(matches!(extract_token(&parts(None)), Err(AuthError::MissingToken)));
        assert!(matches!(
            extract_token(&parts(Some("Basic YWRtaW4="))),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            extract_token(&parts(Some("Bearer  "))),
            Err(AuthError::MissingToken)
        ));
    }
}
