mod api_doc;
pub mod auth;
pub mod legacy;
pub mod memories;
pub mod music;
pub mod root;
pub mod upload;

use crate::api_state::ApiContext;
use crate::auth::middlewares::session::AdminSession;
use crate::auth::router::{auth_protected_router, auth_public_router};
use crate::legacy::router::{legacy_protected_router, legacy_public_router};
use crate::memories::router::{memories_protected_router, memories_public_router};
use crate::music::router::{music_protected_router, music_public_router};
use crate::root::router::{root_public_router, storage_router};
use crate::routes::api_doc::ApiDoc;
use crate::upload::router::upload_protected_router;
use app_state::StorageKind;
use axum::Router;
use axum::middleware::from_extractor_with_state;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(public_routes())
        .merge(protected_routes(api_state.clone()));

    if api_state.settings.backend.storage == StorageKind::Memory {
        router = router.merge(storage_router());
    }

    router.with_state(api_state)
}

fn public_routes() -> Router<ApiContext> {
    Router::new()
        .merge(root_public_router())
        .merge(auth_public_router())
        .merge(memories_public_router())
        .merge(music_public_router())
        .merge(legacy_public_router())
}

fn protected_routes(api_state: ApiContext) -> Router<ApiContext> {
    Router::new()
        .merge(auth_protected_router())
        .merge(upload_protected_router())
        .merge(memories_protected_router())
        .merge(music_protected_router())
        .merge(legacy_protected_router())
        .route_layer(from_extractor_with_state::<AdminSession, ApiContext>(
            api_state,
        ))
}
