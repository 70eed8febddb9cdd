use crate::routes::{auth, legacy, memories, music, root, upload};
use common_services::api::legacy::interfaces::LegacyMemoriesDocument;
use common_services::api::music::interfaces::MusicTrack;
use common_services::api::upload::interfaces::UploadForm;
use common_types::{
    AckResponse, ErrorResponse, LoginRequest, MediaKind, MemoriesPayload, Memory, MusicUrlPayload,
    SaveResponse, SessionClaims, SessionToken, UploadResponse,
};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::root,
        root::handlers::health_check,
        // Auth handlers
        auth::handlers::login_handler,
        auth::handlers::get_session,
        // Memories handlers
        memories::handlers::get_memories_db,
        memories::handlers::post_memories_db,
        memories::handlers::delete_memory_db,
        // Music handlers
        music::handlers::get_music_url_db,
        music::handlers::post_music_url_db,
        music::handlers::get_music,
        music::handlers::delete_music_handler,
        // Upload handlers
        upload::handlers::upload_handler,
        // Legacy handlers
        legacy::handlers::get_legacy_memories,
        legacy::handlers::post_legacy_memories,
    ),
    components(
        schemas(
            Memory,
            MemoriesPayload,
            MusicUrlPayload,
            MusicTrack,
            MediaKind,
            AckResponse,
            SaveResponse,
            ErrorResponse,
            UploadForm,
            UploadResponse,
            LoginRequest,
            SessionToken,
            SessionClaims,
            LegacyMemoriesDocument,
        ),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Memories", description = "Photos shown in the slideshow"),
        (name = "Music", description = "Background music of the slideshow"),
        (name = "Upload", description = "Uploading photos and music"),
        (name = "Auth", description = "Admin session endpoints"),
        (name = "Legacy", description = "File-backed memories store"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
