use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::Backend;

#[derive(Clone)]
pub struct ApiContext {
    pub backend: Backend,
    pub settings: AppSettings,
}

impl ApiContext {
    #[must_use]
    pub const fn new(backend: Backend, settings: AppSettings) -> Self {
        Self { backend, settings }
    }
}

// These impls allow Axum to extract the Backend and AppSettings from the AppState.
// This is useful for middleware and extractors that might only need one part of the state.
impl FromRef<ApiContext> for Backend {
    fn from_ref(state: &ApiContext) -> Self {
        state.backend.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}
