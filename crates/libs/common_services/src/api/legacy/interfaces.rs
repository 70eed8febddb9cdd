use common_types::Memory;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The legacy store accepts the same envelope it returns.
#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
pub struct LegacyMemoriesDocument {
    #[serde(default)]
    pub memories: Vec<Memory>,
}
