use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, IntoParams, Debug)]
#[into_params(parameter_in = Path)]
pub struct MemoryIdParam {
    /// Id of the photo row.
    pub id: String,
}
