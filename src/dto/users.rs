use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[schema(example = "customer4", max_length = 50)]
    pub username: Option<String>,
}
