use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct AskParam {
    pub inputs: AskInputs,
}

#[derive(Deserialize, ToSchema)]
pub struct AskInputs {
    /// The reader's question. Inbound the field is `query`; it is
    /// forwarded to the search backend as `question`.
    #[serde(alias = "question")]
    pub query: String,
    pub author: Option<String>,
}
