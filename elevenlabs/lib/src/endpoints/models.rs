//! Synthesis model catalogue.

use super::{ApiEndpoint, endpoint};
use crate::error::Result;
use crate::types::Model;

endpoint!(
    /// Lists the synthesis models available to the account.
    ModelsEndpoint,
    "models"
);

impl ModelsEndpoint {
    /// `GET /models`
    pub async fn get_models(&self) -> Result<Vec<Model>> {
        self.context.get_json(&self.url(""), crate::client::NO_QUERY).await
    }
}
