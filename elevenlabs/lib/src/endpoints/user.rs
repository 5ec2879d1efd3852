//! Account and subscription information.

use super::{ApiEndpoint, endpoint};
use crate::error::Result;
use crate::types::{SubscriptionInfo, UserInfo};

endpoint!(
    /// Operations under `/user`.
    UserEndpoint,
    "user"
);

impl UserEndpoint {
    /// `GET /user`
    pub async fn get_user_info(&self) -> Result<UserInfo> {
        self.context.get_json(&self.url(""), crate::client::NO_QUERY).await
    }

    /// `GET /user/subscription`
    pub async fn get_subscription_info(&self) -> Result<SubscriptionInfo> {
        self.context.get_json(&self.url("/subscription"), crate::client::NO_QUERY).await
    }
}
