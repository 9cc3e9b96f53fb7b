use crate::client::ApiClient;
use crate::error::ApiError;
use crate::ids::NotificationId;
use crate::models::{Notification, UnreadCount};
use serde::de::IgnoredAny;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationService {
    client: Arc<ApiClient>,
}

impl NotificationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, unread_only: bool) -> Result<Vec<Notification>, ApiError> {
        let q = vec![("unread_only".to_string(), unread_only.to_string())];
        self.client.get_query("/notifications", &q).await
    }

    pub async fn unread_count(&self) -> Result<u32, ApiError> {
        let c: UnreadCount = self.client.get("/notifications/unread-count").await?;
        Ok(c.count)
    }

    pub async fn mark_read(&self, id: NotificationId) -> Result<(), ApiError> {
        self.client
            .post_empty::<IgnoredAny>(&format!("/notifications/{}/read", id))
            .await
            .map(|_| ())
    }

    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        self.client
            .post_empty::<IgnoredAny>("/notifications/read-all")
            .await
            .map(|_| ())
    }
}
