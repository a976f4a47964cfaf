use crate::api::{endpoints, ApiClient, ApiError};
use crate::models::{Comment, Message, MessageUpdate, NewComment, NewMessage, Page};

use super::{require, PageQuery};

impl ApiClient {
    pub async fn messages(&self, page: u32, size: u32) -> Result<Page<Message>, ApiError> {
        self.get_with_query(endpoints::MESSAGES, &PageQuery { page, size })
            .await
    }

    /// Single message with its comments
    pub async fn message(&self, id: i64) -> Result<Message, ApiError> {
        self.get(&endpoints::message(id)).await
    }

    // ===== Admin only =====

    pub async fn create_message(&self, message: &NewMessage) -> Result<Message, ApiError> {
        require("title", &message.title)?;
        require("content", &message.content)?;
        self.post(endpoints::ADMIN_MESSAGES, message).await
    }

    pub async fn update_message(
        &self,
        id: i64,
        update: &MessageUpdate,
    ) -> Result<Message, ApiError> {
        self.put(&endpoints::admin_message(id), update).await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::admin_message(id)).await
    }

    pub async fn delete_comment(&self, message_id: i64, comment_id: i64) -> Result<(), ApiError> {
        self.delete(&endpoints::admin_comment(message_id, comment_id))
            .await
    }

    // ===== Any signed-in user =====

    pub async fn add_comment(&self, message_id: i64, content: &str) -> Result<Comment, ApiError> {
        require("content", content)?;
        let body = NewComment {
            content: content.trim().to_string(),
        };
        self.post(&endpoints::message_comments(message_id), &body)
            .await
    }
}
