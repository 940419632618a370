//! Forum: newest posts first, any logged-in profile can post.

use crate::domain::{DomainError, ForumPost, NewForumPost};
use crate::ports::{DataGateway, Direction, Query, SessionStore};
use crate::usecases::{decode_rows, require};
use std::sync::Arc;
use tracing::{info, warn};

pub struct ForumService {
    gateway: Arc<dyn DataGateway>,
    session: Arc<dyn SessionStore>,
}

impl ForumService {
    pub fn new(gateway: Arc<dyn DataGateway>, session: Arc<dyn SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// All posts with the author's name, by `created_at` descending.
    pub async fn list(&self) -> Result<Vec<ForumPost>, DomainError> {
        let query = Query::table("forum_posts")
            .select("*, legacy_profiles(name)")
            .order("created_at", Direction::Descending);
        decode_rows(self.gateway.select(&query).await?)
    }

    /// Post as the session's profile, then refetch the full list.
    pub async fn post(&self, title: &str, content: &str) -> Result<Vec<ForumPost>, DomainError> {
        let profile_id = self.session.get().ok_or(DomainError::NotLoggedIn)?;
        require("Title", title)?;
        require("Content", content)?;

        let new_post = NewForumPost {
            title: title.to_string(),
            content: content.to_string(),
            legacy_profile_id: profile_id,
        };
        let row = serde_json::to_value(&new_post)?;
        match self.gateway.insert("forum_posts", vec![row]).await {
            Ok(()) => info!(profile_id = %new_post.legacy_profile_id, "forum post created"),
            Err(e) => warn!(error = %e, "forum post insert failed"),
        }

        self.list().await
    }
}
