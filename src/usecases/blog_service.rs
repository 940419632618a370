//! Blog index and detail. Read-only; posts are authored elsewhere.

use crate::domain::{BlogPost, DomainError};
use crate::ports::{DataGateway, Direction, Query};
use crate::usecases::{decode_row, decode_rows};
use std::sync::Arc;

const BLOG_SELECT: &str = "*, legacy_profiles(name)";

pub struct BlogService {
    gateway: Arc<dyn DataGateway>,
}

impl BlogService {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<BlogPost>, DomainError> {
        let query = Query::table("blogs")
            .select(BLOG_SELECT)
            .order("created_at", Direction::Descending);
        decode_rows(self.gateway.select(&query).await?)
    }

    pub async fn get(&self, blog_id: &str) -> Result<BlogPost, DomainError> {
        let query = Query::table("blogs").select(BLOG_SELECT).eq("id", blog_id);
        decode_row(self.gateway.select_single(&query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::fixtures;

    #[tokio::test]
    async fn test_list_newest_first() {
        let svc = BlogService::new(fixtures::gateway());
        let ids: Vec<String> = svc.list().await.unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["b2", "b3", "b1"]);
    }

    #[tokio::test]
    async fn test_get_includes_owner_name() {
        let svc = BlogService::new(fixtures::gateway());
        let blog = svc.get("b2").await.unwrap();
        assert_eq!(blog.title, "Second");
        assert_eq!(blog.owner_name(), "Bo");
    }

    #[tokio::test]
    async fn test_get_missing_is_error() {
        let svc = BlogService::new(fixtures::gateway());
        assert!(matches!(
            svc.get("nope").await,
            Err(DomainError::NotSingle { found: 0, .. })
        ));
    }
}
