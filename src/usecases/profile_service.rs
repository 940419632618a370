//! Profile detail page: one profile plus its blogs, forum posts and contributions.
//!
//! Only the profile's own session may add contributions.

use crate::domain::{BlogPost, Contribution, DomainError, ForumPost, NewContribution, Profile};
use crate::ports::{DataGateway, Query, SessionStore};
use crate::usecases::{decode_row, decode_rows, require};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything the detail page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub profile: Profile,
    pub blogs: Vec<BlogPost>,
    pub forum_posts: Vec<ForumPost>,
    pub contributions: Vec<Contribution>,
}

pub struct ProfileService {
    gateway: Arc<dyn DataGateway>,
    session: Arc<dyn SessionStore>,
}

impl ProfileService {
    pub fn new(gateway: Arc<dyn DataGateway>, session: Arc<dyn SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Fails only when the profile itself cannot be fetched; the page then stays loading.
    /// A failed list fetch renders as an empty section.
    pub async fn load(&self, profile_id: &str) -> Result<ProfilePage, DomainError> {
        let row = self
            .gateway
            .select_single(&Query::table("legacy_profiles").eq("id", profile_id))
            .await?;
        let profile: Profile = decode_row(row)?;

        let blogs: Vec<BlogPost> = self.owned_or_empty("blogs", profile_id).await;
        let forum_posts: Vec<ForumPost> = self.owned_or_empty("forum_posts", profile_id).await;
        let contributions: Vec<Contribution> = self.owned_or_empty("contributions", profile_id).await;

        Ok(ProfilePage {
            profile,
            blogs,
            forum_posts,
            contributions,
        })
    }

    /// Contributions of one profile, store-default order.
    pub async fn contributions(&self, profile_id: &str) -> Result<Vec<Contribution>, DomainError> {
        self.owned("contributions", profile_id).await
    }

    /// String equality between the session's profile id and the page's.
    pub fn can_contribute(&self, profile_id: &str) -> bool {
        self.session.get().as_deref() == Some(profile_id)
    }

    /// Insert a contribution for `profile_id`, then refetch the list.
    ///
    /// An insert failure is logged; the refetch still runs, like any other write.
    pub async fn add_contribution(
        &self,
        profile_id: &str,
        form: &NewContribution,
    ) -> Result<Vec<Contribution>, DomainError> {
        if !self.can_contribute(profile_id) {
            return Err(DomainError::NotOwner);
        }
        validate_contribution(form)?;

        let mut row = serde_json::to_value(form)?;
        row["legacy_profile_id"] = serde_json::Value::String(profile_id.to_string());

        match self.gateway.insert("contributions", vec![row]).await {
            Ok(()) => info!(profile_id, title = %form.title, "contribution added"),
            Err(e) => warn!(profile_id, error = %e, "contribution insert failed"),
        }

        self.contributions(profile_id).await
    }

    async fn owned<T: DeserializeOwned>(
        &self,
        table: &str,
        profile_id: &str,
    ) -> Result<Vec<T>, DomainError> {
        let query = Query::table(table).eq("legacy_profile_id", profile_id);
        decode_rows(self.gateway.select(&query).await?)
    }

    async fn owned_or_empty<T: DeserializeOwned>(&self, table: &str, profile_id: &str) -> Vec<T> {
        self.owned(table, profile_id).await.unwrap_or_else(|e| {
            warn!(table, profile_id, error = %e, "section fetch failed");
            Vec::new()
        })
    }
}

/// Form checks: all fields present, resource reference is an absolute URL.
pub fn validate_contribution(form: &NewContribution) -> Result<(), DomainError> {
    require("Title", &form.title)?;
    require("Resource URL", &form.resource_url)?;
    require("Description", &form.description)?;
    reqwest::Url::parse(&form.resource_url)
        .map_err(|_| DomainError::Validation("Resource URL must be a valid URL".to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::MemorySession;
    use crate::usecases::fixtures;

    fn form(title: &str, url: &str) -> NewContribution {
        NewContribution {
            title: title.into(),
            resource_url: url.into(),
            description: "desc".into(),
        }
    }

    #[tokio::test]
    async fn test_load_collects_owned_records() {
        let svc = ProfileService::new(fixtures::gateway(), Arc::new(MemorySession::new()));
        let page = svc.load("p1").await.unwrap();
        assert_eq!(page.profile.name, "Ada");
        let blog_ids: Vec<&str> = page.blogs.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(blog_ids, vec!["b1", "b3"]);
        assert_eq!(page.forum_posts.len(), 1);
        assert_eq!(page.contributions.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_profile_never_loads() {
        let svc = ProfileService::new(fixtures::gateway(), Arc::new(MemorySession::new()));
        assert!(svc.load("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_section_renders_empty() {
        let gw = fixtures::gateway();
        gw.set_failing("forum_posts", true).await;
        let svc = ProfileService::new(gw, Arc::new(MemorySession::new()));
        let page = svc.load("p1").await.unwrap();
        assert!(page.forum_posts.is_empty());
        assert_eq!(page.blogs.len(), 2);
    }

    #[tokio::test]
    async fn test_form_visible_only_for_own_page() {
        let session = Arc::new(MemorySession::new());
        let svc = ProfileService::new(fixtures::gateway(), session.clone());
        assert!(!svc.can_contribute("p1"));

        session.set("p1");
        assert!(svc.can_contribute("p1"));
        assert!(!svc.can_contribute("p2"));
        assert!(!svc.can_contribute("P1"));
    }

    #[tokio::test]
    async fn test_add_contribution_refetches_list() {
        let session = Arc::new(MemorySession::new());
        session.set("p1");
        let gw = fixtures::gateway();
        let svc = ProfileService::new(gw.clone(), session);

        let list = svc
            .add_contribution("p1", &form("Letters", "https://example.org/letters"))
            .await
            .unwrap();
        assert_eq!(list.len(), 2);
        let added = list.iter().find(|c| c.title == "Letters").unwrap();
        assert_eq!(added.legacy_profile_id.as_deref(), Some("p1"));
        assert_eq!(added.resource_url, "https://example.org/letters");
    }

    #[tokio::test]
    async fn test_add_contribution_rejects_foreign_page() {
        let session = Arc::new(MemorySession::new());
        session.set("p2");
        let gw = fixtures::gateway();
        let svc = ProfileService::new(gw.clone(), session);

        let err = svc
            .add_contribution("p1", &form("Letters", "https://example.org/letters"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotOwner));
        assert_eq!(gw.rows("contributions").await.len(), 1);
    }

    #[test]
    fn test_validate_contribution_fields() {
        assert!(validate_contribution(&form("T", "https://x.org")).is_ok());
        assert!(matches!(
            validate_contribution(&form("", "https://x.org")),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            validate_contribution(&form("T", "not a url")),
            Err(DomainError::Validation(_))
        ));
    }
}
