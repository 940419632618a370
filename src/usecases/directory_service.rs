//! Directory listing: every profile, earliest tenure first.

use crate::domain::{DomainError, Profile};
use crate::ports::{DataGateway, Direction, Query};
use crate::usecases::decode_rows;
use std::sync::Arc;

pub struct DirectoryService {
    gateway: Arc<dyn DataGateway>,
}

impl DirectoryService {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        let query = Query::table("legacy_profiles").order("tenure_start", Direction::Ascending);
        decode_rows(self.gateway.select(&query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::fixtures;

    #[tokio::test]
    async fn test_list_sorted_by_tenure_start() {
        let svc = DirectoryService::new(fixtures::gateway());
        let profiles = svc.list().await.unwrap();
        let ids: Vec<&str> = profiles.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p3", "p1"]);
        assert!(profiles.windows(2).all(|w| w[0].tenure_start <= w[1].tenure_start));
    }

    #[tokio::test]
    async fn test_list_error_surfaces_to_caller() {
        let gw = fixtures::gateway();
        gw.set_failing("legacy_profiles", true).await;
        let svc = DirectoryService::new(gw);
        assert!(svc.list().await.is_err());
    }
}
