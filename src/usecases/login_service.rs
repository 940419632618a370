//! Login / logout. Credentials are matched by an exact lookup on both fields.

use crate::domain::{Credential, DomainError};
use crate::ports::{DataGateway, Query, SessionStore};
use crate::usecases::decode_row;
use crate::usecases::router::Route;
use std::sync::Arc;
use tracing::{debug, info};

pub struct LoginService {
    gateway: Arc<dyn DataGateway>,
    session: Arc<dyn SessionStore>,
}

impl LoginService {
    pub fn new(gateway: Arc<dyn DataGateway>, session: Arc<dyn SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// Store the matched profile id and return where to go next.
    ///
    /// No match, several matches and transport failures all collapse into
    /// `DomainError::InvalidCredentials`; the session is left untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<Route, DomainError> {
        let query = Query::table("legacy_auth")
            .eq("username", username)
            .eq("password", password);

        let credential: Credential = match self.gateway.select_single(&query).await {
            Ok(row) => decode_row(row).map_err(|e| {
                debug!(error = %e, "credential row did not decode");
                DomainError::InvalidCredentials
            })?,
            Err(e) => {
                debug!(error = %e, "credential lookup failed");
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.session.set(&credential.legacy_profile_id);
        info!(profile_id = %credential.legacy_profile_id, "logged in");
        Ok(Route::Directory)
    }

    pub fn logout(&self) -> Route {
        self.session.clear();
        info!("logged out");
        Route::Login
    }
}
