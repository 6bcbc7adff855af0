//! Token-gated access to a [`Catalog`].
//!
//! Reads are open. `add` and `remove` verify the presented bearer token
//! before touching the collection, so an unauthenticated caller is told
//! "not authenticated" even when the id it named does not exist.

use std::sync::Arc;

use super::entry::{CatalogEntry, EntryId};
use super::store::{Catalog, StoreError};
use crate::auth::{AuthError, Identity, TokenVerifier};

/// Error returned by catalog service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// No entry has this id.
    NotFound(EntryId),
    /// The credential was missing or rejected.
    Unauthenticated(AuthError),
    /// No id above the current maximum is left to assign.
    IdSpaceExhausted,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "anime with id={id} not found"),
            Self::Unauthenticated(reason) => write!(f, "not authenticated: {reason}"),
            Self::IdSpaceExhausted => write!(f, "no anime id left above {}", EntryId::MAX),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unauthenticated(e) => Some(e),
            Self::NotFound(_) | Self::IdSpaceExhausted => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => Self::NotFound(id),
            StoreError::IdSpaceExhausted => Self::IdSpaceExhausted,
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(e: AuthError) -> Self {
        Self::Unauthenticated(e)
    }
}

/// The catalog together with the policy that gates its mutations.
pub struct CatalogService {
    catalog: Catalog,
    verifier: Arc<dyn TokenVerifier>,
}

impl CatalogService {
    #[must_use]
    pub fn new(catalog: Catalog, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { catalog, verifier }
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<CatalogEntry> {
        self.catalog.list()
    }

    /// The entry with `id`.
    pub fn get(&self, id: EntryId) -> Result<CatalogEntry, CatalogError> {
        Ok(self.catalog.get(id)?)
    }

    /// Verify a presented bearer token.
    pub fn authenticate(&self, token: Option<&str>) -> Result<Identity, CatalogError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.verifier.verify(token).map_err(|e| {
            tracing::debug!("rejected credential: {e}");
            CatalogError::Unauthenticated(e)
        })
    }

    /// Store `entry` under a newly assigned id. Requires a valid credential.
    pub fn add(
        &self,
        token: Option<&str>,
        entry: CatalogEntry,
    ) -> Result<CatalogEntry, CatalogError> {
        let identity = self.authenticate(token)?;
        let stored = self.catalog.add(entry)?;
        tracing::info!(
            id = stored.id,
            title = %stored.title,
            subject = identity.subject(),
            "added catalog entry"
        );
        Ok(stored)
    }

    /// Delete the entry with `id`. Requires a valid credential.
    pub fn remove(&self, token: Option<&str>, id: EntryId) -> Result<(), CatalogError> {
        let identity = self.authenticate(token)?;
        self.catalog.remove(id)?;
        tracing::info!(id, subject = identity.subject(), "removed catalog entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::auth::{JwtAuthority, JwtSettings, TokenIssuer};
    use crate::time::ManualTimeSource;

    struct Fixture {
        service: CatalogService,
        authority: Arc<JwtAuthority>,
        time: Arc<ManualTimeSource>,
    }

    fn fixture() -> Fixture {
        let time = Arc::new(ManualTimeSource::default_start());
        let settings = JwtSettings::new(
            b"service-test-secret".to_vec(),
            "catalog".to_string(),
            "catalog-clients".to_string(),
            Duration::from_secs(600),
        )
        .expect("valid settings");
        let authority = Arc::new(JwtAuthority::new(settings, time.clone()));
        let service = CatalogService::new(Catalog::seeded(), authority.clone());
        Fixture {
            service,
            authority,
            time,
        }
    }

    fn token(fixture: &Fixture) -> String {
        fixture
            .authority
            .issue_token("alice")
            .expect("issued token")
            .token()
            .to_string()
    }

    fn sample() -> CatalogEntry {
        CatalogEntry::new("Frieren", "Фэнтези", 2023, 9.3)
    }

    #[test]
    fn test_add_with_valid_token() {
        let fixture = fixture();
        let token = token(&fixture);

        let stored = fixture
            .service
            .add(Some(&token), sample())
            .expect("authorized add");

        assert_eq!(stored.id, 4);
        assert_eq!(fixture.service.get(4), Ok(stored));
    }

    #[test]
    fn test_add_without_token() {
        let fixture = fixture();
        let result = fixture.service.add(None, sample());

        assert_eq!(
            result,
            Err(CatalogError::Unauthenticated(AuthError::MissingToken))
        );
        assert_eq!(fixture.service.list().len(), 3);
    }

    #[test]
    fn test_add_with_malformed_token() {
        let fixture = fixture();
        let result = fixture.service.add(Some("garbage"), sample());

        assert_eq!(
            result,
            Err(CatalogError::Unauthenticated(AuthError::MalformedToken))
        );
    }

    #[test]
    fn test_add_with_expired_token() {
        let fixture = fixture();
        let token = token(&fixture);
        fixture.time.advance(601);

        let result = fixture.service.add(Some(&token), sample());

        assert_eq!(
            result,
            Err(CatalogError::Unauthenticated(AuthError::TokenExpired))
        );
        assert_eq!(fixture.service.list().len(), 3);
    }

    #[test]
    fn test_remove_with_valid_token() {
        let fixture = fixture();
        let token = token(&fixture);

        fixture
            .service
            .remove(Some(&token), 1)
            .expect("authorized remove");

        assert_eq!(fixture.service.get(1), Err(CatalogError::NotFound(1)));
    }

    #[test]
    fn test_remove_missing_with_valid_token() {
        let fixture = fixture();
        let token = token(&fixture);

        let result = fixture.service.remove(Some(&token), 99);
        assert_eq!(result, Err(CatalogError::NotFound(99)));
    }

    #[test]
    fn test_remove_missing_without_token_is_unauthenticated() {
        let fixture = fixture();
        let result = fixture.service.remove(None, 99);

        assert_eq!(
            result,
            Err(CatalogError::Unauthenticated(AuthError::MissingToken))
        );
    }

    #[test]
    fn test_remove_with_expired_token_keeps_entry() {
        let fixture = fixture();
        let token = token(&fixture);
        fixture.time.advance(600);

        let result = fixture.service.remove(Some(&token), 1);

        assert_eq!(
            result,
            Err(CatalogError::Unauthenticated(AuthError::TokenExpired))
        );
        assert!(fixture.service.get(1).is_ok());
    }

    #[test]
    fn test_remove_then_add_reissues_id() {
        let fixture = fixture();
        let token = token(&fixture);

        fixture.service.remove(Some(&token), 3).expect("remove 3");
        let stored = fixture.service.add(Some(&token), sample()).expect("add");

        assert_eq!(stored.id, 3);
    }

    #[test]
    fn test_add_fails_when_ids_are_exhausted() {
        let time = Arc::new(ManualTimeSource::default_start());
        let settings = JwtSettings::new(
            b"service-test-secret".to_vec(),
            "catalog".to_string(),
            "catalog-clients".to_string(),
            Duration::from_secs(600),
        )
        .expect("valid settings");
        let authority = Arc::new(JwtAuthority::new(settings, time));
        let catalog = Catalog::with_entries(vec![sample().with_id(EntryId::MAX)]);
        let service = CatalogService::new(catalog, authority.clone());
        let token = authority.issue_token("alice").expect("issued token");

        let result = service.add(Some(token.token()), sample());

        assert_eq!(result, Err(CatalogError::IdSpaceExhausted));
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::NotFound(5).to_string(),
            "anime with id=5 not found"
        );
        assert_eq!(
            CatalogError::Unauthenticated(AuthError::TokenExpired).to_string(),
            "not authenticated: JWT has expired"
        );
    }
}
