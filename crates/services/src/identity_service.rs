use std::sync::Arc;

use flashy_core::model::UserId;
use storage::repository::CredentialRepository;

use crate::error::IdentityError;

/// The signed-in user, possibly minted anonymously on this device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub anonymous: bool,
}

/// Resolves the identity that scopes every persisted collection.
#[derive(Clone)]
pub struct IdentityService {
    credentials: Arc<dyn CredentialRepository>,
}

impl IdentityService {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialRepository>) -> Self {
        Self { credentials }
    }

    /// Sign in, issuing an anonymous identity when no credential exists.
    ///
    /// An explicit id wins over the stored credential and is not persisted;
    /// the stored credential only ever holds the anonymous identity.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Storage` if the credential cannot be read or
    /// written.
    pub async fn sign_in(&self, explicit: Option<UserId>) -> Result<Identity, IdentityError> {
        if let Some(user_id) = explicit {
            tracing::info!(user = %user_id, "signed in with explicit identity");
            return Ok(Identity {
                user_id,
                anonymous: false,
            });
        }

        if let Some(user_id) = self.credentials.load_credential().await? {
            tracing::info!(user = %user_id, "restored stored identity");
            return Ok(Identity {
                user_id,
                anonymous: true,
            });
        }

        let user_id = UserId::anonymous();
        self.credentials.store_credential(&user_id).await?;
        tracing::info!(user = %user_id, "issued anonymous identity");
        Ok(Identity {
            user_id,
            anonymous: true,
        })
    }
}
