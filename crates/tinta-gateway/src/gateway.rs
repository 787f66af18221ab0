//! The authentication facade.
//!
//! [`AuthGateway`] composes the password hasher, token service, provider
//! client, and identity resolver behind one API: register, log in,
//! complete a social login, and authenticate bearer tokens. It holds no
//! mutable state and is shared by reference.

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use std::sync::Arc;
use tinta_auth::{PasswordHasher, SessionClaims, TokenService};
use tinta_core::{AccountId, Provider, Role};
use tinta_db::{Account, CredentialStore, LinkedIdentity, NewAccount};
use tinta_social::{DiscordProvider, IdentityResolver, ProviderClient, SocialError};

/// Facade over the full authentication flow.
#[derive(Clone)]
pub struct AuthGateway {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    tokens: TokenService,
    provider: Arc<dyn ProviderClient>,
    resolver: IdentityResolver,
}

impl AuthGateway {
    /// Assemble a gateway from its parts.
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        tokens: TokenService,
        provider: Arc<dyn ProviderClient>,
        link_social_by_email: bool,
    ) -> Self {
        let resolver = IdentityResolver::new(store.clone(), link_social_by_email);
        Self {
            store,
            hasher,
            tokens,
            provider,
            resolver,
        }
    }

    /// Assemble a gateway from configuration, with a Discord provider.
    pub fn from_config(
        config: &GatewayConfig,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self, GatewayError> {
        let provider = DiscordProvider::new(
            &config.discord_client_id,
            &config.discord_client_secret,
            &config.discord_redirect_uri,
        )
        .map_err(|e| GatewayError::Internal(format!("Provider client setup failed: {e}")))?;

        Ok(Self::new(
            store,
            PasswordHasher::new(),
            TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl),
            Arc::new(provider),
            config.link_social_by_email,
        ))
    }

    /// Register a local account with an email and password.
    ///
    /// # Errors
    ///
    /// `GatewayError::EmailTaken` if the email already belongs to an
    /// account.
    pub async fn register(
        &self,
        name: &str,
        lastname: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, GatewayError> {
        let hash = self.hasher.hash(password)?;
        let account = self
            .store
            .create_account(NewAccount::local(name, lastname, email, hash))
            .await?;

        tracing::info!(account_id = %account.id, "Registered local account");
        Ok(account)
    }

    /// Authenticate an email/password pair and issue a session token.
    ///
    /// # Errors
    ///
    /// `GatewayError::InvalidCredentials` for an unknown email, a wrong
    /// password, or an account with no password at all. The three cases
    /// are indistinguishable to the caller.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Account, String), GatewayError> {
        let Some(account) = self.store.find_account_by_email(email).await? else {
            return Err(GatewayError::InvalidCredentials);
        };

        let Some(hash) = account.password_hash.as_deref() else {
            tracing::debug!(account_id = %account.id, "Password login against social-only account");
            return Err(GatewayError::InvalidCredentials);
        };

        if !self.hasher.verify(password, hash) {
            return Err(GatewayError::InvalidCredentials);
        }

        let token = self.issue_session(&account, None)?;
        tracing::info!(account_id = %account.id, "Local login");
        Ok((account, token))
    }

    /// The provider consent URL to redirect the user to.
    #[must_use]
    pub fn begin_social_login(&self) -> String {
        self.provider.authorization_url()
    }

    /// Complete a social login from the authorization code the provider
    /// called back with: exchange it, fetch the profile, resolve the
    /// account, and issue a session token.
    pub async fn complete_social_login(
        &self,
        code: &str,
    ) -> Result<(Account, String), GatewayError> {
        let provider = self.provider.provider();

        let tokens = self
            .provider
            .exchange_code(code)
            .await
            .map_err(|source| GatewayError::ProviderExchangeFailed { source })?;

        let profile = self
            .provider
            .fetch_profile(&tokens.access_token)
            .await
            .map_err(|source| GatewayError::ProviderProfileFailed { source })?;

        let (account, _identity) = self
            .resolver
            .resolve(provider, &profile, &tokens)
            .await
            .map_err(map_resolution_error)?;

        let token = self.issue_session(&account, Some(provider))?;
        tracing::info!(account_id = %account.id, %provider, "Social login");
        Ok((account, token))
    }

    /// Validate a bearer token and return its claims.
    pub fn authenticate(&self, token: &str) -> Result<SessionClaims, GatewayError> {
        Ok(self.tokens.validate(token)?)
    }

    /// Validate a bearer token and load the account it names.
    ///
    /// # Errors
    ///
    /// `GatewayError::AccountNotFound` when the token is valid but its
    /// account has since disappeared.
    pub async fn authenticate_and_load(&self, token: &str) -> Result<Account, GatewayError> {
        let claims = self.authenticate(token)?;
        let id = claims.account_id().map_err(|_| GatewayError::InvalidToken)?;

        self.store
            .find_account_by_id(id)
            .await?
            .ok_or(GatewayError::AccountNotFound { id })
    }

    /// Require an exact role. Roles are not ordered; `Admin` does not
    /// imply `User`.
    pub fn require_role(&self, account: &Account, required: Role) -> Result<(), GatewayError> {
        if account.role == required {
            Ok(())
        } else {
            Err(GatewayError::Forbidden { required })
        }
    }

    /// The provider identity linked to an account, if any.
    ///
    /// # Errors
    ///
    /// `GatewayError::AccountNotFound` when the account does not exist.
    pub async fn linked_identity(
        &self,
        account_id: AccountId,
    ) -> Result<Option<LinkedIdentity>, GatewayError> {
        if self.store.find_account_by_id(account_id).await?.is_none() {
            return Err(GatewayError::AccountNotFound { id: account_id });
        }
        Ok(self.store.find_identity_by_account(account_id).await?)
    }

    fn issue_session(
        &self,
        account: &Account,
        provider: Option<Provider>,
    ) -> Result<String, GatewayError> {
        let mut claims = SessionClaims::new(account.id, &account.email, account.role);
        if let Some(provider) = provider {
            claims = claims.with_provider(provider);
        }
        Ok(self.tokens.issue(claims, None)?)
    }
}

/// Map resolver outcomes onto the gateway taxonomy.
fn map_resolution_error(err: SocialError) -> GatewayError {
    match err {
        SocialError::AccountCollision { .. } => GatewayError::AccountCollision,
        SocialError::Conflict => GatewayError::StoreConflict,
        SocialError::Store(store) => store.into(),
        // The resolver does not call the provider, but the mapping is
        // total so a future refactor cannot silently drop a variant.
        source @ (SocialError::ExchangeFailed { .. } | SocialError::Http(_)) => {
            GatewayError::ProviderExchangeFailed { source }
        }
        source @ SocialError::ProfileFailed { .. } => {
            GatewayError::ProviderProfileFailed { source }
        }
    }
}
