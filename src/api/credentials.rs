//! Account credentials for HTTP Basic authentication.

use secrecy::{ExposeSecret, SecretString};

/// Zenvia account credentials.
///
/// The secret is the account password or, on newer gateway versions, an API
/// token. No validation happens here: the gateway answers `401` for bad
/// credentials on the first call.
#[derive(Clone)]
pub struct Credentials {
    account: String,
    secret: SecretString,
}

impl Credentials {
    /// Create credentials from an account name and secret.
    pub fn new(account: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Account name used as the Basic auth user.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Password or token used as the Basic auth password.
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    pub(crate) fn apply(
        &self,
        request: reqwest_middleware::RequestBuilder,
    ) -> reqwest_middleware::RequestBuilder {
        request.basic_auth(&self.account, Some(self.secret.expose_secret()))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
