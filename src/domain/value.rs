use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Branch key identifying an application account.
///
/// Invariant: non-empty after trimming.
pub struct BranchKey(String);

impl BranchKey {
    /// Parameter name used by the Branch API (`branch_key`).
    pub const FIELD: &'static str = "branch_key";
    /// Environment variable read by [`Config::from_env`].
    pub const ENV: &'static str = "BRANCH_KEY";

    /// Create a validated [`BranchKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Branch secret paired with a [`BranchKey`]; required for mutating calls.
///
/// Invariant: must not be empty. `Debug` output is redacted.
pub struct BranchSecret(String);

impl BranchSecret {
    /// Parameter name used by the Branch API (`branch_secret`).
    pub const FIELD: &'static str = "branch_secret";
    /// Environment variable read by [`Config::from_env`].
    pub const ENV: &'static str = "BRANCH_SECRET";

    /// Create a validated [`BranchSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BranchSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BranchSecret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Credentials shared by every resource service of a client.
pub struct Config {
    branch_key: BranchKey,
    branch_secret: Option<BranchSecret>,
}

impl Config {
    /// Configuration with a key only; enough for read-only and link-creation calls.
    pub fn new(branch_key: BranchKey) -> Self {
        Self {
            branch_key,
            branch_secret: None,
        }
    }

    /// Attach the secret required by `App::modify`, `App::current` and `Url::modify`.
    pub fn with_secret(mut self, branch_secret: BranchSecret) -> Self {
        self.branch_secret = Some(branch_secret);
        self
    }

    /// Read `BRANCH_KEY` (required) and `BRANCH_SECRET` (optional) from the environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        let key = std::env::var(BranchKey::ENV).map_err(|_| ValidationError::MissingEnv {
            var: BranchKey::ENV,
        })?;
        let config = Self::new(BranchKey::new(key)?);
        match std::env::var(BranchSecret::ENV) {
            Ok(secret) if !secret.trim().is_empty() => {
                Ok(config.with_secret(BranchSecret::new(secret)?))
            }
            _ => Ok(config),
        }
    }

    pub fn branch_key(&self) -> &BranchKey {
        &self.branch_key
    }

    pub fn branch_secret(&self) -> Option<&BranchSecret> {
        self.branch_secret.as_ref()
    }
}
