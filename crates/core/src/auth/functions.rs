use std::collections::HashMap;

use async_trait::async_trait;

use super::{AuthError, BearerToken, Principal, Result, Role, TokenVerifier};

/// Parses a role name, case-insensitively.
pub fn parse_role(s: &str) -> Result<Role> {
    match s.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "staff" => Ok(Role::Staff),
        other => Err(AuthError::UnknownRole(other.to_string())),
    }
}

/// Parses a comma-separated `token[:role]` list. A token without a role is
/// an admin token. Blank entries are skipped.
pub fn parse_token_table(raw: &str) -> Result<HashMap<BearerToken, Principal>> {
    let mut table = HashMap::new();

    for (index, entry) in raw.split(',').map(str::trim).enumerate() {
        if entry.is_empty() {
            continue;
        }

        let (token, role) = match entry.split_once(':') {
            Some((token, role)) => (token.trim(), parse_role(role)?),
            None => (entry, Role::Admin),
        };
        if token.is_empty() {
            return Err(AuthError::InvalidTokenEntry(entry.to_string()));
        }

        table.insert(
            BearerToken::new(token),
            Principal::new(format!("token-{}", index + 1), role),
        );
    }

    Ok(table)
}

/// A fixed token table, loaded from configuration at start.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<BearerToken, Principal>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: HashMap<BearerToken, Principal>) -> Self {
        Self { tokens }
    }

    /// Builds a verifier from a `token[:role],…` list.
    pub fn from_table(raw: &str) -> Result<Self> {
        parse_token_table(raw).map(Self::new)
    }

    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(BearerToken::new(token), principal);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &BearerToken) -> Result<Option<Principal>> {
        Ok(self.tokens.get(token).cloned())
    }
}
