//! Access-token resolution for the record store.
//!
//! Tokens come from an ordered chain of named providers, each a pure
//! function over a [`CredentialEnv`] snapshot. The first provider yielding
//! a non-empty (trimmed) token wins:
//! 1. `override-storage`: a token saved in local storage
//! 2. `process-context`: the `RXTRAINING_RECORDS_TOKEN` environment variable
//! 3. `embedded-fallback`: a token baked in at build time, for development

use crate::storage::{KeyValueStorage, StorageResult};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Environment variable read by the `process-context` provider.
pub const CONTEXT_TOKEN_ENV: &str = "RXTRAINING_RECORDS_TOKEN";

/// Build-time development token, if one was supplied to the compiler.
const EMBEDDED_TOKEN: Option<&str> = option_env!("RXTRAINING_EMBEDDED_TOKEN");

/// Snapshot of every place a token may come from.
#[derive(Clone, Debug, Default)]
pub struct CredentialEnv {
    pub override_token: Option<String>,
    pub context_token: Option<String>,
    pub embedded_token: Option<String>,
}

/// A named step in the resolution chain.
#[derive(Clone, Copy)]
pub struct CredentialProvider {
    name: &'static str,
    lookup: fn(&CredentialEnv) -> Option<String>,
}

impl CredentialProvider {
    pub const fn new(name: &'static str, lookup: fn(&CredentialEnv) -> Option<String>) -> Self {
        Self { name, lookup }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs the lookup; blank values count as absent.
    pub fn resolve(&self, env: &CredentialEnv) -> Option<String> {
        (self.lookup)(env)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for CredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CredentialProvider").field(&self.name).finish()
    }
}

pub const OVERRIDE_STORAGE: CredentialProvider =
    CredentialProvider::new("override-storage", override_token);

pub const PROCESS_CONTEXT: CredentialProvider =
    CredentialProvider::new("process-context", context_token);

pub const EMBEDDED_FALLBACK: CredentialProvider =
    CredentialProvider::new("embedded-fallback", embedded_token);

fn override_token(env: &CredentialEnv) -> Option<String> {
    env.override_token.clone()
}

fn context_token(env: &CredentialEnv) -> Option<String> {
    env.context_token.clone()
}

fn embedded_token(env: &CredentialEnv) -> Option<String> {
    env.embedded_token.clone()
}

/// A token together with the provider that produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedCredential {
    pub source: &'static str,
    pub token: String,
}

impl fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("source", &self.source)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Ordered provider chain.
#[derive(Clone, Debug)]
pub struct CredentialResolver {
    providers: Vec<CredentialProvider>,
}

impl CredentialResolver {
    pub fn new(providers: Vec<CredentialProvider>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[CredentialProvider] {
        &self.providers
    }

    /// Returns the first token any provider yields, in priority order.
    pub fn resolve(&self, env: &CredentialEnv) -> Option<ResolvedCredential> {
        self.providers.iter().find_map(|provider| {
            provider.resolve(env).map(|token| ResolvedCredential {
                source: provider.name(),
                token,
            })
        })
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(vec![OVERRIDE_STORAGE, PROCESS_CONTEXT, EMBEDDED_FALLBACK])
    }
}

/// Supplies the bearer token attached to every store request.
pub trait TokenSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// A fixed token, or none at all.
#[derive(Clone, Debug, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        self.0
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

/// The standard token source: override storage, process context, embedded fallback.
pub struct Credentials {
    resolver: CredentialResolver,
    storage: Arc<dyn KeyValueStorage>,
    override_key: String,
    context_var: Option<String>,
    embedded_token: Option<String>,
}

impl Credentials {
    pub fn new(storage: Arc<dyn KeyValueStorage>, override_key: impl Into<String>) -> Self {
        Self {
            resolver: CredentialResolver::default(),
            storage,
            override_key: override_key.into(),
            context_var: Some(CONTEXT_TOKEN_ENV.to_string()),
            embedded_token: EMBEDDED_TOKEN.map(str::to_string),
        }
    }

    /// Replaces the provider chain.
    pub fn with_resolver(mut self, resolver: CredentialResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Changes (or disables) the environment variable read as process context.
    pub fn with_context_var(mut self, var: Option<&str>) -> Self {
        self.context_var = var.map(str::to_string);
        self
    }

    /// Changes (or disables) the embedded fallback token.
    pub fn with_embedded_token(mut self, token: Option<String>) -> Self {
        self.embedded_token = token;
        self
    }

    /// Captures the current state of every token location.
    ///
    /// A storage read failure reads as "no override".
    pub fn snapshot(&self) -> CredentialEnv {
        let override_token = match self.storage.get(&self.override_key) {
            Ok(value) => value,
            Err(e) => {
                debug!("token override unreadable, ignoring: {e}");
                None
            }
        };
        CredentialEnv {
            override_token,
            context_token: self
                .context_var
                .as_deref()
                .and_then(|var| std::env::var(var).ok()),
            embedded_token: self.embedded_token.clone(),
        }
    }

    pub fn resolve(&self) -> Option<ResolvedCredential> {
        self.resolver.resolve(&self.snapshot())
    }

    /// Saves a token that takes priority over every other source.
    pub fn set_override(&self, token: &str) -> StorageResult<()> {
        self.storage.set(&self.override_key, token.trim())
    }

    pub fn clear_override(&self) -> StorageResult<()> {
        self.storage.remove(&self.override_key)
    }
}

impl TokenSource for Credentials {
    fn token(&self) -> Option<String> {
        let resolved = self.resolve()?;
        debug!("using record store token from {}", resolved.source);
        Some(resolved.token)
    }
}
