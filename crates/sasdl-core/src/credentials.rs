//! Credentials for proprietary archive data.
//!
//! The fetcher never holds credentials itself: it asks an injected
//! [`CredentialProvider`] after an HTTP 401 and tells it to forget the pair
//! when the server rejects it. [`CachedCredentials`] keeps the pair behind a
//! mutex; wrap it in an `Arc` to share one cache (and one prompt) between
//! fetchers on different threads.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Environment variables read by [`from_env`].
pub const USERNAME_ENV: &str = "SASDL_USERNAME";
pub const PASSWORD_ENV: &str = "SASDL_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Reads `SASDL_USERNAME` / `SASDL_PASSWORD`; both must be set and non-empty.
pub fn from_env() -> Option<Credentials> {
    let username = std::env::var(USERNAME_ENV).ok().filter(|s| !s.is_empty())?;
    let password = std::env::var(PASSWORD_ENV).ok().filter(|s| !s.is_empty())?;
    Some(Credentials::new(username, password))
}

/// What the fetcher needs from a credentials holder.
pub trait CredentialProvider: Send + Sync {
    /// Credentials already at hand; never prompts.
    fn cached(&self) -> Option<Credentials>;

    /// Credentials for `url`, asking the underlying source when none are cached.
    /// `Ok(None)` means the user declined.
    fn obtain(&self, url: &str) -> io::Result<Option<Credentials>>;

    /// Forget cached credentials after the server rejected them.
    fn invalidate(&self);
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Arc<P> {
    fn cached(&self) -> Option<Credentials> {
        (**self).cached()
    }

    fn obtain(&self, url: &str) -> io::Result<Option<Credentials>> {
        (**self).obtain(url)
    }

    fn invalidate(&self) {
        (**self).invalidate()
    }
}

/// Where fresh credentials come from when the cache is empty.
pub trait CredentialSource: Send + Sync {
    fn request(&self, url: &str) -> io::Result<Option<Credentials>>;
}

/// Lazily populated, invalidatable credentials cache over a [`CredentialSource`].
pub struct CachedCredentials<S> {
    source: S,
    cache: Mutex<Option<Credentials>>,
}

impl<S: CredentialSource> CachedCredentials<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(None),
        }
    }

    /// Starts with `initial` cached, falling back to `source` once it is invalidated.
    pub fn with_initial(source: S, initial: Option<Credentials>) -> Self {
        Self {
            source,
            cache: Mutex::new(initial),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock(&self) -> MutexGuard<'_, Option<Credentials>> {
        self.cache.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<S: CredentialSource> CredentialProvider for CachedCredentials<S> {
    fn cached(&self) -> Option<Credentials> {
        self.lock().clone()
    }

    fn obtain(&self, url: &str) -> io::Result<Option<Credentials>> {
        // Held across the prompt so concurrent callers see one prompt.
        let mut cache = self.lock();
        if let Some(c) = cache.as_ref() {
            return Ok(Some(c.clone()));
        }
        let fresh = self.source.request(url)?;
        if fresh.is_some() {
            tracing::debug!("credentials cached");
        }
        *cache = fresh.clone();
        Ok(fresh)
    }

    fn invalidate(&self) {
        if self.lock().take().is_some() {
            tracing::debug!("cached credentials cleared");
        }
    }
}

/// Interactive prompt on the controlling terminal: username in plain text,
/// password with echo off. An empty username aborts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl CredentialSource for TerminalPrompt {
    fn request(&self, url: &str) -> io::Result<Option<Credentials>> {
        let mut stderr = io::stderr();
        writeln!(
            stderr,
            "\n{url} is proprietary data; please provide your SDSS username and password."
        )?;
        write!(stderr, "Username: ")?;
        stderr.flush()?;

        let mut username = String::new();
        io::stdin().lock().read_line(&mut username)?;
        let username = username.trim();
        if username.is_empty() {
            return Ok(None);
        }
        let password = rpassword::prompt_password("Password: ")?;
        Ok(Some(Credentials::new(username, password)))
    }
}

/// Always yields the same injected pair.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub Credentials);

impl CredentialSource for StaticCredentials {
    fn request(&self, _url: &str) -> io::Result<Option<Credentials>> {
        Ok(Some(self.0.clone()))
    }
}

/// Never yields credentials; for non-interactive batch runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl CredentialSource for NoPrompt {
    fn request(&self, _url: &str) -> io::Result<Option<Credentials>> {
        Ok(None)
    }
}
