use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

const INVALID_CREDENTIAL_CODES: &[&str] = &[
    "auth/invalid-credential",
    "auth/user-not-found",
    "auth/wrong-password",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: Option<String>,
}

/// Error reported by the identity provider, keyed by its own error code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct AuthError {
    pub code: String,
    pub message: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn is_invalid_credential(&self) -> bool {
        INVALID_CREDENTIAL_CODES.contains(&self.code.as_str())
    }

    /// Credential failures collapse into one message; anything else passes through.
    pub fn user_message(&self) -> String {
        if self.is_invalid_credential() {
            "Invalid username or password".to_string()
        } else {
            self.message.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type AuthListener = Box<dyn Fn(Option<User>) + Send + Sync>;

/// External identity service. Implementations call listeners with the
/// current user on subscribe and on every sign-in or sign-out.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError>;
    async fn sign_out(&self) -> Result<(), AuthError>;
    async fn send_password_reset_email(&self, email: &str) -> Result<(), AuthError>;

    fn subscribe(&self, listener: AuthListener) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Tracks the signed-in user for as long as it is alive.
pub struct CurrentUser<P: IdentityProvider + ?Sized> {
    provider: Arc<P>,
    subscription: SubscriptionId,
    receiver: watch::Receiver<Option<User>>,
}

impl<P: IdentityProvider + ?Sized> CurrentUser<P> {
    pub fn watch(provider: Arc<P>) -> Self {
        let (sender, receiver) = watch::channel(None);
        let subscription = provider.subscribe(Box::new(move |user| {
            sender.send_replace(user);
        }));
        Self {
            provider,
            subscription,
            receiver,
        }
    }

    pub fn user(&self) -> Option<User> {
        self.receiver.borrow().clone()
    }

    /// Coaches may edit activities and prizes only while signed in.
    pub fn can_edit(&self) -> bool {
        self.receiver.borrow().is_some()
    }

    /// Waits for the next auth-state change.
    pub async fn changed(&mut self) -> Option<User> {
        if self.receiver.changed().await.is_err() {
            return None;
        }
        self.receiver.borrow_and_update().clone()
    }
}

impl<P: IdentityProvider + ?Sized> Drop for CurrentUser<P> {
    fn drop(&mut self) {
        self.provider.unsubscribe(self.subscription);
    }
}

/// Message shown under the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }
}

pub struct LoginFlow<P: IdentityProvider + ?Sized> {
    provider: Arc<P>,
}

impl<P: IdentityProvider + ?Sized> LoginFlow<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Notice {
        match self.provider.sign_in(email, password).await {
            Ok(user) => {
                info!("coach {} signed in", user.uid);
                Notice::info("Signed in successfully!")
            }
            Err(err) => {
                warn!("sign-in failed: {err}");
                Notice::error(err.user_message())
            }
        }
    }

    pub async fn sign_out(&self) -> Notice {
        match self.provider.sign_out().await {
            Ok(()) => Notice::info("Signed out."),
            Err(err) => Notice::error(err.message),
        }
    }

    pub async fn request_password_reset(&self, email: &str) -> Notice {
        let email = email.trim();
        if email.is_empty() {
            return Notice::error("Please enter your email address");
        }
        match self.provider.send_password_reset_email(email).await {
            Ok(()) => Notice::info("Password reset email sent! Check your inbox."),
            Err(err) => Notice::error(err.message),
        }
    }
}
