use crate::kernel::services::ports::{BoxFuture, SessionProvider, User};

const USER_VAR: &str = "PLAYGROUND_USER";

/// Reads the signed-in user id from `PLAYGROUND_USER`, falling back to the
/// OS account name.
#[derive(Debug, Default, Clone)]
pub struct EnvSessionProvider;

impl EnvSessionProvider {
    fn lookup() -> Option<User> {
        let id = std::env::var(USER_VAR)
            .or_else(|_| std::env::var("USER"))
            .or_else(|_| std::env::var("USERNAME"))
            .ok()
            .filter(|id| !id.trim().is_empty())?;
        Some(User {
            id,
            name: None,
            email: None,
        })
    }
}

impl SessionProvider for EnvSessionProvider {
    fn current_user(&self) -> BoxFuture<'_, Option<User>> {
        Box::pin(async { Self::lookup() })
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/session.rs"]
mod tests;
