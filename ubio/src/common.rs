use std::{fmt::Display, sync::Arc};

use anyhow::Result;
use log::info;
use ubio_core::{
    config::UbioConfig,
    session::AuthenticationSession,
    store::{FileStore, IS_LOGGED_IN, LoginStore},
};

use crate::biometric::Backend;

pub type Session = AuthenticationSession<Backend, Arc<FileStore>>;

/// Screen the shell lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Authenticated,
    Register,
}

impl Screen {
    #[must_use]
    pub fn for_flag(logged_in: bool) -> Self {
        if logged_in { Self::Authenticated } else { Self::Register }
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authenticated => write!(f, "authenticated"),
            Self::Register => write!(f, "register"),
        }
    }
}

pub fn open_store(config: &UbioConfig) -> Result<Arc<FileStore>> {
    let store = match &config.store.path {
        Some(path) => FileStore::open(path)?,
        None => FileStore::new()?,
    };

    Ok(Arc::new(store))
}

/// Read the login flag once, the way the shell does at startup.
pub fn initial_screen<S>(store: &S) -> Screen
where
    S: LoginStore,
{
    let logged_in = store.get_bool(IS_LOGGED_IN);
    info!("{IS_LOGGED_IN}={logged_in}");
    Screen::for_flag(logged_in)
}

pub fn new_session(config: &UbioConfig) -> Result<Session> {
    let store = open_store(config)?;
    let backend = Backend::select(&config.helper);

    let session = AuthenticationSession::new(backend, store).with_policy(config.auth.on_unavailable);

    info!("backend={} policy={:?}", session.evaluator().name(), session.policy());

    Ok(session)
}

#[cfg(test)]
mod tests {
    use ubio_core::store::MemoryStore;

    use super::*;

    #[test]
    fn test_initial_screen() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(initial_screen(&store), Screen::Register);

        store.set_bool(IS_LOGGED_IN, true)?;
        assert_eq!(initial_screen(&store), Screen::Authenticated);
        assert_eq!(Screen::Authenticated.to_string(), "authenticated");

        Ok(())
    }
}
