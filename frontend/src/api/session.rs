use std::rc::Rc;

use super::types::User;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// In-memory shape of an authenticated session. Created on login, the access
/// token is replaced transparently on refresh, destroyed on logout or an
/// unrecoverable refresh failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

/// Persistence seam for the session. The client talks to this trait only, so
/// session state has an explicit init (hydrate) and teardown (clear)
/// lifecycle instead of ambient globals.
pub trait SessionStore {
    fn hydrate(&self) -> Option<Session>;
    fn persist(&self, session: &Session);
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn stored_user(&self) -> Option<User>;
    fn replace_access_token(&self, access: &str);
    fn replace_refresh_token(&self, refresh: &str);
    fn clear(&self);
}

/// Store used outside the browser (host-side tests); browser builds default
/// to [`BrowserSessionStore`].
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: std::cell::RefCell<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        let store = Self::new();
        store.persist(&session);
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn hydrate(&self) -> Option<Session> {
        self.inner.borrow().clone()
    }

    fn persist(&self, session: &Session) {
        *self.inner.borrow_mut() = Some(session.clone());
    }

    fn access_token(&self) -> Option<String> {
        self.inner.borrow().as_ref().map(|s| s.access.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.inner.borrow().as_ref().map(|s| s.refresh.clone())
    }

    fn stored_user(&self) -> Option<User> {
        self.inner.borrow().as_ref().map(|s| s.user.clone())
    }

    fn replace_access_token(&self, access: &str) {
        if let Some(session) = self.inner.borrow_mut().as_mut() {
            session.access = access.to_string();
        }
    }

    fn replace_refresh_token(&self, refresh: &str) {
        if let Some(session) = self.inner.borrow_mut().as_mut() {
            session.refresh = refresh.to_string();
        }
    }

    fn clear(&self) {
        *self.inner.borrow_mut() = None;
    }
}

/// localStorage-backed store. Writes are best-effort: a blocked storage (e.g.
/// private browsing quota) degrades to an in-memory-only session rather than
/// failing the login.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserSessionStore;

#[cfg(target_arch = "wasm32")]
impl BrowserSessionStore {
    pub fn new() -> Self {
        Self
    }

    fn get_item(key: &str) -> Option<String> {
        crate::utils::storage::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set_item(key: &str, value: &str) {
        if let Ok(storage) = crate::utils::storage::local_storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove_item(key: &str) {
        if let Ok(storage) = crate::utils::storage::local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserSessionStore {
    fn hydrate(&self) -> Option<Session> {
        let access = Self::get_item(ACCESS_TOKEN_KEY)?;
        let refresh = Self::get_item(REFRESH_TOKEN_KEY)?;
        let user = self.stored_user()?;
        Some(Session {
            access,
            refresh,
            user,
        })
    }

    fn persist(&self, session: &Session) {
        Self::set_item(ACCESS_TOKEN_KEY, &session.access);
        Self::set_item(REFRESH_TOKEN_KEY, &session.refresh);
        if let Ok(user_json) = serde_json::to_string(&session.user) {
            Self::set_item(USER_KEY, &user_json);
        }
    }

    fn access_token(&self) -> Option<String> {
        Self::get_item(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        Self::get_item(REFRESH_TOKEN_KEY)
    }

    fn stored_user(&self) -> Option<User> {
        let raw = Self::get_item(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    fn replace_access_token(&self, access: &str) {
        Self::set_item(ACCESS_TOKEN_KEY, access);
    }

    fn replace_refresh_token(&self, refresh: &str) {
        Self::set_item(REFRESH_TOKEN_KEY, refresh);
    }

    fn clear(&self) {
        Self::remove_item(ACCESS_TOKEN_KEY);
        Self::remove_item(REFRESH_TOKEN_KEY);
        Self::remove_item(USER_KEY);
    }
}

pub fn default_store() -> Rc<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(BrowserSessionStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(MemorySessionStore::new())
    }
}
