//! Session state and auth guard.
//!
//! The contract is three localStorage keys: `token`, `user` (JSON) and
//! `remembered_username`. Token presence is the sole liveness signal;
//! there is no client-side expiry tracking; the server's 401 is what ends
//! a session.
//!
//! Storage sits behind [`SessionStore`] so the guard tests natively with
//! [`MemoryStore`]; the browser implementation (feature `web`) wraps
//! gloo-storage.

use std::cell::Cell;
use std::rc::Rc;

use rem_api::models::User;
use rem_api::{ApiClient, AuthProvider, Transport};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const REMEMBERED_USERNAME_KEY: &str = "remembered_username";

/// Where unauthenticated users are sent.
pub const LOGIN_PAGE: &str = "login.html";

pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and native tools.
#[derive(Default)]
pub struct MemoryStore {
    values: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Browser localStorage store.
#[cfg(feature = "web")]
#[derive(Default)]
pub struct LocalStore;

#[cfg(feature = "web")]
impl SessionStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        use gloo_storage::Storage;
        let _ = gloo_storage::LocalStorage::set(key, value);
    }

    fn remove(&self, key: &str) {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::delete(key);
    }
}

/// Owns the token/user pair and the forced-logout path.
///
/// Cheap to clone; all clones share the store, navigator and the
/// redirected-once latch.
#[derive(Clone)]
pub struct SessionGuard {
    store: Rc<dyn SessionStore>,
    navigate: Rc<dyn Fn(&str)>,
    redirected: Rc<Cell<bool>>,
}

impl SessionGuard {
    pub fn new(store: Rc<dyn SessionStore>, navigate: Rc<dyn Fn(&str)>) -> Self {
        Self {
            store,
            navigate,
            redirected: Rc::new(Cell::new(false)),
        }
    }

    /// Guard wired to localStorage and `window.location`.
    #[cfg(feature = "web")]
    pub fn browser() -> Self {
        Self::new(
            Rc::new(LocalStore),
            Rc::new(|target: &str| {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(target);
                }
            }),
        )
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn current_user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist a fresh session and re-arm the forced-logout latch.
    pub fn store_session(&self, token: &str, user: &User) {
        self.store.set(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(json) => self.store.set(USER_KEY, &json),
            Err(e) => log::error!("failed to serialize user: {e}"),
        }
        self.redirected.set(false);
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    pub fn remember_username(&self, username: &str) {
        self.store.set(REMEMBERED_USERNAME_KEY, username);
    }

    pub fn forget_username(&self) {
        self.store.remove(REMEMBERED_USERNAME_KEY);
    }

    pub fn remembered_username(&self) -> Option<String> {
        self.store.get(REMEMBERED_USERNAME_KEY)
    }

    /// Redirect to login unless a session exists. Returns whether page
    /// initialization may continue.
    pub fn require_auth(&self) -> bool {
        if self.is_logged_in() {
            return true;
        }
        (self.navigate)(LOGIN_PAGE);
        false
    }

    /// Best-effort server invalidation, then unconditional local clear and
    /// redirect. A network failure is logged and ignored; logout must
    /// never be blocked.
    pub async fn logout<T: Transport>(&self, client: &ApiClient<T>) {
        if let Err(e) = rem_api::endpoints::auth::logout(client).await {
            log::warn!("server-side logout failed: {e}");
        }
        self.clear();
        (self.navigate)(LOGIN_PAGE);
    }
}

impl AuthProvider for SessionGuard {
    fn token(&self) -> Option<String> {
        SessionGuard::token(self)
    }

    /// Forced logout on envelope 401: clear once, redirect once. Repeated
    /// 401s from parallel in-flight calls hit the latch and do nothing.
    fn handle_unauthorized(&self) {
        if self.redirected.replace(true) {
            return;
        }
        self.clear();
        (self.navigate)(LOGIN_PAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn guard_with_log() -> (SessionGuard, Rc<RefCell<Vec<String>>>) {
        let visited: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = visited.clone();
        let guard = SessionGuard::new(
            Rc::new(MemoryStore::new()),
            Rc::new(move |target: &str| sink.borrow_mut().push(target.to_string())),
        );
        (guard, visited)
    }

    fn user() -> User {
        User {
            id: 7,
            username: "zhang_wei".to_string(),
            nickname: Some("小张".to_string()),
            vip_level: Some(1),
        }
    }

    #[test]
    fn token_presence_is_the_liveness_signal() {
        let (guard, _) = guard_with_log();
        assert!(!guard.is_logged_in());
        guard.store_session("t0k3n", &user());
        assert!(guard.is_logged_in());
        assert_eq!(guard.current_user().unwrap().username, "zhang_wei");
        guard.clear();
        assert!(!guard.is_logged_in());
        assert_eq!(guard.current_user(), None);
    }

    #[test]
    fn require_auth_redirects_exactly_when_logged_out() {
        let (guard, visited) = guard_with_log();
        assert!(!guard.require_auth());
        assert_eq!(visited.borrow().as_slice(), [LOGIN_PAGE]);

        guard.store_session("t", &user());
        assert!(guard.require_auth());
        assert_eq!(visited.borrow().len(), 1, "no redirect when logged in");
    }

    #[test]
    fn repeated_unauthorized_redirects_once() {
        let (guard, visited) = guard_with_log();
        guard.store_session("stale", &user());

        guard.handle_unauthorized();
        guard.handle_unauthorized();
        guard.handle_unauthorized();

        assert!(!guard.is_logged_in(), "session cleared");
        assert_eq!(visited.borrow().len(), 1, "single redirect for a burst of 401s");
    }

    #[test]
    fn new_session_rearms_the_unauthorized_latch() {
        let (guard, visited) = guard_with_log();
        guard.store_session("a", &user());
        guard.handle_unauthorized();
        guard.store_session("b", &user());
        guard.handle_unauthorized();
        assert_eq!(visited.borrow().len(), 2);
    }

    #[test]
    fn remembered_username_survives_session_clear() {
        let (guard, _) = guard_with_log();
        guard.remember_username("zhang_wei");
        guard.store_session("t", &user());
        guard.clear();
        assert_eq!(guard.remembered_username().as_deref(), Some("zhang_wei"));
        guard.forget_username();
        assert_eq!(guard.remembered_username(), None);
    }

    #[test]
    fn empty_token_counts_as_logged_out() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "");
        let guard = SessionGuard::new(Rc::new(store), Rc::new(|_: &str| {}));
        assert!(!guard.is_logged_in());
    }
}
