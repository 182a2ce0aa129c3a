//! Router/Guard - session-aware navigation resolution
//!
//! The navigator starts in `Loading`, consults the session store once and
//! lands in `Unauthenticated` or `Authenticated`. Every navigation is then
//! resolved statelessly against the access policy: no session redirects to
//! login, a role without permission redirects to the unauthorized notice,
//! unknown paths fall back to a default route chosen by session presence.

use crate::policy;
use crate::session::{SessionEvent, SessionStore};
use shared::client::UserInfo;
use std::sync::Arc;

/// Application auth state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Session store not consulted yet
    Loading,
    /// No session present
    Unauthenticated,
    /// Session present; role checks happen per navigation
    Authenticated { user: UserInfo },
}

/// Outcome of resolving a navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested path
    Render(String),
    /// No session: go to the login screen
    RedirectLogin,
    /// Session present but role not permitted: go to the unauthorized notice
    RedirectUnauthorized,
    /// Unknown path: go to the default route for the current session state
    Redirect(&'static str),
}

/// Route guard over an injected session store
#[derive(Debug)]
pub struct Navigator {
    store: Arc<SessionStore>,
    state: AppState,
}

impl Navigator {
    /// Create a navigator in `Loading`; call [`start`](Self::start) next
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self {
            store,
            state: AppState::Loading,
        }
    }

    /// Consult the session store and leave `Loading`.
    ///
    /// Runs once at application start and again on every external login
    /// event (see [`handle_event`](Self::handle_event)).
    pub fn start(&mut self) {
        self.state = match self.store.load() {
            Some(session) => {
                tracing::debug!(user = %session.user.name, "session restored");
                AppState::Authenticated { user: session.user }
            }
            None => AppState::Unauthenticated,
        };
    }

    /// React to a session store notification
    pub fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LoggedIn => self.start(),
            SessionEvent::LoggedOut => self.state = AppState::Unauthenticated,
        }
    }

    /// Current auth state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The authenticated user, if any
    pub fn current_user(&self) -> Option<&UserInfo> {
        match &self.state {
            AppState::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    /// Resolve a navigation to `path`.
    ///
    /// Public paths always render. Otherwise: no session redirects to
    /// login; a known path renders only when the user's role is permitted;
    /// unknown paths redirect to the dashboard (authenticated) or login.
    pub fn resolve(&self, path: &str) -> Navigation {
        if policy::is_public(path) {
            return Navigation::Render(path.to_string());
        }

        let user = match &self.state {
            AppState::Authenticated { user } => user,
            // Loading counts as "no session": start() runs before the first
            // real navigation, so this only covers early deep links.
            _ => return Navigation::RedirectLogin,
        };

        if !policy::is_known_route(path) {
            return Navigation::Redirect(policy::DASHBOARD_PATH);
        }

        if policy::permitted_roles(path).contains(&user.role) {
            Navigation::Render(path.to_string())
        } else {
            tracing::debug!(path, role = %user.role, "navigation denied");
            Navigation::RedirectUnauthorized
        }
    }

    /// Log out: clear the store and drop to `Unauthenticated` synchronously
    pub fn logout(&mut self) {
        self.store.clear();
        self.state = AppState::Unauthenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use shared::models::Role;
    use tempfile::TempDir;

    fn store_with_session(role: Role) -> (TempDir, Arc<SessionStore>) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        store
            .save(&Session {
                token: "tok".to_string(),
                user: UserInfo {
                    id: "1".to_string(),
                    name: "Alice Wong".to_string(),
                    role,
                },
            })
            .unwrap();
        (dir, Arc::new(store))
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        let dir = TempDir::new().unwrap();
        let mut nav = Navigator::new(Arc::new(SessionStore::new(dir.path())));
        nav.start();
        assert_eq!(nav.state(), &AppState::Unauthenticated);
        assert_eq!(nav.resolve("/dashboard"), Navigation::RedirectLogin);
        assert_eq!(nav.resolve("/nowhere"), Navigation::RedirectLogin);
    }

    #[test]
    fn test_renders_iff_role_is_permitted() {
        for role in Role::ALL {
            let (_dir, store) = store_with_session(role);
            let mut nav = Navigator::new(store);
            nav.start();

            for path in ["/dashboard", "/leave-records", "/leave-requests", "/payroll"] {
                let permitted = crate::policy::permitted_roles(path).contains(&role);
                let resolved = nav.resolve(path);
                if permitted {
                    assert_eq!(resolved, Navigation::Render(path.to_string()));
                } else {
                    assert_eq!(resolved, Navigation::RedirectUnauthorized);
                }
            }
        }
    }

    #[test]
    fn test_public_paths_render_without_session() {
        let dir = TempDir::new().unwrap();
        let mut nav = Navigator::new(Arc::new(SessionStore::new(dir.path())));
        nav.start();
        assert_eq!(nav.resolve("/login"), Navigation::Render("/login".to_string()));
        assert_eq!(
            nav.resolve("/unauthorized"),
            Navigation::Render("/unauthorized".to_string())
        );
    }

    #[test]
    fn test_unknown_path_defaults_to_dashboard_when_authenticated() {
        let (_dir, store) = store_with_session(Role::Employee);
        let mut nav = Navigator::new(store);
        nav.start();
        assert_eq!(nav.resolve("/nowhere"), Navigation::Redirect("/dashboard"));
    }

    #[test]
    fn test_logout_clears_store_and_state() {
        let (_dir, store) = store_with_session(Role::Admin);
        let mut nav = Navigator::new(store.clone());
        nav.start();
        assert!(nav.current_user().is_some());

        nav.logout();
        assert_eq!(nav.state(), &AppState::Unauthenticated);
        assert_eq!(nav.resolve("/dashboard"), Navigation::RedirectLogin);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_login_event_reloads_the_session() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::new(dir.path()));
        let mut nav = Navigator::new(store.clone());
        nav.start();
        assert_eq!(nav.state(), &AppState::Unauthenticated);

        store
            .save(&Session {
                token: "tok".to_string(),
                user: UserInfo {
                    id: "9".to_string(),
                    name: "Binh Tran".to_string(),
                    role: Role::Manager,
                },
            })
            .unwrap();

        nav.handle_event(SessionEvent::LoggedIn);
        assert_eq!(nav.current_user().unwrap().name, "Binh Tran");
    }
}
