//! Per-visitor registration form sessions.
//!
//! Each visitor gets a random session id in a cookie; the form state behind
//! it (including an accepted payment proof) lives in an in-process moka cache
//! so a rejected file or a failed submit does not lose what was already
//! entered. Sessions expire after a period of inactivity.

use std::time::Duration;

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use moka::future::Cache;
use steamoff_core::RegistrationForm;
use uuid::Uuid;

/// Cookie carrying the form-session id.
pub const SESSION_COOKIE: &str = "sod_session";

/// Sessions idle for longer than this are dropped.
const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Cache budget in KiB. Entries are weighed by their payment proof size, so
/// this bounds memory rather than visitor count.
const SESSION_CAPACITY_KIB: u64 = 512 * 1024;

/// Type alias for the form-session store.
pub type SessionStore = Cache<String, RegistrationForm>;

/// Create a new session store with default settings.
pub fn new_store() -> SessionStore {
    Cache::builder()
        .max_capacity(SESSION_CAPACITY_KIB)
        .weigher(|_id: &String, form: &RegistrationForm| {
            let kib = form.proof().map_or(0, |p| p.len() / 1024);
            u32::try_from(kib).unwrap_or(u32::MAX).saturating_add(1)
        })
        .time_to_idle(SESSION_IDLE_TIMEOUT)
        .build()
}

/// A visitor's form together with the id it is stored under.
#[derive(Debug, Clone)]
pub struct FormSession {
    pub id: String,
    pub form: RegistrationForm,
}

impl FormSession {
    /// Look up the visitor's session, or start a fresh one.
    ///
    /// Cookie values that are not UUIDs are ignored rather than used as keys.
    pub async fn load(store: &SessionStore, jar: &CookieJar) -> Self {
        let existing = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok())
            .map(|id| id.to_string());

        if let Some(id) = existing {
            if let Some(form) = store.get(&id).await {
                tracing::debug!(session = %id, "form session resumed");
                return Self { id, form };
            }
            // Expired: keep the id so the cookie stays stable.
            return Self {
                id,
                form: RegistrationForm::default(),
            };
        }

        Self {
            id: Uuid::new_v4().to_string(),
            form: RegistrationForm::default(),
        }
    }

    /// Persist the form and return the jar with the session cookie set.
    pub async fn save(self, store: &SessionStore, jar: CookieJar) -> CookieJar {
        let cookie = session_cookie(&self.id);
        store.insert(self.id, self.form).await;
        jar.add(cookie)
    }
}

fn session_cookie(id: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use steamoff_core::Field;

    #[tokio::test]
    async fn test_new_visitor_gets_fresh_session() {
        let store = new_store();
        let session = FormSession::load(&store, &CookieJar::new()).await;
        assert!(Uuid::parse_str(&session.id).is_ok());
        assert_eq!(session.form, RegistrationForm::default());
    }

    #[tokio::test]
    async fn test_saved_session_is_resumed() {
        let store = new_store();
        let mut session = FormSession::load(&store, &CookieJar::new()).await;
        session.form.set_field(Field::FirstName, "Ama").unwrap();
        let id = session.id.clone();

        let jar = session.save(&store, CookieJar::new()).await;
        assert_eq!(jar.get(SESSION_COOKIE).unwrap().value(), id);

        let resumed = FormSession::load(&store, &jar).await;
        assert_eq!(resumed.id, id);
        assert_eq!(resumed.form.first_name, "Ama");
    }

    #[tokio::test]
    async fn test_garbage_cookie_is_ignored() {
        let store = new_store();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "../../etc/passwd"));
        let session = FormSession::load(&store, &jar).await;
        assert_ne!(session.id, "../../etc/passwd");
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[tokio::test]
    async fn test_unknown_id_keeps_cookie_value() {
        let store = new_store();
        let id = Uuid::new_v4().to_string();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, id.clone()));
        let session = FormSession::load(&store, &jar).await;
        assert_eq!(session.id, id);
        assert_eq!(session.form, RegistrationForm::default());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }
}
