use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_COOKIE: &str = "sessionId";
const SESSION_MAX_AGE: Duration = Duration::days(7);

/// Session token read from the `sessionId` cookie. Rejects with 401 when absent.
#[derive(Debug, Clone)]
pub struct SessionId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        match current(&jar) {
            Some(id) => Ok(SessionId(id)),
            None => {
                warn!(uri = %parts.uri, "missing session cookie");
                Err(AppError::MissingSession)
            }
        }
    }
}

fn current(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

/// Returns the session carried by `jar`, minting a new one only when none exists.
/// A minted token is added to the jar so it is sent back as `Set-Cookie`.
pub fn provision(jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = current(&jar) {
        return (jar, id);
    }
    let id = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, id.clone()))
        .path("/")
        .max_age(SESSION_MAX_AGE);
    debug!(session_id = %id, "session provisioned");
    (jar.add(cookie), id)
}
