//! Session extraction.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};

use weblog_core::domain::{Session, SessionToken};

/// The request's session, taken from `Authorization: Bearer <token>`.
///
/// Never rejects: a missing or malformed header is an anonymous session.
/// Handlers that need a user go through the workflow's route guard.
/// ```ignore
/// async fn dashboard(session: RequestSession) -> impl Responder { ... }
/// ```
#[derive(Debug, Clone)]
pub struct RequestSession(pub Session);

impl RequestSession {
    fn from_header(value: Option<&str>) -> Self {
        let session = value
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| Session::Authenticated(SessionToken::from(t)))
            .unwrap_or_default();
        Self(session)
    }
}

impl FromRequest for RequestSession {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        ready(Ok(Self::from_header(value)))
    }
}
