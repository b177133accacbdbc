//! Axum extractors for the HTTP shell

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::{Form, Json};

use super::handlers::{SubmitForm, SubmitRequest};
use crate::core::Session;
use crate::core::error::{BilledError, RequestError};

/// Header carrying the session object
pub const SESSION_HEADER: &str = "x-user";

/// Session sent with the request, if any
///
/// The browser side forwards the `user` object it stored at login. A
/// missing header means no session; a header that does not parse is a bad
/// request.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    pub fn get(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = BilledError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(SESSION_HEADER) else {
            return Ok(CurrentSession(None));
        };

        let raw = value
            .to_str()
            .map_err(|e| RequestError::InvalidSessionHeader(e.to_string()))?;
        let session = Session::from_json(raw)
            .map_err(|e| RequestError::InvalidSessionHeader(e.to_string()))?;

        Ok(CurrentSession(Some(session)))
    }
}

/// New-bill submission, posted either as JSON or as the page's url-encoded form
#[derive(Debug)]
pub struct SubmitBody(pub SubmitRequest);

impl<S> FromRequest<S> for SubmitBody
where
    S: Send + Sync,
{
    type Rejection = BilledError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let url_encoded = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if url_encoded {
            let Form(form): Form<SubmitForm> = Form::from_request(req, state)
                .await
                .map_err(|e| RequestError::InvalidBody(e.body_text()))?;
            return Ok(SubmitBody(form.into()));
        }

        let Json(request): Json<SubmitRequest> = Json::from_request(req, state)
            .await
            .map_err(|e| RequestError::InvalidBody(e.body_text()))?;
        Ok(SubmitBody(request))
    }
}
