//! Caller identity extraction.
//!
//! Authentication happens upstream. The gateway forwards the authenticated
//! user id in the `X-User-Id` header; a missing or blank header means the
//! request is anonymous.
//!
//! ```ignore
//! async fn my_handler(Caller(user): Caller) -> impl IntoResponse {
//!     match user {
//!         Some(u) => format!("Hello, {}!", u),
//!         None => "Hello, guest!".to_string(),
//!     }
//! }
//! ```

use axum::http::request::Parts;

use crate::domain::foundation::UserId;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the optional caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<UserId>);

impl Caller {
    fn from_parts(parts: &Parts) -> Self {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .and_then(|s| UserId::new(s).ok());
        Caller(user)
    }
}

impl<S> axum::extract::FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move { Ok(Caller::from_parts(parts)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/events");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_becomes_user_id() {
        let caller = Caller::from_parts(&parts_with(Some("user-42")));
        assert_eq!(caller, Caller(Some(UserId::new("user-42").unwrap())));
    }

    #[test]
    fn missing_header_is_anonymous() {
        assert_eq!(Caller::from_parts(&parts_with(None)), Caller(None));
    }

    #[test]
    fn blank_header_is_anonymous() {
        assert_eq!(Caller::from_parts(&parts_with(Some("   "))), Caller(None));
    }
}
