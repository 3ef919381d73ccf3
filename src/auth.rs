//! Caller identification and permission policies.
//!
//! Authentication happens upstream: the gateway in front of this service
//! forwards the authenticated user's id in the `X-User-Id` header. A missing
//! or malformed header makes the caller anonymous.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::user::User;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Identity claimed by the request, not yet resolved against the user store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Credentials {
    user_id: Option<Uuid>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    fn from_header(value: Option<&str>) -> Self {
        Self {
            user_id: value.and_then(|v| Uuid::parse_str(v.trim()).ok()),
        }
    }
}

impl FromRequest for Credentials {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok());
        ready(Ok(Credentials::from_header(header)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    AllowAny,
    /// Reads are open to everyone, writes need an authenticated caller.
    AuthenticatedOrReadOnly,
    /// Staff only, for both reads and writes.
    AdminOnly,
}

impl Policy {
    pub fn check(self, access: Access, caller: Option<&User>) -> Result<(), DomainError> {
        match (self, caller) {
            (Policy::AllowAny, _) => Ok(()),
            (Policy::AuthenticatedOrReadOnly, _) if access == Access::Read => Ok(()),
            (_, None) => Err(DomainError::NotAuthenticated),
            (Policy::AuthenticatedOrReadOnly, Some(_)) => Ok(()),
            (Policy::AdminOnly, Some(user)) if user.is_staff => Ok(()),
            (Policy::AdminOnly, Some(_)) => Err(DomainError::PermissionDenied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn user(is_staff: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            is_staff,
        }
    }

    #[actix_web::test]
    async fn credentials_read_user_id_header() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, id.to_string()))
            .to_http_request();

        let credentials = Credentials::extract(&req).await.unwrap();

        assert_eq!(credentials.user_id(), Some(id));
    }

    #[actix_web::test]
    async fn malformed_header_is_anonymous() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "not-a-uuid"))
            .to_http_request();

        let credentials = Credentials::extract(&req).await.unwrap();

        assert_eq!(credentials, Credentials::anonymous());
    }

    #[test]
    fn allow_any_admits_anonymous_writes() {
        assert!(Policy::AllowAny.check(Access::Write, None).is_ok());
    }

    #[test]
    fn read_only_policy_admits_anonymous_reads() {
        assert!(Policy::AuthenticatedOrReadOnly
            .check(Access::Read, None)
            .is_ok());
    }

    #[test]
    fn read_only_policy_rejects_anonymous_writes() {
        let err = Policy::AuthenticatedOrReadOnly
            .check(Access::Write, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotAuthenticated));
    }

    #[test]
    fn read_only_policy_admits_any_user_writes() {
        assert!(Policy::AuthenticatedOrReadOnly
            .check(Access::Write, Some(&user(false)))
            .is_ok());
    }

    #[test]
    fn admin_only_distinguishes_anonymous_from_non_staff() {
        assert!(matches!(
            Policy::AdminOnly.check(Access::Read, None),
            Err(DomainError::NotAuthenticated)
        ));
        assert!(matches!(
            Policy::AdminOnly.check(Access::Read, Some(&user(false))),
            Err(DomainError::PermissionDenied)
        ));
        assert!(Policy::AdminOnly
            .check(Access::Write, Some(&user(true)))
            .is_ok());
    }
}
