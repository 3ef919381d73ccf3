use uuid::Uuid;

/// A user as seen by the order service. Users are managed elsewhere; only
/// their identity and staff flag are read here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub is_staff: bool,
}
