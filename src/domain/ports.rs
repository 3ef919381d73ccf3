use serde_json::Value;
use uuid::Uuid;

use super::errors::DomainError;
use super::order::{Order, OrderDraft, OrderReplacement, StatusChange};
use super::user::User;
use super::validation::ValidationErrors;

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, customer_id: Uuid, draft: &OrderDraft) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    /// All orders, newest first.
    fn list(&self) -> Result<Vec<Order>, DomainError>;
    /// Orders owned by `customer_id`, newest first.
    fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError>;
    /// Persist the mutable fields of `order` and refresh `updated_at`.
    /// Returns `None` when the order no longer exists.
    fn save(&self, order: &Order) -> Result<Option<Order>, DomainError>;
    /// Returns `false` when there was nothing to delete.
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
}

pub trait PayloadValidator: Send + Sync + 'static {
    fn order_draft(&self, raw: &Value) -> Result<OrderDraft, ValidationErrors>;
    fn order_replacement(&self, raw: &Value) -> Result<OrderReplacement, ValidationErrors>;
    fn status_change(&self, raw: &Value) -> Result<StatusChange, ValidationErrors>;
}
