//! In-memory repositories used by service and handler tests.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDraft, OrderStatus};
use crate::domain::ports::{OrderRepository, UserRepository};
use crate::domain::user::User;

#[derive(Default)]
pub struct InMemoryOrderRepository {
    // Insertion order; listings walk it backwards to get newest first.
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Order>> {
        self.orders.lock().expect("order store poisoned")
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn create(&self, customer_id: Uuid, draft: &OrderDraft) -> Result<Order, DomainError> {
        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4(),
            customer_id,
            size: draft.size,
            status: OrderStatus::Pending,
            quantity: draft.quantity,
            created_at: now,
            updated_at: now,
        };
        self.lock().push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        Ok(self.lock().iter().find(|o| o.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.lock().iter().rev().cloned().collect())
    }

    fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .lock()
            .iter()
            .rev()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    fn save(&self, order: &Order) -> Result<Option<Order>, DomainError> {
        let mut orders = self.lock();
        let Some(stored) = orders.iter_mut().find(|o| o.id == order.id) else {
            return Ok(None);
        };
        stored.size = order.size;
        stored.status = order.status;
        stored.quantity = order.quantity;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut orders = self.lock();
        let before = orders.len();
        orders.retain(|o| o.id != id);
        Ok(orders.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Vec<User>,
}

impl InMemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}

pub fn user(username: &str, is_staff: bool) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        is_staff,
    }
}
