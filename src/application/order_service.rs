use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{Access, Credentials, Policy};
use crate::domain::errors::DomainError;
use crate::domain::order::Order;
use crate::domain::ports::{OrderRepository, PayloadValidator, UserRepository};
use crate::domain::user::User;
use crate::domain::validation::parse_body;

/// The order operations exposed over HTTP.
///
/// Every operation follows the same shape: authorize the caller, resolve the
/// target order (or fail with not-found), decode and validate the raw body
/// (or fail with a parse error or field errors), then apply a single
/// repository call. Nothing is written
/// unless every preceding step succeeded.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    users: Arc<dyn UserRepository>,
    validator: Arc<dyn PayloadValidator>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        users: Arc<dyn UserRepository>,
        validator: Arc<dyn PayloadValidator>,
    ) -> Self {
        Self {
            orders,
            users,
            validator,
        }
    }

    pub fn list_orders(&self, credentials: Credentials) -> Result<Vec<Order>, DomainError> {
        self.authorize(Policy::AuthenticatedOrReadOnly, Access::Read, credentials)?;
        self.orders.list()
    }

    /// The new order always belongs to the caller and starts out `PENDING`.
    pub fn create_order(
        &self,
        credentials: Credentials,
        body: &[u8],
    ) -> Result<Order, DomainError> {
        let caller = self
            .authorize(Policy::AuthenticatedOrReadOnly, Access::Write, credentials)?
            .ok_or(DomainError::NotAuthenticated)?;
        let draft = self.validator.order_draft(&parse_body(body)?)?;

        let order = self.orders.create(caller.id, &draft)?;
        log::info!("Order {} created by user {}", order.id, caller.id);
        Ok(order)
    }

    pub fn get_order(&self, credentials: Credentials, id: Uuid) -> Result<Order, DomainError> {
        self.authorize(Policy::AdminOnly, Access::Read, credentials)?;
        self.order_or_not_found(id)
    }

    pub fn replace_order(
        &self,
        credentials: Credentials,
        id: Uuid,
        body: &[u8],
    ) -> Result<Order, DomainError> {
        self.authorize(Policy::AdminOnly, Access::Write, credentials)?;
        let mut order = self.order_or_not_found(id)?;
        let replacement = self.validator.order_replacement(&parse_body(body)?)?;

        order.replace_with(&replacement);
        let saved = self.save(&order)?;
        log::info!("Order {} replaced", saved.id);
        Ok(saved)
    }

    pub fn delete_order(&self, credentials: Credentials, id: Uuid) -> Result<(), DomainError> {
        self.authorize(Policy::AdminOnly, Access::Write, credentials)?;

        if !self.orders.delete(id)? {
            return Err(DomainError::OrderNotFound(id));
        }
        log::info!("Order {} deleted", id);
        Ok(())
    }

    /// Overwrites the status only; any status may replace any other.
    pub fn update_status(
        &self,
        credentials: Credentials,
        id: Uuid,
        body: &[u8],
    ) -> Result<Order, DomainError> {
        self.authorize(Policy::AdminOnly, Access::Write, credentials)?;
        let mut order = self.order_or_not_found(id)?;
        let change = self.validator.status_change(&parse_body(body)?)?;

        let previous = order.status;
        order.apply_status(&change);
        let saved = self.save(&order)?;
        log::info!(
            "Order {} status changed from {} to {}",
            saved.id,
            previous,
            saved.status
        );
        Ok(saved)
    }

    /// No ownership check against the caller: any caller may list any user's
    /// orders.
    pub fn list_user_orders(
        &self,
        credentials: Credentials,
        user_id: Uuid,
    ) -> Result<Vec<Order>, DomainError> {
        self.authorize(Policy::AllowAny, Access::Read, credentials)?;
        let user = self.user_or_not_found(user_id)?;
        self.orders.list_by_customer(user.id)
    }

    pub fn get_user_order(
        &self,
        credentials: Credentials,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<Order, DomainError> {
        self.authorize(Policy::AllowAny, Access::Read, credentials)?;
        let user = self.user_or_not_found(user_id)?;

        self.orders
            .find_by_id(order_id)?
            .filter(|order| order.customer_id == user.id)
            .ok_or(DomainError::OrderNotFound(order_id))
    }

    /// Resolves the caller and applies `policy`. Credentials naming an unknown
    /// user count as anonymous. The user store is not consulted when the policy
    /// already admits anonymous callers.
    fn authorize(
        &self,
        policy: Policy,
        access: Access,
        credentials: Credentials,
    ) -> Result<Option<User>, DomainError> {
        if policy.check(access, None).is_ok() {
            return Ok(None);
        }

        let caller = match credentials.user_id() {
            Some(id) => self.users.find_by_id(id)?,
            None => None,
        };

        if let Err(e) = policy.check(access, caller.as_ref()) {
            log::warn!(
                "Denied {:?} access under {:?} for caller {:?}: {}",
                access,
                policy,
                credentials.user_id(),
                e
            );
            return Err(e);
        }
        Ok(caller)
    }

    fn order_or_not_found(&self, id: Uuid) -> Result<Order, DomainError> {
        self.orders
            .find_by_id(id)?
            .ok_or(DomainError::OrderNotFound(id))
    }

    fn user_or_not_found(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)?
            .ok_or(DomainError::UserNotFound(id))
    }

    // Last write wins; the order may have been deleted since it was read.
    fn save(&self, order: &Order) -> Result<Order, DomainError> {
        self.orders
            .save(order)?
            .ok_or(DomainError::OrderNotFound(order.id))
    }
}
