use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl OrderSize {
    pub const ALL: [OrderSize; 4] = [
        OrderSize::Small,
        OrderSize::Medium,
        OrderSize::Large,
        OrderSize::ExtraLarge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderSize::Small => "SMALL",
            OrderSize::Medium => "MEDIUM",
            OrderSize::Large => "LARGE",
            OrderSize::ExtraLarge => "EXTRA_LARGE",
        }
    }
}

impl FromStr for OrderSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "order size",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for OrderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fulfillment state of an order. Any state may be overwritten by any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::InTransit => "IN_TRANSIT",
            OrderStatus::Delivered => "DELIVERED",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "order status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub size: OrderSize,
    pub status: OrderStatus,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Overwrite every client-writable field. Identity, owner and timestamps
    /// are left to the repository.
    pub fn replace_with(&mut self, replacement: &OrderReplacement) {
        self.size = replacement.size;
        self.quantity = replacement.quantity;
        self.status = replacement.status;
    }

    pub fn apply_status(&mut self, change: &StatusChange) {
        self.status = change.status;
    }
}

/// Validated body of an order creation request. New orders always start out
/// `PENDING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub size: OrderSize,
    pub quantity: i32,
}

/// Validated body of a full order replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReplacement {
    pub size: OrderSize,
    pub quantity: i32,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: OrderStatus,
}
