use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Store-assigned order identifier.
pub type OrderId = i64;

/// Lifecycle label of an order.
///
/// The label is free-form: any string may replace any other. The labels the
/// front ends know about are listed in [`OrderStatus::KNOWN`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    pub const PENDING: &'static str = "pending";
    pub const KNOWN: [&'static str; 5] = ["pending", "picked_up", "in_progress", "done", "delivered"];

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderStatus {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        Self(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub services: Vec<String>,
    pub item_count: i32,
    pub pickup_method: String,
    pub pickup_address: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Customer-facing view without contact or address details.
    pub fn tracking(&self) -> OrderTracking {
        OrderTracking {
            id: self.id,
            status: self.status.clone(),
            full_name: self.full_name.clone(),
            services: self.services.clone(),
            item_count: self.item_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Order as submitted by a client, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderSubmission {
    #[validate(length(min = 1, message = "full_name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "phone_number is required"))]
    pub phone_number: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "at least one service is required"))]
    pub services: Vec<String>,
    #[validate(range(min = 1, message = "item_count must be at least 1"))]
    pub item_count: i32,
    #[validate(length(min = 1, message = "pickup_method is required"))]
    pub pickup_method: String,
    #[serde(default)]
    pub pickup_address: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

impl OrderSubmission {
    /// Validates the submission and stamps it as a fresh `pending` order.
    pub fn into_new_order(self) -> Result<NewOrder, ValidationErrors> {
        self.validate()?;
        // Millisecond precision survives every supported store unchanged.
        let now = Utc::now().trunc_subsecs(3);
        Ok(NewOrder {
            status: OrderStatus::pending(),
            full_name: self.full_name,
            phone_number: self.phone_number,
            email: self.email,
            services: self.services,
            item_count: self.item_count,
            pickup_method: self.pickup_method,
            pickup_address: non_blank(self.pickup_address),
            additional_notes: non_blank(self.additional_notes),
            created_at: now,
            updated_at: now,
        })
    }
}

/// A validated order waiting for the store to assign its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub status: OrderStatus,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub services: Vec<String>,
    pub item_count: i32,
    pub pickup_method: String,
    pub pickup_address: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewOrder {
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            status: self.status,
            full_name: self.full_name,
            phone_number: self.phone_number,
            email: self.email,
            services: self.services,
            item_count: self.item_count,
            pickup_method: self.pickup_method,
            pickup_address: self.pickup_address,
            additional_notes: self.additional_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Tracking projection returned to customers checking on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderTracking {
    pub id: OrderId,
    pub status: OrderStatus,
    pub full_name: String,
    pub services: Vec<String>,
    pub item_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
