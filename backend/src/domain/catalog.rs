//! Modeled-but-unexposed entities: addresses, products, orders, line items.
//!
//! These types back the relational schema (see `outbound::persistence::schema`)
//! but carry no HTTP surface. They use the normalized order form: a
//! [`Product`] is a catalog entity independent of any order, and an
//! [`OrderItem`] joins an order to a product while capturing quantity and the
//! price as of order time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Postal address belonging to exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// Stable generated identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Street line.
    pub street: String,
    /// City name.
    pub city: String,
    /// Optional state or region.
    pub state: Option<String>,
    /// Optional postal code.
    pub zip_code: Option<String>,
    /// Country name.
    pub country: String,
    /// Whether this is the user's primary address.
    pub is_primary: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Address {
    /// Create an address for a user. New addresses are never primary until
    /// promoted explicitly.
    pub fn new(user_id: Uuid, street: String, city: String, country: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            street,
            city,
            state: None,
            zip_code: None,
            country,
            is_primary: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Catalog product independent of any order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable generated identifier.
    pub id: Uuid,
    /// Product name.
    pub name: String,
    /// Product description.
    pub description: String,
    /// Current catalog price.
    pub price: f64,
    /// Units in stock.
    pub stock_quantity: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a catalog product with an empty stock level.
    pub fn new(name: String, description: String, price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            price,
            stock_quantity: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Order status drawn from an open string set.
///
/// Observed values include `pending`, `processing`, `shipped`, `delivered`,
/// and `completed`, but any string is accepted; there is no enforced
/// enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStatus(String);

impl OrderStatus {
    /// Status assigned to orders at creation.
    pub const PENDING: &'static str = "pending";

    /// Wrap an arbitrary status string.
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    /// Initial status for new orders.
    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }
}

impl AsRef<str> for OrderStatus {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Order placed by a user, shipped to one of their addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Stable generated identifier.
    pub id: Uuid,
    /// Ordering user.
    pub user_id: Uuid,
    /// Shipping address.
    pub address_id: Uuid,
    /// Total amount charged for the order.
    pub total_amount: f64,
    /// Current status.
    pub status: OrderStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order totalling the given line items.
    pub fn from_items(user_id: Uuid, address_id: Uuid, items: &[OrderItem]) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            address_id,
            total_amount: items.iter().map(OrderItem::line_total).sum(),
            status: OrderStatus::pending(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Line item joining an order to a product.
///
/// `price` is the unit price at order time; it may diverge from the
/// product's current catalog price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Stable generated identifier.
    pub id: Uuid,
    /// Parent order.
    pub order_id: Uuid,
    /// Referenced catalog product.
    pub product_id: Uuid,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price captured at order time.
    pub price: f64,
}

impl OrderItem {
    /// Capture a product's price for an order line.
    pub fn capture(order_id: Uuid, product: &Product, quantity: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id: product.id,
            quantity,
            price: product.price,
        }
    }

    /// Quantity times price-at-order-time.
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}
