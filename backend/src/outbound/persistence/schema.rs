//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. Orders use the normalized form: `order_items` joins `orders`
//! and `products`, capturing quantity and unit price at order time.

diesel::table! {
    /// User accounts table.
    ///
    /// `username` and `email` carry unique constraints
    /// (`users_username_key`, `users_email_key`).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique username.
        username -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Postal addresses, each owned by exactly one user.
    addresses (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Street line.
        street -> Varchar,
        /// City name.
        city -> Varchar,
        /// Optional state or region.
        state -> Nullable<Varchar>,
        /// Optional postal code.
        zip_code -> Nullable<Varchar>,
        /// Country name.
        country -> Varchar,
        /// Whether this is the user's primary address.
        is_primary -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalog products, independent of any order.
    products (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Product name (max 100 characters).
        #[max_length = 100]
        name -> Varchar,
        /// Product description.
        description -> Text,
        /// Current catalog price.
        price -> Float8,
        /// Units in stock.
        stock_quantity -> Int4,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Orders placed by users.
    orders (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Ordering user.
        user_id -> Uuid,
        /// Shipping address.
        address_id -> Uuid,
        /// Total amount charged.
        total_amount -> Float8,
        /// Open-set status string (max 20 characters).
        #[max_length = 20]
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Line items joining orders to products.
    order_items (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Parent order.
        order_id -> Uuid,
        /// Referenced catalog product.
        product_id -> Uuid,
        /// Units ordered.
        quantity -> Int4,
        /// Unit price captured at order time.
        price -> Float8,
    }
}

diesel::joinable!(addresses -> users (user_id));
diesel::joinable!(orders -> users (user_id));
diesel::joinable!(orders -> addresses (address_id));
diesel::joinable!(order_items -> orders (order_id));
diesel::joinable!(order_items -> products (product_id));

diesel::allow_tables_to_appear_in_same_query!(users, addresses, products, orders, order_items,);
