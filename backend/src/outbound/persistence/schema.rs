//! Diesel schema definitions for the restock coordination tables.
//!
//! Mirrors the SQL migrations under `migrations/`. The partial unique index
//! on `restock_subscriptions` (active rows only) cannot be expressed in the
//! `table!` DSL and lives solely in the migration.

diesel::table! {
    products (id) {
        id -> Uuid,
        name -> Varchar,
        stock -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        admin -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    restock_votes (id) {
        id -> Uuid,
        product_id -> Uuid,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    restock_subscriptions (id) {
        id -> Uuid,
        product_id -> Uuid,
        user_id -> Uuid,
        delivered -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        kind -> Varchar,
        body -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(restock_votes -> products (product_id));
diesel::joinable!(restock_votes -> users (user_id));
diesel::joinable!(restock_subscriptions -> products (product_id));
diesel::joinable!(restock_subscriptions -> users (user_id));
diesel::joinable!(notifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    products,
    users,
    restock_votes,
    restock_subscriptions,
    notifications,
);
