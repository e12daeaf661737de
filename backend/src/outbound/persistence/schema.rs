//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Users keyed by identity provider subject.
    users (id) {
        id -> Int8,
        external_uid -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Light controllers. `user_id` is null while unpaired.
    devices (id) {
        id -> Int8,
        external_uid -> Text,
        user_id -> Nullable<Int8>,
        pattern_id -> Nullable<Int8>,
        light_layout -> Nullable<Jsonb>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Opaque light-show payloads owned by a user.
    patterns (id) {
        id -> Int8,
        user_id -> Int8,
        content -> Bytea,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pattern runs requested for a device.
    scheduled_patterns (id) {
        id -> Int8,
        device_id -> Int8,
        pattern_id -> Int8,
        scheduled_for -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(patterns -> users (user_id));
diesel::joinable!(scheduled_patterns -> devices (device_id));
diesel::joinable!(scheduled_patterns -> patterns (pattern_id));

diesel::allow_tables_to_appear_in_same_query!(users, devices, patterns, scheduled_patterns);
