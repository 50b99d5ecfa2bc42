//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` against a migrated database after changing a
//! migration.

diesel::table! {
    /// Registered members.
    users (id) {
        id -> Int4,
        /// Login from the identity provider; unique (`users_login_key`).
        login -> Varchar,
        /// Linked NFC card; unique when present (`users_uid_key`).
        uid -> Nullable<Varchar>,
        wallet -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Device roles such as `cleaning`; `name` is unique.
    roles (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Physical locations; `name` is unique.
    locations (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// NFC readers.
    devices (id) {
        id -> Int4,
        /// Hardware address; unique (`devices_mac_key`).
        mac -> Varchar,
        role_id -> Int4,
        location_id -> Int4,
    }
}

diesel::table! {
    /// Dated assignments.
    ///
    /// `(user_id, date)` is unique through the deferrable constraint
    /// `shifts_user_id_date_key`.
    shifts (id) {
        id -> Int4,
        date -> Date,
        user_id -> Int4,
    }
}

diesel::table! {
    /// Append-only tap log.
    activities (id) {
        id -> Int8,
        user_id -> Int4,
        device_id -> Int4,
        /// Unix seconds.
        created_at -> Int8,
    }
}

diesel::joinable!(activities -> devices (device_id));
diesel::joinable!(activities -> users (user_id));
diesel::joinable!(devices -> locations (location_id));
diesel::joinable!(devices -> roles (role_id));
diesel::joinable!(shifts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    activities, devices, locations, roles, shifts, users,
);
