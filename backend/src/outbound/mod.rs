//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only persistence exists today: PostgreSQL-backed repositories using
//! Diesel. Adapters translate between domain types and rows and contain no
//! business logic.

pub mod persistence;
