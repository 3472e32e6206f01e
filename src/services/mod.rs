//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the storefront's business rules so route handlers can
//! stay focused on request parsing, session lookup, and status codes.
//! `storefront` composes the rest into the per-session state owner.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod filter;
pub mod money;
pub mod notify;
pub mod profile;
pub mod remote;
pub mod storefront;
pub mod sweeper;
