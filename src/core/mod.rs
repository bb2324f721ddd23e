//! Synchronous rules over in-memory snapshots. Nothing in here touches the
//! store, the session registry or the clock; callers pass those in.

pub mod auth;
pub mod cart;
pub mod dashboard;
pub mod directory;
pub mod inventory;
pub mod notification;
pub mod orders;
pub mod visibility;
