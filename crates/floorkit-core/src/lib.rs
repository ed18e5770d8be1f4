//! # FloorKit Core
//!
//! Core types shared by the FloorKit crates.
//! Provides plane geometry, the common error type and the typed
//! notification channels the floor editor publishes on.

pub mod error;
pub mod event_bus;
pub mod geometry;

pub use error::{Error, Result};

pub use event_bus::{Channel, ChannelConfig, EditorEvents, SubscriptionId};

pub use geometry::{Bounds, Point, Size};
