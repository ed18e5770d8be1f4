//! # Event Bus Module
//!
//! Typed notification channels for decoupled communication between the
//! floor editor and the UI collaborators that observe it.
//!
//! ## Overview
//!
//! Each event kind has its own [`Channel`] with a fixed payload type:
//! - `selection-changed`: `Option<String>` (ref of the selected table)
//! - `dirty-changed`: `bool`
//! - `table-deleted`: `String` (ref of the removed table)
//!
//! ## Usage
//!
//! ```rust
//! use floorkit_core::event_bus::EditorEvents;
//!
//! let events = EditorEvents::new();
//! let sub = events.dirty_changed.subscribe(|dirty| {
//!     println!("unsaved changes: {dirty}");
//! });
//!
//! events.dirty_changed.emit(true);
//! events.dirty_changed.unsubscribe(sub);
//! ```

mod channel;
mod events;

pub use channel::*;
pub use events::*;
