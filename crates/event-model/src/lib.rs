//! guirecord event model
//!
//! Defines the data contract between input backends and the script engine:
//! - **RecordedEvent:** one key transition, button transition, or pointer
//!   motion sample, tagged with the gap since the previous event
//! - **Event logs:** append-only JSONL so a session can be translated
//!   again later without a live input device
//!
//! Pointer coordinates are absolute screen pixels. Key identities are
//! X11 keysym values.

pub mod event;

pub use event::*;
