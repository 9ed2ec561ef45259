//! guirecord script engine
//!
//! Turns a live stream of recorded input events into an automation
//! script that replays them:
//!
//! - **Session:** owns per-recording state and routes each event
//! - **Key translation:** buffers typed keys into `SendKeys` runs with
//!   modifier groups and quote escaping
//! - **Pointer translation:** button presses and motion, with consecutive
//!   fine-grained moves filtered out
//! - **Delays:** user pauses rendered as pause statements
//! - **Writer:** renders statements in the chosen script format to disk
//!
//! The engine is synchronous and handles one event at a time in arrival
//! order.

pub mod delay;
pub mod key;
pub mod keys;
pub mod pointer;
pub mod session;
pub mod sink;
pub mod statement;
pub mod writer;

pub use keys::{KeyResolver, KeyTable};
pub use pointer::PointerInput;
pub use session::{classify, EventClass, Session, SessionState};
pub use sink::ScriptSink;
pub use statement::{MouseButton, Statement};
pub use writer::ScriptWriter;
