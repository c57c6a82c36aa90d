//! The workspace state engine: the live mirror of an editor's open files and
//! cursors, and the machinery that keeps it in sync.
//!
//! This crate is transport-agnostic — it knows nothing about stdio framing,
//! WebSocket upgrades, or JSON-RPC method names. It exposes:
//!
//! - [`text`] — line splitting, UTF-16↔rune conversion, ranged-edit application
//! - [`document`] — the open-file model ([`document::File`])
//! - [`view`] — the cursor/selection model ([`view::View`])
//! - [`events`] — the change log ([`events::Event`])
//! - [`bus`] — synchronous pub/sub fan-out ([`bus::EventBus`])
//! - [`debounce`] — whole-document-replacement coalescing ([`debounce::Debouncer`])
//! - [`workspace`] — the mutex-guarded store tying it all together ([`workspace::WorkspaceState`])

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bus;
pub mod debounce;
pub mod document;
pub mod events;
pub mod text;
pub mod view;
pub mod workspace;

pub use bus::{EventBus, SubscriptionId};
pub use debounce::{Debouncer, TextChange};
pub use document::{File, FileMetadata};
pub use events::{ChangeTextRange, Event, WorkspaceSnapshot};
pub use text::RangedChange;
pub use view::{CursorPosition, Position, SelectionRange, View};
pub use workspace::{WireCursor, WorkspaceState};
