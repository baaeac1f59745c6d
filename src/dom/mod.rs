//! In-memory document model the components render into.
//!
//! The tree mirrors the small slice of the browser DOM this crate needs:
//! element lookup by id, `<template>` content cloning, adjacent insertion,
//! simple CSS selectors, form control values and bubbling events.

mod document;
mod error;
mod event;
mod markup;
mod selector;
mod serialize;

pub use document::{Document, InsertPosition, NodeId, NodeKind};
pub use error::DomError;
pub use event::{Event, EventType, ListenerHandle};
pub use markup::parse_document;
pub use selector::Selector;
