//! Template-backed components.
//!
//! A component clones the first element of a `<template>`, attaches it to a
//! host container once, then runs its [`Component::configure`] and
//! [`Component::render_content`] hooks in that order.

mod base;
mod error;

pub use base::{Component, ComponentBase, MountOptions, mount};
pub use error::StructuralError;
