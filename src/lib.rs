//! Mounting of abstract node trees and markup into a test container.
//!
//! [`mount`] takes a [`VNode`], a list of them, or markup text, builds live
//! elements in the harness [`Document`](html::Document) and appends them to the
//! container. [`setup_hooks`] registers the cleanup that empties the container
//! after every test.

/// Harness settings
pub mod config;
/// The test runner interface and a reference implementation
pub mod harness;
/// Translation of a [`VNode`] tree into live elements
pub mod materialize;
mod mount;
pub mod vnode;
#[cfg(test)]
mod tests;

pub use config::Env;
pub use harness::{Harness, Hook, LogRecord, RetryStep, TestBed, TestFailure, TestReport};
pub use materialize::{materialize, AttrRule};
pub use mount::{
    cleanup, mount, setup_hooks, wait_until_visible, MountHandle, MountOptions, Template,
    CLEANUP_HOOK,
};
pub use vnode::{h, text, Attrs, VNode};
