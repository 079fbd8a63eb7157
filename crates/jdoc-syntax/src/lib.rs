#![deny(clippy::all)]

//! Mutable Java syntax tree infrastructure for the jdoc engine.
//!
//! This crate provides:
//! - An arena-backed syntax tree of pre-parsed Java declarations with narrow
//!   structural operations (locate, insert-before, delete, read-sibling).
//! - A [`SourceFile`] wrapper carrying validity/writability state, a
//!   synchronized document index, undoable write transactions with rollback,
//!   and a bounded range reformatter.
//! - A builder API for constructing trees programmatically; this crate does
//!   not parse Java text.

pub mod builder;
pub mod error;
pub mod file;
pub mod tree;

pub use builder::{ClassBuilder, FileBuilder, MethodBuilder};
pub use error::{Result, TreeError};
pub use file::{SourceFile, WriteGuard};
pub use tree::{NodeId, NodeKind, Param, Signature, SyntaxTree};
