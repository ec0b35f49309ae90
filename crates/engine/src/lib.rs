// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Builds an operator tree (the modules under [`operator`]) and runs it
//! through the root cursor entry point.

pub mod error;
pub mod operator;

pub use error::{Error, Result};
pub use reifydb_core::{Adapter, Bindings, Cursor, EngineConfig, Limit, Next};

/// Wraps `root` — the operator tree's top-level [`Cursor`] — with the
/// close-exactly-once guard and exception-to-close-then-rethrow behavior
/// every entry point into the tree must have (spec.md §4.2, "C8").
///
/// This is the only supported way to drive an operator tree to
/// completion: calling `next`/`close` directly on an inner operator skips
/// the guarantee that a failing `next` still closes every operator beneath
/// it exactly once.
pub fn cursor<C: Cursor>(root: C) -> reifydb_core::RootCursor<C> {
	reifydb_core::RootCursor::new(root)
}
