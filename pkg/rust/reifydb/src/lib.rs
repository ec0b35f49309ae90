// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Top-level facade over the row codec (`reifydb-core`), the query-operator
//! engine (`reifydb-engine`), and the value system (`reifydb-type`).
//!
//! Most users only need the re-exports below; [`execute`] is a convenience
//! wrapper around [`reifydb_engine::cursor`] for callers who just want to
//! drain a tree into a `Vec` without managing the root cursor themselves.

pub use reifydb_core::{
	Adapter, Bindings, Cursor, EngineConfig, Error, FieldDef, Limit, Next, Result, RowDef, RowLayout, RowView,
};
pub use reifydb_engine::cursor;
pub use reifydb_engine::operator;
pub use reifydb_type::{
	CharSet, ConversionType, Date, HKey, Interval, JoinVariant, KeySegment, RowType, Time, Type, Value,
};

/// Opens `root`, drains it to completion via the root-cursor guard, and
/// returns every row produced. Closes the tree whether draining succeeds or
/// fails.
///
/// This is the one-shot convenience path (spec.md's "root execution entry
/// point", C8); a caller that needs to interleave draining with other work
/// should build a [`reifydb_core::RootCursor`] directly instead.
pub fn execute<C: Cursor>(root: C) -> Result<Vec<Vec<u8>>> {
	let mut root = cursor(root);
	root.open()?;
	let mut rows = Vec::new();
	loop {
		match root.next()? {
			Next::Row(row) => rows.push(row),
			Next::End => break,
		}
	}
	root.close()?;
	Ok(rows)
}
