// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::collections::VecDeque;

use reifydb_core::{Adapter, Cursor, Next, Result};
use reifydb_type::HKey;

use super::flatten::HKeyedCursor;

/// Whether `ancestorLookup_Default` re-emits the triggering input row
/// alongside the ancestor rows it looked up, or discards it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputDisposition {
	KeepInput,
	DiscardInput,
}

/// `ancestorLookup_Default(input, group, rowType, ancestorTypes, flag)`: for
/// each input row, looks up its ancestor at every table in `ancestor_types`
/// (given root-to-leaf) and emits whichever of those lookups hit, in order,
/// followed by the input row itself when `flag` is `KeepInput`.
pub struct AncestorLookup<'a, C, A: Adapter> {
	child: C,
	adapter: &'a A,
	ancestor_types: Vec<u64>,
	flag: InputDisposition,
	pending: VecDeque<Vec<u8>>,
}

impl<'a, C: Cursor + HKeyedCursor, A: Adapter> AncestorLookup<'a, C, A> {
	pub fn new(child: C, adapter: &'a A, ancestor_types: Vec<u64>, flag: InputDisposition) -> Self {
		AncestorLookup { child, adapter, ancestor_types, flag, pending: VecDeque::new() }
	}
}

impl<'a, C: Cursor + HKeyedCursor, A: Adapter> Cursor for AncestorLookup<'a, C, A> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			if let Some(row) = self.pending.pop_front() {
				return Ok(Next::Row(row));
			}

			match self.child.next()? {
				Next::Row(row) => {
					let hkey = self.child.current_hkey();
					for &ancestor_table in &self.ancestor_types {
						if let Some(ancestor_row) = self.adapter.ancestor_lookup(&hkey, ancestor_table)? {
							self.pending.push_back(ancestor_row);
						}
					}
					if self.flag == InputDisposition::KeepInput {
						self.pending.push_back(row);
					}
				}
				Next::End => return Ok(Next::End),
			}
		}
	}

	fn close(&mut self) -> Result<()> {
		self.child.close()
	}
}

/// `ancestorLookup_Nested(group, rowType, ancestorTypes, flag,
/// hKeyBindingPosition)`: the correlated-subquery form, built fresh per outer
/// row by `map_NestedLoops`'s `make_inner`. The hkey is supplied directly
/// (already drawn from bindings by the caller) rather than read off a piped
/// child cursor, so there is no separate input row to keep or discard — the
/// outer row survives via `map_NestedLoops`'s own combine step instead, and
/// `ancestor_types` is the only thing this cursor actually emits.
pub struct AncestorLookupNested<'a, A: Adapter> {
	adapter: &'a A,
	hkey: HKey,
	ancestor_types: Vec<u64>,
	rows: Option<std::vec::IntoIter<Vec<u8>>>,
}

impl<'a, A: Adapter> AncestorLookupNested<'a, A> {
	pub fn new(adapter: &'a A, hkey: HKey, ancestor_types: Vec<u64>) -> Self {
		AncestorLookupNested { adapter, hkey, ancestor_types, rows: None }
	}
}

impl<'a, A: Adapter> Cursor for AncestorLookupNested<'a, A> {
	fn open(&mut self) -> Result<()> {
		let mut rows = Vec::with_capacity(self.ancestor_types.len());
		for &ancestor_table in &self.ancestor_types {
			if let Some(row) = self.adapter.ancestor_lookup(&self.hkey, ancestor_table)? {
				rows.push(row);
			}
		}
		self.rows = Some(rows.into_iter());
		Ok(())
	}

	fn next(&mut self) -> Result<Next> {
		let rows = self.rows.as_mut().expect("open must be called before next");
		match rows.next() {
			Some(row) => Ok(Next::Row(row)),
			None => Ok(Next::End),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.rows = None;
		Ok(())
	}
}
