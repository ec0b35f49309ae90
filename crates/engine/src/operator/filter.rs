// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::collections::HashSet;

use reifydb_core::{Cursor, Next, Result, peek_row_def_id};

/// `filter_Default(input, keepTypes)`: retains only rows whose `row_def_id`
/// is in `keep_types`. No hkey awareness — for filtering that must also drop
/// a dropped parent's descendants, see `select_HKeyOrdered`.
pub struct FilterDefault<C> {
	child: C,
	keep_types: HashSet<u32>,
}

impl<C: Cursor> FilterDefault<C> {
	pub fn new(child: C, keep_types: impl IntoIterator<Item = u32>) -> Self {
		FilterDefault { child, keep_types: keep_types.into_iter().collect() }
	}
}

impl<C: Cursor> Cursor for FilterDefault<C> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			match self.child.next()? {
				Next::Row(row) => {
					if self.keep_types.contains(&peek_row_def_id(&row)) {
						return Ok(Next::Row(row));
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
