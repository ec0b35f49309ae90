// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Cursor, Next, Result, peek_row_def_id};
use reifydb_type::HKey;

use super::flatten::HKeyedCursor;

/// `select_HKeyOrdered(input, predicateRowType, predicate)`: evaluates
/// `predicate` only on rows of `predicate_row_type`, passing rows of other
/// types through unchanged. When a `predicate_row_type` row is dropped,
/// every descendant of its hkey (identified by prefix match, since the
/// input is hkey-ordered) is dropped too, until an hkey that is not a
/// descendant of the dropped row is seen.
pub struct SelectHKeyOrdered<C, P> {
	child: C,
	predicate_row_type: u32,
	predicate: P,
	dropped_ancestor: Option<HKey>,
	current_hkey: Option<HKey>,
}

impl<C: Cursor + HKeyedCursor, P: FnMut(&[u8]) -> Result<bool>> SelectHKeyOrdered<C, P> {
	pub fn new(child: C, predicate_row_type: u32, predicate: P) -> Self {
		SelectHKeyOrdered { child, predicate_row_type, predicate, dropped_ancestor: None, current_hkey: None }
	}
}

impl<C: Cursor + HKeyedCursor, P: FnMut(&[u8]) -> Result<bool>> Cursor for SelectHKeyOrdered<C, P> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			match self.child.next()? {
				Next::Row(row) => {
					let hkey = self.child.current_hkey();
					if let Some(dropped) = &self.dropped_ancestor {
						if hkey.is_descendant_of_or_equal(dropped) {
							continue;
						}
						self.dropped_ancestor = None;
					}

					if peek_row_def_id(&row) == self.predicate_row_type {
						if (self.predicate)(&row)? {
							self.current_hkey = Some(hkey);
							return Ok(Next::Row(row));
						}
						self.dropped_ancestor = Some(hkey);
						continue;
					}

					self.current_hkey = Some(hkey);
					return Ok(Next::Row(row));
				}
				Next::End => return Ok(Next::End),
			}
		}
	}

	fn close(&mut self) -> Result<()> {
		self.child.close()
	}
}

impl<C: Cursor + HKeyedCursor, P: FnMut(&[u8]) -> Result<bool>> HKeyedCursor for SelectHKeyOrdered<C, P> {
	fn current_hkey(&self) -> HKey {
		self.current_hkey.clone().expect("current_hkey called before the first successful next()")
	}
}
