// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Cursor, Limit, Next, Result};

/// `limit_Default`: stops producing rows once `limit` rows have been
/// returned, without pulling a row from the child it doesn't need.
pub struct LimitOp<C> {
	child: C,
	limit: Limit,
	produced: u64,
	child_closed: bool,
}

impl<C: Cursor> LimitOp<C> {
	pub fn new(child: C, limit: Limit) -> Self {
		LimitOp { child, limit, produced: 0, child_closed: false }
	}

	fn close_child_once(&mut self) -> Result<()> {
		if !self.child_closed {
			self.child_closed = true;
			self.child.close()?;
		}
		Ok(())
	}
}

impl<C: Cursor> Cursor for LimitOp<C> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		if self.limit.is_reached(self.produced) {
			self.close_child_once()?;
			return Ok(Next::End);
		}
		match self.child.next()? {
			Next::Row(row) => {
				self.produced += 1;
				if self.limit.is_reached(self.produced) {
					self.close_child_once()?;
				}
				Ok(Next::Row(row))
			}
			Next::End => Ok(Next::End),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.close_child_once()
	}
}
