// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::collections::VecDeque;

use reifydb_core::row::{RowLayout, encode};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_core::{Cursor, Next, Result, peek_row_def_id};
use reifydb_type::{Type, Value};

/// `count_Default(input, countType)`: for each maximal run of consecutive
/// rows whose `row_def_id` is `countType`, emits a singleton `Uint8` row
/// carrying the run's length once the run ends — either because a row of a
/// different type was seen, or the child reached end of stream. Rows not of
/// `countType` pass through unchanged, interposed between runs.
pub struct Count<C> {
	child: C,
	count_type: u32,
	layout: RowLayout,
	max_row_bytes: usize,
	run: u64,
	in_run: bool,
	pending: VecDeque<Next>,
	child_done: bool,
}

impl<C: Cursor> Count<C> {
	pub fn new(child: C, count_type: u32, row_def_id: u32, max_row_bytes: usize) -> Self {
		Count {
			child,
			count_type,
			layout: RowLayout::new(RowDef::new(row_def_id, vec![FieldDef::fixed(Type::Uint8)])),
			max_row_bytes,
			run: 0,
			in_run: false,
			pending: VecDeque::new(),
			child_done: false,
		}
	}

	fn count_row(&self) -> Result<Vec<u8>> {
		encode(&self.layout, &[Value::Uint8(self.run)], self.max_row_bytes)
	}
}

impl<C: Cursor> Cursor for Count<C> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			if let Some(next) = self.pending.pop_front() {
				return Ok(next);
			}
			if self.child_done {
				if self.in_run {
					self.in_run = false;
					let row = self.count_row()?;
					self.run = 0;
					return Ok(Next::Row(row));
				}
				return Ok(Next::End);
			}
			match self.child.next()? {
				Next::Row(row) => {
					if peek_row_def_id(&row) == self.count_type {
						self.run += 1;
						self.in_run = true;
					} else {
						if self.in_run {
							self.in_run = false;
							let count_row = self.count_row()?;
							self.run = 0;
							self.pending.push_back(Next::Row(row));
							return Ok(Next::Row(count_row));
						}
						return Ok(Next::Row(row));
					}
				}
				Next::End => {
					self.child_done = true;
				}
			}
		}
	}

	fn close(&mut self) -> Result<()> {
		self.child.close()
	}
}
