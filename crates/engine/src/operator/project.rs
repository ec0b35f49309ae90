// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::row::{RowLayout, RowView, encode};
use reifydb_core::{Cursor, Next, Result, peek_row_def_id};
use reifydb_type::Value;

/// A single output column of a [`Project`]: computed from the input row by
/// whatever closure the caller supplies (a literal, a field read, an
/// arithmetic combination — this crate doesn't need to know which).
pub type Expression = Box<dyn for<'a> Fn(&RowView<'a>) -> Value>;

/// Which input rows `project_Default`/`project_Table` transforms.
enum InputGate {
	/// `project_Default`: no declared input type, so every row is
	/// projected.
	Always,
	/// `project_Table`: only rows of `row_def_id` are projected; every
	/// other row passes through unchanged.
	MatchesType(u32),
}

/// `project_Default` / `project_Table(input, rowType?, outputRowType,
/// expressions)`: for each input row whose type matches the gate, emits a
/// new row of `target`'s type whose fields are `expressions` evaluated
/// against the input row. Rows the gate rejects pass through byte-for-byte.
pub struct Project<'a, C> {
	child: C,
	source: &'a RowLayout,
	gate: InputGate,
	target: &'a RowLayout,
	expressions: Vec<Expression>,
	max_row_bytes: usize,
}

impl<'a, C: Cursor> Project<'a, C> {
	/// `project_Default`: no input-type gate, every row is projected.
	pub fn new_default(child: C, source: &'a RowLayout, target: &'a RowLayout, expressions: Vec<Expression>, max_row_bytes: usize) -> Self {
		Project { child, source, gate: InputGate::Always, target, expressions, max_row_bytes }
	}

	/// `project_Table`: only rows whose `row_def_id` equals `input_type`
	/// are projected; all others pass through unchanged.
	pub fn new_table(child: C, source: &'a RowLayout, input_type: u32, target: &'a RowLayout, expressions: Vec<Expression>, max_row_bytes: usize) -> Self {
		Project { child, source, gate: InputGate::MatchesType(input_type), target, expressions, max_row_bytes }
	}

	fn project_row(&self, row: &[u8]) -> Result<Vec<u8>> {
		let view = RowView::parse(self.source, row, self.max_row_bytes)?;
		let values: Vec<Value> = self.expressions.iter().map(|expr| expr(&view)).collect();
		encode(self.target, &values, self.max_row_bytes)
	}
}

impl<'a, C: Cursor> Cursor for Project<'a, C> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		match self.child.next()? {
			Next::Row(row) => {
				let matches = match self.gate {
					InputGate::Always => true,
					InputGate::MatchesType(t) => peek_row_def_id(&row) == t,
				};
				if matches {
					Ok(Next::Row(self.project_row(&row)?))
				} else {
					Ok(Next::Row(row))
				}
			}
			Next::End => Ok(Next::End),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.child.close()
	}
}
