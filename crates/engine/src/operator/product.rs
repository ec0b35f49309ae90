// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Bindings, Cursor, Next, Result};
use reifydb_type::Value;

use super::flatten::encode_flattened;

/// `product_NestedLoops(outer, inner, leftType, rightType, bindingPos)`: for
/// each outer row, writes it into binding `bindingPos`, opens the inner
/// cursor, and emits the flattened cross of the outer row with every inner
/// row; the inner cursor is closed and rebuilt on each outer advancement.
///
/// Distinct from `map_NestedLoops`: the combine step is fixed to the
/// flattened-pair wire shape (no caller-supplied `combine`), and there is no
/// `bind` step beyond placing the outer row at `binding_pos` — the inner
/// cursor factory reads it back out of the binding itself.
pub struct ProductNestedLoops<O, I, MakeInner> {
	outer: O,
	make_inner: MakeInner,
	binding_pos: usize,
	bindings: Bindings,
	current_outer: Vec<u8>,
	inner: Option<I>,
}

impl<O, I, MakeInner> ProductNestedLoops<O, I, MakeInner>
where
	O: Cursor,
	I: Cursor,
	MakeInner: FnMut(&Bindings) -> Result<I>,
{
	pub fn new(outer: O, make_inner: MakeInner, binding_pos: usize) -> Self {
		ProductNestedLoops { outer, make_inner, binding_pos, bindings: Bindings::new(), current_outer: Vec::new(), inner: None }
	}
}

impl<O, I, MakeInner> Cursor for ProductNestedLoops<O, I, MakeInner>
where
	O: Cursor,
	I: Cursor,
	MakeInner: FnMut(&Bindings) -> Result<I>,
{
	fn open(&mut self) -> Result<()> {
		self.outer.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			if let Some(inner) = self.inner.as_mut() {
				match inner.next()? {
					Next::Row(inner_row) => {
						return Ok(Next::Row(encode_flattened(Some(&self.current_outer), Some(&inner_row))));
					}
					Next::End => {
						inner.close()?;
						self.inner = None;
					}
				}
			}

			match self.outer.next()? {
				Next::Row(outer_row) => {
					self.bindings.set(self.binding_pos, Value::Blob(outer_row.clone()));
					self.current_outer = outer_row;
					let mut inner = (self.make_inner)(&self.bindings)?;
					inner.open()?;
					self.inner = Some(inner);
				}
				Next::End => return Ok(Next::End),
			}
		}
	}

	fn close(&mut self) -> Result<()> {
		if let Some(inner) = self.inner.as_mut() {
			inner.close()?;
		}
		self.inner = None;
		self.outer.close()
	}
}
