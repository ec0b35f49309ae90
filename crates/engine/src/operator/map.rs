// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Bindings, Cursor, Next, Result};

/// `map_NestedLoops`: for each outer row, binds it into `Bindings` via
/// `bind`, then drains a freshly built inner cursor and combines each inner
/// row with the outer row via `combine`. The inner cursor is rebuilt once
/// per outer row — nested-loop semantics, not a hash join.
///
/// When `synthesize` is set (the `outerJoinRowType`/`outerJoinExpressions`
/// form), an outer row for which the inner cursor produced zero rows gets
/// exactly one synthesized row in its place instead of contributing nothing.
pub struct MapNestedLoops<O, I, MakeInner, Bind, Combine> {
	outer: O,
	make_inner: MakeInner,
	bind: Bind,
	combine: Combine,
	synthesize: Option<Box<dyn FnMut(&[u8]) -> Result<Vec<u8>>>>,
	bindings: Bindings,
	current_outer: Vec<u8>,
	inner: Option<I>,
	inner_produced_any: bool,
}

impl<O, I, MakeInner, Bind, Combine> MapNestedLoops<O, I, MakeInner, Bind, Combine>
where
	O: Cursor,
	I: Cursor,
	MakeInner: FnMut(&Bindings) -> Result<I>,
	Bind: FnMut(&[u8], &mut Bindings) -> Result<()>,
	Combine: FnMut(&[u8], &[u8]) -> Result<Vec<u8>>,
{
	pub fn new(outer: O, make_inner: MakeInner, bind: Bind, combine: Combine) -> Self {
		MapNestedLoops {
			outer,
			make_inner,
			bind,
			combine,
			synthesize: None,
			bindings: Bindings::new(),
			current_outer: Vec::new(),
			inner: None,
			inner_produced_any: false,
		}
	}

	/// The `outerJoinRowType`/`outerJoinExpressions` form: `synthesize`
	/// is invoked with the outer row exactly once, for an outer row whose
	/// inner cursor produced no rows at all.
	pub fn with_outer_join(
		outer: O,
		make_inner: MakeInner,
		bind: Bind,
		combine: Combine,
		synthesize: impl FnMut(&[u8]) -> Result<Vec<u8>> + 'static,
	) -> Self {
		let mut this = Self::new(outer, make_inner, bind, combine);
		this.synthesize = Some(Box::new(synthesize));
		this
	}
}

impl<O, I, MakeInner, Bind, Combine> Cursor for MapNestedLoops<O, I, MakeInner, Bind, Combine>
where
	O: Cursor,
	I: Cursor,
	MakeInner: FnMut(&Bindings) -> Result<I>,
	Bind: FnMut(&[u8], &mut Bindings) -> Result<()>,
	Combine: FnMut(&[u8], &[u8]) -> Result<Vec<u8>>,
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
						self.inner_produced_any = true;
						let combined = (self.combine)(&self.current_outer, &inner_row)?;
						return Ok(Next::Row(combined));
					}
					Next::End => {
						inner.close()?;
						self.inner = None;
						if !self.inner_produced_any {
							if let Some(synthesize) = self.synthesize.as_mut() {
								let row = synthesize(&self.current_outer)?;
								return Ok(Next::Row(row));
							}
						}
					}
				}
			}

			match self.outer.next()? {
				Next::Row(outer_row) => {
					(self.bind)(&outer_row, &mut self.bindings)?;
					self.current_outer = outer_row;
					self.inner_produced_any = false;
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
