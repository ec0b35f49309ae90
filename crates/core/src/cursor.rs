// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use smallvec::SmallVec;

use reifydb_type::Value;

use crate::error::{Error, Result};

/// What `Cursor::next` produced: another row, or end-of-stream.
///
/// End-of-stream is terminal: a well-behaved cursor never produces a `Row`
/// after returning `End` (spec.md §6.2).
#[derive(Debug)]
pub enum Next {
	Row(Vec<u8>),
	End,
}

/// The open/next/close protocol every operator implements (spec.md §6.2).
///
/// `open` may be called at most once, before the first `next`. `close` may
/// be called at most once; any `next`/`close` call after `close` returns
/// [`Error::CursorClosed`] rather than re-entering the operator.
pub trait Cursor {
	fn open(&mut self) -> Result<()>;
	fn next(&mut self) -> Result<Next>;
	fn close(&mut self) -> Result<()>;
}

/// Sparse positional side-channel threaded from an outer cursor into an
/// inner one, e.g. a nested-loop join binding the outer row's columns for
/// the inner scan's predicate (spec.md §6.4).
#[derive(Clone, Debug, Default)]
pub struct Bindings(SmallVec<[Option<Value>; 8]>);

impl Bindings {
	pub fn new() -> Self {
		Bindings(Vec::new())
	}

	pub fn set(&mut self, position: usize, value: Value) {
		if position >= self.0.len() {
			self.0.resize(position + 1, None);
		}
		self.0[position] = Some(value);
	}

	pub fn clear(&mut self, position: usize) {
		if let Some(slot) = self.0.get_mut(position) {
			*slot = None;
		}
	}

	pub fn get(&self, position: usize) -> Result<&Value> {
		self.0.get(position).and_then(Option::as_ref).ok_or(Error::BindingMissing(position))
	}
}

/// A row-count ceiling an operator stops producing rows at.
///
/// `NO_LIMIT` is the identity: every operator that accepts a `Limit`
/// behaves as if it weren't there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit(Option<u64>);

impl Limit {
	pub const NO_LIMIT: Limit = Limit(None);

	pub const fn of(n: u64) -> Self {
		Limit(Some(n))
	}

	pub const fn value(self) -> Option<u64> {
		self.0
	}

	/// Whether `produced` rows already satisfies this limit.
	pub fn is_reached(self, produced: u64) -> bool {
		matches!(self.0, Some(n) if produced >= n)
	}
}

/// Wraps the tree's root operator with the close-exactly-once guard and the
/// exception-to-close-then-rethrow behavior required of the root cursor
/// (spec.md §4.2, "C8"): once any `next` call returns an error, the wrapper
/// closes the wrapped tree itself before propagating that error, and every
/// call after either a returned error or an explicit `close` short-circuits
/// to `CursorClosed` without touching the wrapped tree again.
pub struct RootCursor<C: Cursor> {
	inner: C,
	closed: bool,
}

impl<C: Cursor> RootCursor<C> {
	pub fn new(inner: C) -> Self {
		RootCursor { inner, closed: false }
	}

	pub fn open(&mut self) -> Result<()> {
		if self.closed {
			return Err(Error::CursorClosed);
		}
		self.inner.open()
	}

	pub fn next(&mut self) -> Result<Next> {
		if self.closed {
			return Err(Error::CursorClosed);
		}
		match self.inner.next() {
			Ok(next) => Ok(next),
			Err(err) => {
				self.closed = true;
				let _ = self.inner.close();
				Err(err)
			}
		}
	}

	pub fn close(&mut self) -> Result<()> {
		if self.closed {
			return Ok(());
		}
		self.closed = true;
		self.inner.close()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FailsOnSecondCall {
		calls: u32,
		closed: bool,
	}

	impl Cursor for FailsOnSecondCall {
		fn open(&mut self) -> Result<()> {
			Ok(())
		}

		fn next(&mut self) -> Result<Next> {
			self.calls += 1;
			if self.calls == 1 {
				Ok(Next::Row(vec![0]))
			} else {
				Err(Error::OrderingViolation)
			}
		}

		fn close(&mut self) -> Result<()> {
			self.closed = true;
			Ok(())
		}
	}

	#[test]
	fn bindings_missing_position_errors() {
		let bindings = Bindings::new();
		assert!(matches!(bindings.get(0), Err(Error::BindingMissing(0))));
	}

	#[test]
	fn bindings_round_trip_a_set_position() {
		let mut bindings = Bindings::new();
		bindings.set(3, Value::Bool(true));
		assert_eq!(bindings.get(3).unwrap(), &Value::Bool(true));
	}

	#[test]
	fn no_limit_is_never_reached() {
		assert!(!Limit::NO_LIMIT.is_reached(u64::MAX));
	}

	#[test]
	fn limit_is_reached_once_produced_meets_it() {
		let limit = Limit::of(3);
		assert!(!limit.is_reached(2));
		assert!(limit.is_reached(3));
	}

	#[test]
	fn root_cursor_closes_the_tree_once_on_error_and_then_short_circuits() {
		let mut root = RootCursor::new(FailsOnSecondCall { calls: 0, closed: false });
		root.open().unwrap();
		assert!(matches!(root.next().unwrap(), Next::Row(_)));
		assert!(root.next().is_err());
		assert!(root.inner.closed);
		assert!(matches!(root.next(), Err(Error::CursorClosed)));
	}

	#[test]
	fn root_cursor_close_is_idempotent() {
		let mut root = RootCursor::new(FailsOnSecondCall { calls: 0, closed: false });
		root.open().unwrap();
		root.close().unwrap();
		root.close().unwrap();
		assert!(matches!(root.next(), Err(Error::CursorClosed)));
	}
}
