// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Adapter, Cursor, Limit, Next, Result};
use reifydb_type::HKey;

use super::flatten::HKeyedCursor;

/// Which rows of the group `GroupScan` yields.
enum Mode {
	/// The entire group, in hkey order.
	Full,
	/// Opens at `from` (typically an hkey read out of a binding by the
	/// caller): `deep = true` yields the whole subtree rooted there,
	/// `deep = false` yields only its immediate children.
	Positional { from: HKey, deep: bool },
}

/// `groupScan_Default`: streams rows of a table in hkey order, as produced
/// by `Adapter::group_scan`, optionally restricted to a subtree and/or
/// capped by a [`Limit`].
pub struct GroupScan<'a, A: Adapter> {
	adapter: &'a A,
	table: u64,
	mode: Mode,
	limit: Limit,
	rows: Option<Box<dyn Iterator<Item = Result<(HKey, Vec<u8>)>> + 'a>>,
	produced: u64,
	current_hkey: Option<HKey>,
}

impl<'a, A: Adapter> GroupScan<'a, A> {
	pub fn new(adapter: &'a A, table: u64) -> Self {
		GroupScan { adapter, table, mode: Mode::Full, limit: Limit::NO_LIMIT, rows: None, produced: 0, current_hkey: None }
	}

	pub fn with_limit(adapter: &'a A, table: u64, limit: Limit) -> Self {
		GroupScan { adapter, table, mode: Mode::Full, limit, rows: None, produced: 0, current_hkey: None }
	}

	/// Opens positionally at `from`: `deep = true` for the whole subtree
	/// rooted there, `deep = false` for immediate children only.
	pub fn positional(adapter: &'a A, table: u64, from: HKey, deep: bool, limit: Limit) -> Self {
		GroupScan { adapter, table, mode: Mode::Positional { from, deep }, limit, rows: None, produced: 0, current_hkey: None }
	}
}

impl<'a, A: Adapter> Cursor for GroupScan<'a, A> {
	#[tracing::instrument(level = "trace", skip(self))]
	fn open(&mut self) -> Result<()> {
		let iter = self.adapter.group_scan(self.table)?;
		self.rows = Some(match &self.mode {
			Mode::Full => iter,
			Mode::Positional { from, deep } => {
				let from = from.clone();
				let deep = *deep;
				Box::new(iter.filter(move |row| match row {
					Ok((hkey, _)) => {
						if deep {
							hkey.is_descendant_of_or_equal(&from) && hkey != &from
						} else {
							hkey.depth() == from.depth() + 1 && hkey.is_descendant_of_or_equal(&from)
						}
					}
					Err(_) => true,
				}))
			}
		});
		Ok(())
	}

	fn next(&mut self) -> Result<Next> {
		if self.limit.is_reached(self.produced) {
			return Ok(Next::End);
		}
		let rows = self.rows.as_mut().expect("open must be called before next");
		match rows.next() {
			Some(Ok((hkey, row))) => {
				self.produced += 1;
				self.current_hkey = Some(hkey);
				Ok(Next::Row(row))
			}
			Some(Err(err)) => Err(err),
			None => Ok(Next::End),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.rows = None;
		Ok(())
	}
}

impl<'a, A: Adapter> HKeyedCursor for GroupScan<'a, A> {
	fn current_hkey(&self) -> HKey {
		self.current_hkey.clone().expect("current_hkey called before the first successful next()")
	}
}
