// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Adapter, Cursor, Next, Result};
use reifydb_type::HKey;

use super::flatten::HKeyedCursor;

/// `indexScan_Default(indexType, reverse?, range?, innerJoinUntilType)`:
/// streams index rows in index order (reversed if `reverse`), optionally
/// restricted to the half-open key range `[lower, upper)` via `key_of`.
///
/// `inner_join_until_type` names the deepest ancestor table at which index
/// rows are considered joined for a later lookup-based join; per spec.md's
/// open questions this crate keeps the field and surfaces it unchanged
/// without interpreting it further.
pub struct IndexScan<'a, A: Adapter, K, F> {
	adapter: &'a A,
	index: u64,
	reverse: bool,
	range: Option<(K, K)>,
	key_of: F,
	#[allow(dead_code)]
	inner_join_until_type: Option<u32>,
	rows: Option<std::vec::IntoIter<(HKey, Vec<u8>)>>,
	current_hkey: Option<HKey>,
}

impl<'a, A: Adapter, K: Ord, F: FnMut(&[u8]) -> K> IndexScan<'a, A, K, F> {
	pub fn new(adapter: &'a A, index: u64, key_of: F) -> Self {
		IndexScan { adapter, index, reverse: false, range: None, key_of, inner_join_until_type: None, rows: None, current_hkey: None }
	}

	pub fn with_options(adapter: &'a A, index: u64, reverse: bool, range: Option<(K, K)>, inner_join_until_type: Option<u32>, key_of: F) -> Self {
		IndexScan { adapter, index, reverse, range, key_of, inner_join_until_type, rows: None, current_hkey: None }
	}
}

impl<'a, A: Adapter, K: Ord, F: FnMut(&[u8]) -> K> Cursor for IndexScan<'a, A, K, F> {
	#[tracing::instrument(level = "trace", skip(self))]
	fn open(&mut self) -> Result<()> {
		let mut rows: Vec<(HKey, Vec<u8>)> = self.adapter.index_scan(self.index)?.collect::<Result<_>>()?;
		if let Some((lower, upper)) = &self.range {
			rows.retain(|(_, row)| {
				let key = (self.key_of)(row);
				key >= *lower && key < *upper
			});
		}
		if self.reverse {
			rows.reverse();
		}
		self.rows = Some(rows.into_iter());
		Ok(())
	}

	fn next(&mut self) -> Result<Next> {
		let rows = self.rows.as_mut().expect("open must be called before next");
		match rows.next() {
			Some((hkey, row)) => {
				self.current_hkey = Some(hkey);
				Ok(Next::Row(row))
			}
			None => Ok(Next::End),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.rows = None;
		Ok(())
	}
}

impl<'a, A: Adapter, K: Ord, F: FnMut(&[u8]) -> K> HKeyedCursor for IndexScan<'a, A, K, F> {
	fn current_hkey(&self) -> HKey {
		self.current_hkey.clone().expect("current_hkey called before the first successful next()")
	}
}
