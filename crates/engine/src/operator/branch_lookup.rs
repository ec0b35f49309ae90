// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Adapter, Cursor, Next, Result};
use reifydb_type::HKey;

use super::flatten::HKeyedCursor;

/// Walks `tables` level by level below `root`, using `Adapter::branch_lookup`
/// (direct children only) at each level to assemble the full subtree, then
/// sorts the result into hkey order. `tables` lists the branch's nesting
/// chain, shallowest first — `Adapter::branch_lookup` itself only ever sees
/// one level at a time, so the recursive descent lives here rather than in
/// the adapter contract.
fn collect_branch<A: Adapter>(adapter: &A, root: &HKey, tables: &[u64]) -> Result<Vec<(HKey, Vec<u8>)>> {
	let mut frontier = vec![root.clone()];
	let mut collected = Vec::new();
	for &table in tables {
		let mut next_frontier = Vec::new();
		for hkey in &frontier {
			for item in adapter.branch_lookup(hkey, table)? {
				let (child_hkey, row) = item?;
				next_frontier.push(child_hkey.clone());
				collected.push((child_hkey, row));
			}
		}
		frontier = next_frontier;
	}
	collected.sort_by(|a, b| a.0.cmp(&b.0));
	Ok(collected)
}

/// `branchLookup_Default(input, group, tables)`: like `ancestorLookup`, but
/// for each input row emits the entire subtree rooted at that row's hkey
/// (every descendant across `tables`, the branch's nesting chain), in hkey
/// order within the branch.
pub struct BranchLookup<'a, C, A: Adapter> {
	child: C,
	adapter: &'a A,
	tables: Vec<u64>,
	pending: Option<std::vec::IntoIter<(HKey, Vec<u8>)>>,
	current_hkey: Option<HKey>,
}

impl<'a, C: Cursor + HKeyedCursor, A: Adapter> BranchLookup<'a, C, A> {
	pub fn new(child: C, adapter: &'a A, tables: Vec<u64>) -> Self {
		BranchLookup { child, adapter, tables, pending: None, current_hkey: None }
	}
}

impl<'a, C: Cursor + HKeyedCursor, A: Adapter> Cursor for BranchLookup<'a, C, A> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			if let Some(pending) = self.pending.as_mut() {
				if let Some((hkey, row)) = pending.next() {
					self.current_hkey = Some(hkey);
					return Ok(Next::Row(row));
				}
				self.pending = None;
			}

			match self.child.next()? {
				Next::Row(_) => {
					let root = self.child.current_hkey();
					let branch = collect_branch(self.adapter, &root, &self.tables)?;
					self.pending = Some(branch.into_iter());
				}
				Next::End => return Ok(Next::End),
			}
		}
	}

	fn close(&mut self) -> Result<()> {
		self.child.close()
	}
}

impl<'a, C: Cursor + HKeyedCursor, A: Adapter> HKeyedCursor for BranchLookup<'a, C, A> {
	fn current_hkey(&self) -> HKey {
		self.current_hkey.clone().expect("current_hkey called before the first successful next()")
	}
}

/// `branchLookup_Nested(group, tables, hKeyBindingPosition)`: the
/// correlated-subquery form, built fresh per outer row by
/// `map_NestedLoops`'s `make_inner`, given the root hkey directly rather
/// than reading it off a piped child cursor.
pub struct BranchLookupNested<'a, A: Adapter> {
	adapter: &'a A,
	root: HKey,
	tables: Vec<u64>,
	rows: Option<std::vec::IntoIter<Vec<u8>>>,
}

impl<'a, A: Adapter> BranchLookupNested<'a, A> {
	pub fn new(adapter: &'a A, root: HKey, tables: Vec<u64>) -> Self {
		BranchLookupNested { adapter, root, tables, rows: None }
	}
}

impl<'a, A: Adapter> Cursor for BranchLookupNested<'a, A> {
	fn open(&mut self) -> Result<()> {
		let branch = collect_branch(self.adapter, &self.root, &self.tables)?;
		self.rows = Some(branch.into_iter().map(|(_, row)| row).collect::<Vec<_>>().into_iter());
		Ok(())
	}

	fn next(&mut self) -> Result<Next> {
		let rows = self.rows.as_mut().expect("open must be called before next");
		match rows.next() {
			Some(row) => Ok(Next::Row(row)),
			None => Ok(Next::End),
		}
	}

	fn close(&mut self) -> Result<()> {
		self.rows = None;
		Ok(())
	}
}
