// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Cursor, Next, Result, peek_row_def_id};

/// `sort_InsertionLimited(input, sortType, ordering, limit)`: maintains a
/// capacity-`limit` container ordered by `ordering`, insertion-sorted so a
/// caller that only wants the first few rows never pays for a full sort.
/// Rows whose `row_def_id` ≠ `sort_type` bypass the sort entirely and are
/// emitted, in arrival order, after the sorted batch.
///
/// Once the buffer holds `capacity` rows, a newly inserted row's worst
/// competitor (the current last element) is evicted — the buffer never
/// grows past `capacity`.
pub struct SortInsertionLimited<C, K, F> {
	child: C,
	key_of: F,
	capacity: usize,
	sort_type: u32,
	buffered: Vec<(K, Vec<u8>)>,
	bypassed: Vec<Vec<u8>>,
	sorted: Option<std::vec::IntoIter<Vec<u8>>>,
}

impl<C: Cursor, K: Ord, F: FnMut(&[u8]) -> K> SortInsertionLimited<C, K, F> {
	pub fn new(child: C, sort_type: u32, capacity: usize, key_of: F) -> Self {
		SortInsertionLimited {
			child,
			key_of,
			capacity,
			sort_type,
			buffered: Vec::with_capacity(capacity.min(1024)),
			bypassed: Vec::new(),
			sorted: None,
		}
	}
}

impl<C: Cursor, K: Ord, F: FnMut(&[u8]) -> K> Cursor for SortInsertionLimited<C, K, F> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		if self.sorted.is_none() {
			loop {
				match self.child.next()? {
					Next::Row(row) => {
						if self.capacity > 0 && peek_row_def_id(&row) != self.sort_type {
							self.bypassed.push(row);
							continue;
						}
						let key = (self.key_of)(&row);
						let pos = self.buffered.partition_point(|(k, _)| k <= &key);
						if pos < self.capacity {
							self.buffered.insert(pos, (key, row));
							if self.buffered.len() > self.capacity {
								self.buffered.truncate(self.capacity);
							}
						}
					}
					Next::End => break,
				}
			}
			let mut rows: Vec<Vec<u8>> = std::mem::take(&mut self.buffered).into_iter().map(|(_, row)| row).collect();
			rows.append(&mut self.bypassed);
			self.sorted = Some(rows.into_iter());
		}
		Ok(match self.sorted.as_mut().unwrap().next() {
			Some(row) => Next::Row(row),
			None => Next::End,
		})
	}

	fn close(&mut self) -> Result<()> {
		self.sorted = None;
		self.child.close()
	}
}

/// `sort_Tree`: the unbounded variant of [`SortInsertionLimited`] — every
/// row of the matching `sort_type` is retained (spilling to external storage
/// is a storage-engine concern outside this crate), and output is identical
/// to the bounded sort with `capacity = usize::MAX`.
pub fn sort_tree<C: Cursor, K: Ord, F: FnMut(&[u8]) -> K>(child: C, sort_type: u32, key_of: F) -> SortInsertionLimited<C, K, F> {
	SortInsertionLimited::new(child, sort_type, usize::MAX, key_of)
}
