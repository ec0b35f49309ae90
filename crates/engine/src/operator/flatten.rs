// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::collections::{HashSet, VecDeque};

use reifydb_core::{Adapter, Cursor, Error, Next};
use reifydb_type::{HKey, JoinVariant};

type Result<T> = reifydb_core::Result<T>;

/// A flattened row's wire shape: the parent's encoded bytes (absent under
/// `RIGHT`/`FULL` when no parent matched), then the matching child's
/// encoded bytes (absent under `LEFT`/`FULL` when no child matched).
/// Distinct from a `RowDef`-typed row — a flattened row's identity is the
/// structural `RowType::Flattened` rule (spec.md §5), not a schema the codec
/// validates against.
pub fn encode_flattened(parent: Option<&[u8]>, child: Option<&[u8]>) -> Vec<u8> {
	let parent = parent.unwrap_or(&[]);
	let child = child.unwrap_or(&[]);
	let mut out = Vec::with_capacity(8 + parent.len() + child.len());
	out.extend_from_slice(&(parent.len() as u32).to_le_bytes());
	out.extend_from_slice(parent);
	out.extend_from_slice(&(child.len() as u32).to_le_bytes());
	out.extend_from_slice(child);
	out
}

pub fn decode_flattened(row: &[u8]) -> (Option<&[u8]>, Option<&[u8]>) {
	let parent_len = u32::from_le_bytes(row[0..4].try_into().unwrap()) as usize;
	let parent = &row[4..4 + parent_len];
	let rest = &row[4 + parent_len..];
	let child_len = u32::from_le_bytes(rest[0..4].try_into().unwrap()) as usize;
	let child = &rest[4..4 + child_len];
	(if parent.is_empty() { None } else { Some(parent) }, if child.is_empty() { None } else { Some(child) })
}

/// `KEEP_PARENT` / `KEEP_CHILD` / `LEFT_JOIN_SHORTENS_HKEY` from spec.md
/// §4.2's `flatten_HKeyOrdered`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlattenFlags {
	/// Also emit the parent's own (unflattened) row alongside the
	/// flattened rows it produced.
	pub keep_parent: bool,
	/// Also emit each child's own (unflattened) row alongside the
	/// flattened row it was paired into.
	pub keep_child: bool,
	/// When the child side of a flattened row is absent, truncate that
	/// row's hkey to the parent's depth.
	pub left_join_shortens_hkey: bool,
}

/// A parent cursor that also exposes the hkey of the row it just produced,
/// which `FlattenHKeyOrdered` needs to look up that row's children.
pub trait HKeyedCursor: Cursor {
	fn current_hkey(&self) -> HKey;
}

/// `flatten_HKeyOrdered`: pairs each parent row with its children from
/// `child_table`, via `Adapter::branch_lookup`. The parent cursor must
/// already be ordered by hkey (the parent's own scan guarantees this);
/// [`Error::OrderingViolation`] is raised if two consecutive parent hkeys
/// are observed out of order.
///
/// Under `RIGHT`/`FULL`, once the parent stream ends, a second pass scans
/// `child_table` in full for rows whose immediate parent hkey was never
/// seen in the parent stream, and emits those as child-without-parent rows.
pub struct FlattenHKeyOrdered<'a, C, A: Adapter> {
	parent: C,
	adapter: &'a A,
	child_table: u64,
	join: JoinVariant,
	flags: FlattenFlags,
	last_parent_hkey: Option<HKey>,
	seen_parents: HashSet<HKey>,
	pending: VecDeque<Vec<u8>>,
	parent_exhausted: bool,
	orphans: Option<Box<dyn Iterator<Item = Result<(HKey, Vec<u8>)>> + 'a>>,
	current_hkey: Option<HKey>,
}

impl<'a, C: Cursor, A: Adapter> FlattenHKeyOrdered<'a, C, A> {
	pub fn new(parent: C, adapter: &'a A, child_table: u64, join: JoinVariant) -> Self {
		Self::with_flags(parent, adapter, child_table, join, FlattenFlags::default())
	}

	pub fn with_flags(parent: C, adapter: &'a A, child_table: u64, join: JoinVariant, flags: FlattenFlags) -> Self {
		FlattenHKeyOrdered {
			parent,
			adapter,
			child_table,
			join,
			flags,
			last_parent_hkey: None,
			seen_parents: HashSet::new(),
			pending: VecDeque::new(),
			parent_exhausted: false,
			orphans: None,
			current_hkey: None,
		}
	}

	fn wants_right(&self) -> bool {
		matches!(self.join, JoinVariant::Right | JoinVariant::Full)
	}

	fn wants_left(&self) -> bool {
		matches!(self.join, JoinVariant::Left | JoinVariant::Full)
	}
}

impl<'a, C: HKeyedCursor, A: Adapter> Cursor for FlattenHKeyOrdered<'a, C, A> {
	fn open(&mut self) -> Result<()> {
		self.parent.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			if let Some((hkey, row)) = self.pending_with_hkey() {
				self.current_hkey = Some(hkey);
				return Ok(Next::Row(row));
			}

			if !self.parent_exhausted {
				match self.parent.next()? {
					Next::Row(row) => {
						let hkey = self.parent.current_hkey();
						if let Some(last) = &self.last_parent_hkey {
							if hkey <= *last {
								return Err(Error::OrderingViolation);
							}
						}
						self.last_parent_hkey = Some(hkey.clone());
						self.seen_parents.insert(hkey.clone());

						let children: Vec<Vec<u8>> = self
							.adapter
							.branch_lookup(&hkey, self.child_table)?
							.collect::<Result<Vec<_>>>()?
							.into_iter()
							.map(|(_, row)| row)
							.collect();

						self.queue_parent(&hkey, &row, children);
						continue;
					}
					Next::End => {
						self.parent_exhausted = true;
						if self.wants_right() {
							self.orphans = Some(self.adapter.group_scan(self.child_table)?);
						}
						continue;
					}
				}
			}

			if self.wants_right() {
				if let Some(orphans) = self.orphans.as_mut() {
					match orphans.next() {
						Some(Ok((child_hkey, child_row))) => {
							let is_orphan = child_hkey.parent().map(|p| !self.seen_parents.contains(&p)).unwrap_or(true);
							if is_orphan {
								self.queue_orphan(&child_hkey, &child_row);
								continue;
							}
							continue;
						}
						Some(Err(err)) => return Err(err),
						None => return Ok(Next::End),
					}
				}
			}

			return Ok(Next::End);
		}
	}

	fn close(&mut self) -> Result<()> {
		self.orphans = None;
		self.parent.close()
	}
}

impl<'a, C: HKeyedCursor, A: Adapter> FlattenHKeyOrdered<'a, C, A> {
	/// Queues this pending row's emission alongside the hkey it should
	/// be reported under by `current_hkey`.
	fn push(&mut self, hkey_marker: HKey, row: Vec<u8>) {
		// The hkey is recovered at pop time by pairing queue position
		// with a parallel record; simplest to encode it inline.
		self.pending.push_back(encode_hkey_tagged(&hkey_marker, &row));
	}

	fn pending_with_hkey(&mut self) -> Option<(HKey, Vec<u8>)> {
		self.pending.pop_front().map(|tagged| decode_hkey_tagged(&tagged))
	}

	fn queue_parent(&mut self, parent_hkey: &HKey, parent_row: &[u8], children: Vec<Vec<u8>>) {
		if self.flags.keep_parent {
			self.push(parent_hkey.clone(), parent_row.to_vec());
		}
		if children.is_empty() {
			if self.wants_left() {
				let hkey = if self.flags.left_join_shortens_hkey { parent_hkey.truncate_to(parent_hkey.depth()) } else { parent_hkey.clone() };
				self.push(hkey, encode_flattened(Some(parent_row), None));
			}
			return;
		}
		for child in children {
			self.push(parent_hkey.clone(), encode_flattened(Some(parent_row), Some(&child)));
			if self.flags.keep_child {
				self.push(parent_hkey.clone(), child);
			}
		}
	}

	fn queue_orphan(&mut self, child_hkey: &HKey, child_row: &[u8]) {
		self.push(child_hkey.clone(), encode_flattened(None, Some(child_row)));
		if self.flags.keep_child {
			self.push(child_hkey.clone(), child_row.to_vec());
		}
	}
}

impl<'a, C: HKeyedCursor, A: Adapter> HKeyedCursor for FlattenHKeyOrdered<'a, C, A> {
	fn current_hkey(&self) -> HKey {
		self.current_hkey.clone().expect("current_hkey called before the first successful next()")
	}
}

/// Tags a queued row with the hkey it should be reported under, so the
/// pending queue can carry mixed raw/flattened rows without a second
/// parallel queue.
fn encode_hkey_tagged(hkey: &HKey, row: &[u8]) -> Vec<u8> {
	let segments: Vec<u64> = hkey.segments().iter().map(|s| s.0).collect();
	let mut out = Vec::with_capacity(4 + segments.len() * 8 + row.len());
	out.extend_from_slice(&(segments.len() as u32).to_le_bytes());
	for s in &segments {
		out.extend_from_slice(&s.to_le_bytes());
	}
	out.extend_from_slice(row);
	out
}

fn decode_hkey_tagged(tagged: &[u8]) -> (HKey, Vec<u8>) {
	let n = u32::from_le_bytes(tagged[0..4].try_into().unwrap()) as usize;
	let mut segments = Vec::with_capacity(n);
	let mut offset = 4;
	for _ in 0..n {
		segments.push(u64::from_le_bytes(tagged[offset..offset + 8].try_into().unwrap()));
		offset += 8;
	}
	(HKey::from_segments(segments), tagged[offset..].to_vec())
}
