// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::cmp::Ordering;

/// One segment of a hierarchical key: the ordinal position of a row within
/// its parent, at one level of the group's nesting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeySegment(pub u64);

/// A hierarchical key: the root-to-leaf path that orders a row within its
/// table group, per spec.md §2. Two hkeys compare lexicographically segment
/// by segment, shorter-is-smaller on a shared prefix, matching groupScan's
/// required iteration order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct HKey(Vec<KeySegment>);

impl HKey {
	pub fn root() -> Self {
		HKey(Vec::new())
	}

	pub fn from_segments(segments: impl IntoIterator<Item = u64>) -> Self {
		HKey(segments.into_iter().map(KeySegment).collect())
	}

	pub fn segments(&self) -> &[KeySegment] {
		&self.0
	}

	pub fn depth(&self) -> usize {
		self.0.len()
	}

	/// Appends a child segment, producing the hkey of a row one level
	/// deeper in the group.
	pub fn child(&self, segment: u64) -> Self {
		let mut segments = self.0.clone();
		segments.push(KeySegment(segment));
		HKey(segments)
	}

	/// Whether `self` is `other`, or a descendant of `other`, in the
	/// group hierarchy.
	pub fn is_descendant_of_or_equal(&self, other: &HKey) -> bool {
		self.0.len() >= other.0.len() && self.0[..other.0.len()] == other.0[..]
	}

	/// This hkey with its last segment removed — the hkey of the row one
	/// level up in the group hierarchy. `None` at the root.
	pub fn parent(&self) -> Option<HKey> {
		if self.0.is_empty() {
			None
		} else {
			Some(HKey(self.0[..self.0.len() - 1].to_vec()))
		}
	}

	/// Truncates this hkey to `depth` segments, discarding the rest.
	/// Used by `flatten_HKeyOrdered`'s `LEFT_JOIN_SHORTENS_HKEY` flag to
	/// collapse a flattened row's key back to its parent's length when
	/// the child side is absent.
	pub fn truncate_to(&self, depth: usize) -> HKey {
		HKey(self.0[..depth.min(self.0.len())].to_vec())
	}
}

impl PartialOrd for HKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for HKey {
	fn cmp(&self, other: &Self) -> Ordering {
		for (a, b) in self.0.iter().zip(other.0.iter()) {
			match a.0.cmp(&b.0) {
				Ordering::Equal => continue,
				ord => return ord,
			}
		}
		self.0.len().cmp(&other.0.len())
	}
}
