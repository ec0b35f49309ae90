// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::sync::Arc;

/// The join semantics a flattened composite row was built under. Determines
/// how `flatten_HKeyOrdered` treats a parent or child with no match on the
/// other side; it does not reorder columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinVariant {
	/// Emit only parent+child pairs; a parent without children, or a
	/// child without a parent, contributes no row.
	Inner,
	/// Also emit a parent alone when it has no children, with the
	/// child's fields undefined.
	Left,
	/// Also emit a child alone when it has no parent, with the parent's
	/// fields undefined.
	Right,
	/// Union of `Left` and `Right`: both parent-without-children and
	/// child-without-parent are emitted alone.
	Full,
}

/// Identifies what shape of row a `RowDef` describes.
///
/// `Flattened` composes two row types under a join variant. Per spec.md §5,
/// two `Flattened` row types are equal iff their parent types, child types,
/// and join variants are all equal — the identity is structural, not
/// nominal.
#[derive(Clone, Debug, Eq, Hash)]
pub enum RowType {
	/// A physical table row, named by its table identifier.
	Table(u64),
	/// An index entry row, named by its index identifier.
	Index(u64),
	/// A composite row produced by flattening a parent and a child
	/// row type together.
	Flattened {
		parent: Arc<RowType>,
		child: Arc<RowType>,
		join: JoinVariant,
	},
}

impl RowType {
	pub fn flatten(parent: RowType, child: RowType, join: JoinVariant) -> Self {
		RowType::Flattened { parent: Arc::new(parent), child: Arc::new(child), join }
	}
}

impl PartialEq for RowType {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(RowType::Table(a), RowType::Table(b)) => a == b,
			(RowType::Index(a), RowType::Index(b)) => a == b,
			(
				RowType::Flattened { parent: p1, child: c1, join: j1 },
				RowType::Flattened { parent: p2, child: c2, join: j2 },
			) => j1 == j2 && p1 == p2 && c1 == c2,
			_ => false,
		}
	}
}
