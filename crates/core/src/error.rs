// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use thiserror::Error;

/// Errors the row codec and operator tree can raise.
///
/// Every variant maps to an error kind named in spec.md §7; operators
/// propagate these with `?` and the root cursor (C8) converts an escaping
/// error into a close-then-rethrow per the Root cursor contract.
#[derive(Debug, Error)]
pub enum Error {
	/// A row's leading/trailing length, signature, or field count failed
	/// the structural checks in §6.1 during decode.
	#[error("corrupt row: {0}")]
	CorruptRow(String),

	/// A value could not be encoded into, or decoded out of, its
	/// declared field type (e.g. a field-count or offset mismatch that
	/// is detected before the row-level structural check).
	#[error("encoding error: {0}")]
	EncodingError(String),

	/// A mutation was attempted on a row backed by a caller-supplied
	/// buffer that the codec is not permitted to grow or move (spec.md
	/// §6.3's buffer-growth policy only applies to rows the codec
	/// allocated itself).
	#[error("row buffer is immutable and cannot grow to fit the new value")]
	BufferImmutableError,

	/// `next` or `close` was called on a cursor that already returned
	/// `close`.
	#[error("cursor is already closed")]
	CursorClosed,

	/// A bound parameter was read from the `Bindings` side-channel at a
	/// position nothing was ever bound to.
	#[error("no binding at position {0}")]
	BindingMissing(usize),

	/// An operator that requires its input ordered by hkey (e.g.
	/// `flatten_HKeyOrdered`, `select_HKeyOrdered`) observed two
	/// consecutive rows out of order.
	#[error("input violated the required hkey ordering")]
	OrderingViolation,

	/// The storage `Adapter` raised an error while servicing a scan or
	/// lookup. `rows_processed` records how many rows the failing
	/// operation had already produced before the error, so a caller
	/// counting partial progress does not double-count the failing row.
	#[error("adapter error after producing {rows_processed} row(s): {source}")]
	AdapterError {
		rows_processed: u64,
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
