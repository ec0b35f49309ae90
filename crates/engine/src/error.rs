// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use thiserror::Error;

/// Engine-level errors. Every row-codec or cursor-protocol failure is
/// wrapped from [`reifydb_core::Error`] rather than re-declared, so a
/// caller matching on `reifydb_core::Error` variants still works after it
/// bubbles up through an operator.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Core(#[from] reifydb_core::Error),

	/// An operator was asked to build a tree it cannot make sense of,
	/// e.g. a projection that names a field index past the input
	/// schema's field count. Distinct from a runtime `Error::Core`
	/// because it is a construction-time mistake, not a data-dependent
	/// failure.
	#[error("invalid operator configuration: {0}")]
	InvalidPlan(String),
}

pub type Result<T> = std::result::Result<T, Error>;
