// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

/// Character set a variable-size text field decodes under.
///
/// Collation is explicitly out of scope (spec.md §1); this enum only names
/// the decoding, never orders strings by anything other than byte value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharSet {
	Utf8,
}
