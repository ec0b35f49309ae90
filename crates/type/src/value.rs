// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;

use crate::{Date, Interval, Time, Type};

/// Opaque handle to a cursor bound into a row, per spec.md §9. The value
/// itself carries no cursor behavior; it only identifies which open cursor
/// a `Cursor`-typed field refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CursorHandle(pub u64);

/// Coarse family a [`Value`] belongs to, used to pick the conversion rules
/// two values of differing `Type` are compared or cast under. Distinct from
/// `Type` itself: `Int1`..`Int16` all share `ConversionType::Integer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConversionType {
	Bool,
	Integer,
	Decimal,
	Float,
	Temporal,
	Text,
	Binary,
	Cursor,
}

/// A value read back out of an encoded row, or fed into one, tagged by its
/// runtime kind. Unlike `Type`, which names a schema slot, `Value` carries
/// the data.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	Undefined,
	Bool(bool),
	Int1(i8),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Int16(i128),
	Uint1(u8),
	Uint2(u16),
	Uint4(u32),
	Uint8(u64),
	Uint16(u128),
	Float4(f32),
	Float8(f64),
	Decimal(BigDecimal),
	Date(Date),
	Time(Time),
	Interval(Interval),
	Utf8(String),
	Blob(Vec<u8>),
	Cursor(CursorHandle),
}

/// Hook a value's integer/float family hashes through, letting the caller
/// normalize widths (e.g. hash `Int1(3)` and `Int4(3)` identically) without
/// this crate depending on the adapter that owns that policy.
pub trait Adapter {
	fn hash_i128(&self, value: i128) -> u64;
	fn hash_u128(&self, value: u128) -> u64;
	fn hash_f64(&self, value: f64) -> u64;
}

/// Hook a text value's hash through a collation policy. Comparing/ordering
/// text is out of scope for this crate (spec.md §1); only hashing is.
pub trait Collator {
	fn hash_str(&self, value: &str) -> u64;
}

impl Value {
	pub fn conversion_type(&self) -> ConversionType {
		match self {
			Value::Undefined => ConversionType::Bool,
			Value::Bool(_) => ConversionType::Bool,
			Value::Int1(_)
			| Value::Int2(_)
			| Value::Int4(_)
			| Value::Int8(_)
			| Value::Int16(_)
			| Value::Uint1(_)
			| Value::Uint2(_)
			| Value::Uint4(_)
			| Value::Uint8(_)
			| Value::Uint16(_) => ConversionType::Integer,
			Value::Float4(_) | Value::Float8(_) => ConversionType::Float,
			Value::Decimal(_) => ConversionType::Decimal,
			Value::Date(_) | Value::Time(_) | Value::Interval(_) => ConversionType::Temporal,
			Value::Utf8(_) => ConversionType::Text,
			Value::Blob(_) => ConversionType::Binary,
			Value::Cursor(_) => ConversionType::Cursor,
		}
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Bool,
			Value::Bool(_) => Type::Bool,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Int16(_) => Type::Int16,
			Value::Uint1(_) => Type::Uint1,
			Value::Uint2(_) => Type::Uint2,
			Value::Uint4(_) => Type::Uint4,
			Value::Uint8(_) => Type::Uint8,
			Value::Uint16(_) => Type::Uint16,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::Decimal(_) => Type::Decimal,
			Value::Date(_) => Type::Date,
			Value::Time(_) => Type::Time,
			Value::Interval(_) => Type::Interval,
			Value::Utf8(_) => Type::Utf8,
			Value::Blob(_) => Type::Blob,
			Value::Cursor(_) => Type::Cursor,
		}
	}

	/// Hashes this value for use in a join/aggregate key, per spec.md §9's
	/// design note: `hash` is a capability of string-like variants only.
	/// `Utf8` hashes through `collator`; every other kind, including
	/// numeric and temporal ones, is defined as 0.
	pub fn hash(&self, _adapter: &impl Adapter, collator: &impl Collator) -> u64 {
		match self {
			Value::Utf8(v) => collator.hash_str(v),
			_ => 0,
		}
	}
}
