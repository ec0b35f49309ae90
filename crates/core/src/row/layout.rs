// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::schema::RowDef;
use super::primitives::var_width;

/// Leading/trailing length field, in bytes: `u32 length + 2-byte signature
/// + u16 field count + u32 row_def_id` precede the null bitmap.
pub const HEADER_LEN: usize = 4 + 2 + 2 + 4;
/// `2-byte signature + u32 length` trail the row.
pub const TRAILER_LEN: usize = 2 + 4;
pub const MIN_ROW_LEN: usize = HEADER_LEN + TRAILER_LEN;

pub const LEADING_SIGNATURE: [u8; 2] = [b'A', b'B'];
pub const TRAILING_SIGNATURE: [u8; 2] = [b'B', b'A'];

/// Precomputed byte offsets derived from a [`RowDef`], so the codec doesn't
/// recompute a field's position on every access.
pub struct RowLayout {
	def: RowDef,
	/// Offset of each field's fixed-region bytes, relative to the start
	/// of the fixed region. `0` (unused) for a variable-size field.
	fixed_offsets: Vec<usize>,
	fixed_region_len: usize,
	/// Indices into `def.fields()` of the variable-size fields, in
	/// schema order.
	var_field_indices: Vec<usize>,
	/// Width (0..=3 bytes) of each variable field's offset-table slot, in
	/// the same order as `var_field_indices`. Per §6.1, slot `i`'s width
	/// is `varWidth` of the *cumulative* declared maximum payload size
	/// across variable fields `0..=i` — schema-derived, not dependent on
	/// any particular row's actual content, so every row sharing this
	/// schema lays out its offset table identically.
	var_widths: Vec<usize>,
	/// Byte offset of each variable field's slot within the offset
	/// table: the running sum of the preceding slots' widths.
	var_slot_offsets: Vec<usize>,
	/// Total size of the offset table: the sum of `var_widths`.
	var_table_len: usize,
}

impl RowLayout {
	pub fn new(def: RowDef) -> Self {
		let mut fixed_offsets = Vec::with_capacity(def.field_count());
		let mut var_field_indices = Vec::new();
		let mut cursor = 0usize;
		for (i, field) in def.fields().iter().enumerate() {
			match field.fixed_width() {
				Some(width) => {
					fixed_offsets.push(cursor);
					cursor += width;
				}
				None => {
					fixed_offsets.push(0);
					var_field_indices.push(i);
				}
			}
		}

		let mut var_widths = Vec::with_capacity(var_field_indices.len());
		let mut var_slot_offsets = Vec::with_capacity(var_field_indices.len());
		let mut cumulative_max = 0u32;
		let mut table_cursor = 0usize;
		for &field_index in &var_field_indices {
			cumulative_max += def.fields()[field_index].max_len() as u32;
			let width = var_width(cumulative_max);
			var_slot_offsets.push(table_cursor);
			var_widths.push(width);
			table_cursor += width;
		}
		let var_table_len = table_cursor;

		RowLayout {
			def,
			fixed_offsets,
			fixed_region_len: cursor,
			var_field_indices,
			var_widths,
			var_slot_offsets,
			var_table_len,
		}
	}

	pub fn def(&self) -> &RowDef {
		&self.def
	}

	pub fn null_bitmap_offset(&self) -> usize {
		HEADER_LEN
	}

	pub fn fixed_region_offset(&self) -> usize {
		self.null_bitmap_offset() + self.def.null_bitmap_bytes()
	}

	pub fn fixed_region_len(&self) -> usize {
		self.fixed_region_len
	}

	/// Absolute byte offset of fixed field `index` within an encoded row.
	pub fn fixed_field_offset(&self, index: usize) -> usize {
		self.fixed_region_offset() + self.fixed_offsets[index]
	}

	pub fn var_field_indices(&self) -> &[usize] {
		&self.var_field_indices
	}

	/// Position of variable field `field_index` within the variable
	/// fields only (0-based), used to index into the offset table.
	pub fn var_position(&self, field_index: usize) -> usize {
		self.var_field_indices.iter().position(|&i| i == field_index).expect("not a variable field")
	}

	/// Width, in bytes, of the offset-table slot at variable-field
	/// position `pos` (0-based among variable fields).
	pub fn var_width_at(&self, pos: usize) -> usize {
		self.var_widths[pos]
	}

	/// Byte offset of variable-field position `pos`'s slot within the
	/// offset table (relative to the table's start).
	pub fn var_slot_offset(&self, pos: usize) -> usize {
		self.var_slot_offsets[pos]
	}

	/// Total size of the offset table, in bytes.
	pub fn var_table_len(&self) -> usize {
		self.var_table_len
	}
}
