// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! The binary row envelope: construct, parse, iterate, copy, project
//! (spec.md §6.1, "C4"). Built on the byte primitives in
//! [`super::primitives`] and the offsets [`super::layout::RowLayout`]
//! precomputes from a [`crate::schema::RowDef`].

use reifydb_type::{Date, Interval, Time, Type, Value};

use super::layout::{HEADER_LEN, LEADING_SIGNATURE, MIN_ROW_LEN, RowLayout, TRAILER_LEN, TRAILING_SIGNATURE};
use super::primitives::{is_bit_set, read_u16, read_u32, read_uint, set_bit, write_u16, write_u32, write_uint};
use crate::error::{Error, Result};

/// Encodes `values` (one per field, in schema order, `Value::Undefined` for
/// a null) into a new self-describing row under `layout`.
pub fn encode(layout: &RowLayout, values: &[Value], max_row_bytes: usize) -> Result<Vec<u8>> {
	let def = layout.def();
	if values.len() != def.field_count() {
		return Err(Error::EncodingError(format!(
			"expected {} values, got {}",
			def.field_count(),
			values.len()
		)));
	}

	let mut var_payloads: Vec<&[u8]> = Vec::with_capacity(layout.var_field_indices().len());
	for &field_index in layout.var_field_indices() {
		let field = &def.fields()[field_index];
		let payload: &[u8] = match &values[field_index] {
			Value::Undefined => &[],
			Value::Utf8(s) if field.r#type == Type::Utf8 => s.as_bytes(),
			Value::Blob(b) if field.r#type == Type::Blob => b.as_slice(),
			other => {
				return Err(Error::EncodingError(format!(
					"field {field_index} expects {:?}, got {:?}",
					field.r#type, other
				)));
			}
		};
		if payload.len() > field.max_len() {
			return Err(Error::EncodingError(format!(
				"field {field_index} payload of {} bytes exceeds max_len {}",
				payload.len(),
				field.max_len()
			)));
		}
		var_payloads.push(payload);
	}

	let total_var_bytes: usize = var_payloads.iter().map(|p| p.len()).sum();
	let offset_table_len = layout.var_table_len();

	let total_len = HEADER_LEN
		+ def.null_bitmap_bytes()
		+ layout.fixed_region_len()
		+ offset_table_len
		+ total_var_bytes
		+ TRAILER_LEN;
	if total_len > max_row_bytes {
		return Err(Error::EncodingError(format!(
			"encoded row of {total_len} bytes exceeds the {max_row_bytes}-byte limit"
		)));
	}

	let mut buf = vec![0u8; total_len];
	write_u32(&mut buf, 0, total_len as u32);
	buf[4..6].copy_from_slice(&LEADING_SIGNATURE);
	write_u16(&mut buf, 6, def.field_count() as u16);
	write_u32(&mut buf, 8, def.row_def_id());

	let bitmap_offset = layout.null_bitmap_offset();
	let bitmap_end = bitmap_offset + def.null_bitmap_bytes();
	for (i, value) in values.iter().enumerate() {
		if matches!(value, Value::Undefined) {
			set_bit(&mut buf[bitmap_offset..bitmap_end], i);
		}
	}

	for (field_index, field) in def.fields().iter().enumerate() {
		let Some(width) = field.fixed_width() else { continue };
		if matches!(values[field_index], Value::Undefined) {
			continue;
		}
		let offset = layout.fixed_field_offset(field_index);
		write_fixed(&mut buf[offset..offset + width], &values[field_index], field.r#type)?;
	}

	let table_offset = layout.fixed_region_offset() + layout.fixed_region_len();
	let payload_area_offset = table_offset + offset_table_len;
	let mut cursor = 0u32;
	let mut payload_write = payload_area_offset;
	for (pos, payload) in var_payloads.iter().enumerate() {
		cursor += payload.len() as u32;
		let width = layout.var_width_at(pos);
		if width > 0 {
			write_uint(&mut buf, table_offset + layout.var_slot_offset(pos), cursor, width);
		}
		buf[payload_write..payload_write + payload.len()].copy_from_slice(payload);
		payload_write += payload.len();
	}

	let trailer_offset = total_len - TRAILER_LEN;
	buf[trailer_offset..trailer_offset + 2].copy_from_slice(&TRAILING_SIGNATURE);
	write_u32(&mut buf, trailer_offset + 2, total_len as u32);

	Ok(buf)
}

/// Encodes `values` and appends the row to `buf`, reusing `buf`'s existing
/// capacity where it fits (spec.md §6.1's buffer-growth policy for rows
/// packed sequentially into one shared buffer). Returns the row's start
/// offset within `buf`.
///
/// `grow_buffer` requests retry-on-overflow: when the row doesn't fit in
/// `buf`'s spare capacity, double the capacity (or reserve 500 bytes if
/// `buf` is empty) and retry, repeating until it fits. Passing `false`
/// treats `buf` as embedded inside a larger, shared allocation that must
/// never move; overflowing its capacity in that mode fails with
/// [`Error::BufferImmutableError`] instead of reallocating.
pub fn encode_into(
	buf: &mut Vec<u8>,
	layout: &RowLayout,
	values: &[Value],
	max_row_bytes: usize,
	grow_buffer: bool,
) -> Result<usize> {
	let row = encode(layout, values, max_row_bytes)?;
	let start = buf.len();
	let needed = start + row.len();
	if needed > buf.capacity() {
		if !grow_buffer {
			return Err(Error::BufferImmutableError);
		}
		let mut new_capacity = if buf.capacity() == 0 { 500 } else { buf.capacity() * 2 };
		while new_capacity < needed {
			new_capacity *= 2;
		}
		buf.reserve(new_capacity - buf.len());
	}
	buf.extend_from_slice(&row);
	Ok(start)
}

fn write_fixed(dst: &mut [u8], value: &Value, expected: Type) -> Result<()> {
	macro_rules! put {
		($variant:ident, $ty:ty) => {
			match value {
				Value::$variant(v) => {
					dst.copy_from_slice(&v.to_le_bytes());
					Ok(())
				}
				other => Err(Error::EncodingError(format!("expected {expected:?}, got {other:?}"))),
			}
		};
	}
	match expected {
		Type::Bool => match value {
			Value::Bool(b) => {
				dst[0] = *b as u8;
				Ok(())
			}
			other => Err(Error::EncodingError(format!("expected Bool, got {other:?}"))),
		},
		Type::Int1 => put!(Int1, i8),
		Type::Int2 => put!(Int2, i16),
		Type::Int4 => put!(Int4, i32),
		Type::Int8 => put!(Int8, i64),
		Type::Int16 => put!(Int16, i128),
		Type::Uint1 => put!(Uint1, u8),
		Type::Uint2 => put!(Uint2, u16),
		Type::Uint4 => put!(Uint4, u32),
		Type::Uint8 => put!(Uint8, u64),
		Type::Uint16 => put!(Uint16, u128),
		Type::Float4 => match value {
			Value::Float4(f) => {
				dst.copy_from_slice(&f.to_le_bytes());
				Ok(())
			}
			other => Err(Error::EncodingError(format!("expected Float4, got {other:?}"))),
		},
		Type::Float8 => match value {
			Value::Float8(f) => {
				dst.copy_from_slice(&f.to_le_bytes());
				Ok(())
			}
			other => Err(Error::EncodingError(format!("expected Float8, got {other:?}"))),
		},
		Type::Date => match value {
			Value::Date(d) => {
				dst.copy_from_slice(&d.days_since_epoch().to_le_bytes());
				Ok(())
			}
			other => Err(Error::EncodingError(format!("expected Date, got {other:?}"))),
		},
		Type::Time => match value {
			Value::Time(t) => {
				dst.copy_from_slice(&t.nanos_of_day().to_le_bytes());
				Ok(())
			}
			other => Err(Error::EncodingError(format!("expected Time, got {other:?}"))),
		},
		Type::Interval => match value {
			Value::Interval(v) => {
				dst.copy_from_slice(&v.nanos().to_le_bytes());
				Ok(())
			}
			other => Err(Error::EncodingError(format!("expected Interval, got {other:?}"))),
		},
		Type::Decimal | Type::Cursor | Type::Utf8 | Type::Blob => {
			Err(Error::EncodingError(format!("{expected:?} is not a fixed-width scalar")))
		}
	}
}

/// Reads a row's `row_def_id` straight out of its header, without parsing it
/// against any particular schema. Operators that classify a row's type at
/// runtime (`filter_Default`'s `keepTypes`, `project_Default`'s input-type
/// gate, `sort_InsertionLimited`'s `sortType` bypass) use this instead of a
/// full [`RowView::parse`], since the row in hand may not match the layout
/// they hold.
pub fn peek_row_def_id(bytes: &[u8]) -> u32 {
	read_u32(bytes, 8)
}

/// A zero-copy, read-only view over a previously encoded row.
pub struct RowView<'a> {
	layout: &'a RowLayout,
	bytes: &'a [u8],
}

impl<'a> RowView<'a> {
	/// Parses `bytes` as a row under `layout`, validating every
	/// structural invariant from §6.1. Returns [`Error::CorruptRow`] on
	/// the first violation found.
	pub fn parse(layout: &'a RowLayout, bytes: &'a [u8], max_row_bytes: usize) -> Result<Self> {
		if bytes.len() < MIN_ROW_LEN {
			return Err(Error::CorruptRow(format!("row of {} bytes is shorter than the minimum {MIN_ROW_LEN}", bytes.len())));
		}
		let leading_len = read_u32(bytes, 0) as usize;
		if leading_len != bytes.len() || leading_len < MIN_ROW_LEN || leading_len > max_row_bytes {
			return Err(Error::CorruptRow(format!(
				"leading length {leading_len} does not match buffer of {} bytes",
				bytes.len()
			)));
		}
		if bytes[4..6] != LEADING_SIGNATURE {
			return Err(Error::CorruptRow("bad leading signature".into()));
		}
		let field_count = read_u16(bytes, 6) as usize;
		if field_count != layout.def().field_count() {
			return Err(Error::CorruptRow(format!(
				"field count {field_count} does not match schema's {}",
				layout.def().field_count()
			)));
		}
		let row_def_id = read_u32(bytes, 8);
		if row_def_id != layout.def().row_def_id() {
			return Err(Error::CorruptRow(format!(
				"row_def_id {row_def_id} does not match schema's {}",
				layout.def().row_def_id()
			)));
		}
		let trailer_offset = leading_len - TRAILER_LEN;
		if bytes[trailer_offset..trailer_offset + 2] != TRAILING_SIGNATURE {
			return Err(Error::CorruptRow("bad trailing signature".into()));
		}
		let trailing_len = read_u32(bytes, trailer_offset + 2) as usize;
		if trailing_len != leading_len {
			return Err(Error::CorruptRow(format!(
				"trailing length {trailing_len} does not match leading length {leading_len}"
			)));
		}

		let remaining = trailer_offset - layout.fixed_region_offset() - layout.fixed_region_len();
		let table_len = layout.var_table_len();
		let payload_len = remaining.checked_sub(table_len).ok_or_else(|| {
			Error::CorruptRow(format!(
				"variable region of {remaining} bytes is shorter than the schema's {table_len}-byte offset table"
			))
		})?;
		let n_var = layout.var_field_indices().len();
		if n_var == 0 {
			if payload_len != 0 {
				return Err(Error::CorruptRow("non-empty variable region with no offset table".into()));
			}
		} else {
			let table_offset = layout.fixed_region_offset() + layout.fixed_region_len();
			let last_pos = n_var - 1;
			let last_width = layout.var_width_at(last_pos);
			let last_offset = if last_width == 0 {
				0
			} else {
				read_uint(bytes, table_offset + layout.var_slot_offset(last_pos), last_width) as usize
			};
			if last_offset != payload_len {
				return Err(Error::CorruptRow(format!(
					"offset table's final entry {last_offset} does not match variable payload length {payload_len}"
				)));
			}
		}

		Ok(RowView { layout, bytes })
	}

	pub fn is_defined(&self, field_index: usize) -> bool {
		let bitmap = &self.bytes[self.layout.null_bitmap_offset()..self.layout.fixed_region_offset()];
		!is_bit_set(bitmap, field_index)
	}

	fn fixed_bytes(&self, field_index: usize) -> &'a [u8] {
		let width = self.layout.def().fields()[field_index].fixed_width().expect("fixed field");
		let offset = self.layout.fixed_field_offset(field_index);
		&self.bytes[offset..offset + width]
	}

	pub fn get_bool(&self, field_index: usize) -> bool {
		self.fixed_bytes(field_index)[0] != 0
	}

	pub fn try_get_bool(&self, field_index: usize) -> Option<bool> {
		self.is_defined(field_index).then(|| self.get_bool(field_index))
	}

	pub fn get_i32(&self, field_index: usize) -> i32 {
		i32::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())
	}

	pub fn try_get_i32(&self, field_index: usize) -> Option<i32> {
		self.is_defined(field_index).then(|| self.get_i32(field_index))
	}

	pub fn get_i64(&self, field_index: usize) -> i64 {
		i64::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())
	}

	pub fn get_u64(&self, field_index: usize) -> u64 {
		u64::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())
	}

	pub fn get_f32(&self, field_index: usize) -> f32 {
		f32::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())
	}

	pub fn get_f64(&self, field_index: usize) -> f64 {
		f64::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())
	}

	pub fn get_date(&self, field_index: usize) -> Date {
		Date(i32::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap()))
	}

	pub fn get_time(&self, field_index: usize) -> Time {
		Time(u64::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap()))
	}

	pub fn get_interval(&self, field_index: usize) -> Interval {
		Interval(i64::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap()))
	}

	fn var_bytes(&self, field_index: usize) -> &'a [u8] {
		let pos = self.layout.var_position(field_index);
		let table_offset = self.layout.fixed_region_offset() + self.layout.fixed_region_len();
		let payload_area_offset = table_offset + self.layout.var_table_len();
		let width = self.layout.var_width_at(pos);
		let end = if width == 0 {
			0
		} else {
			read_uint(self.bytes, table_offset + self.layout.var_slot_offset(pos), width) as usize
		};
		let start = if pos == 0 {
			0
		} else {
			let prev_width = self.layout.var_width_at(pos - 1);
			if prev_width == 0 {
				0
			} else {
				read_uint(self.bytes, table_offset + self.layout.var_slot_offset(pos - 1), prev_width) as usize
			}
		};
		&self.bytes[payload_area_offset + start..payload_area_offset + end]
	}

	pub fn get_utf8(&self, field_index: usize) -> &'a str {
		std::str::from_utf8(self.var_bytes(field_index)).expect("stored utf8 field is not valid utf8")
	}

	pub fn try_get_utf8(&self, field_index: usize) -> Option<&'a str> {
		self.is_defined(field_index).then(|| self.get_utf8(field_index))
	}

	pub fn get_blob(&self, field_index: usize) -> &'a [u8] {
		self.var_bytes(field_index)
	}

	pub fn try_get_blob(&self, field_index: usize) -> Option<&'a [u8]> {
		self.is_defined(field_index).then(|| self.get_blob(field_index))
	}

	/// Reads every field into an owned [`Value`], in schema order. The
	/// iteration operation from spec.md §6.1's "construct/parse/
	/// iterate/copy/project" list.
	pub fn iter_values(&self) -> Vec<Value> {
		(0..self.layout.def().field_count())
			.map(|i| self.value_at(i))
			.collect()
	}

	fn value_at(&self, field_index: usize) -> Value {
		if !self.is_defined(field_index) {
			return Value::Undefined;
		}
		match self.layout.def().fields()[field_index].r#type {
			Type::Bool => Value::Bool(self.get_bool(field_index)),
			Type::Int1 => Value::Int1(self.fixed_bytes(field_index)[0] as i8),
			Type::Int2 => Value::Int2(i16::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Int4 => Value::Int4(self.get_i32(field_index)),
			Type::Int8 => Value::Int8(self.get_i64(field_index)),
			Type::Int16 => Value::Int16(i128::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Uint1 => Value::Uint1(self.fixed_bytes(field_index)[0]),
			Type::Uint2 => Value::Uint2(u16::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Uint4 => Value::Uint4(u32::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Uint8 => Value::Uint8(u64::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Uint16 => Value::Uint16(u128::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Float4 => Value::Float4(f32::from_le_bytes(self.fixed_bytes(field_index).try_into().unwrap())),
			Type::Float8 => Value::Float8(self.get_f64(field_index)),
			Type::Date => Value::Date(self.get_date(field_index)),
			Type::Time => Value::Time(self.get_time(field_index)),
			Type::Interval => Value::Interval(self.get_interval(field_index)),
			Type::Utf8 => Value::Utf8(self.get_utf8(field_index).to_string()),
			Type::Blob => Value::Blob(self.get_blob(field_index).to_vec()),
			Type::Decimal | Type::Cursor => Value::Undefined,
		}
	}
}

/// Projects a subset of fields (named by index into the source schema) into
/// a freshly encoded row under `target`, whose field list must be exactly
/// `fields` in order. The copy/project operation from §6.1.
pub fn project(source: &RowView, fields: &[usize], target: &RowLayout, max_row_bytes: usize) -> Result<Vec<u8>> {
	let values: Vec<Value> = fields.iter().map(|&i| source.value_at(i)).collect();
	encode(target, &values, max_row_bytes)
}
