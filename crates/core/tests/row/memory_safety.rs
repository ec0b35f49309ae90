// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Memory safety edge cases: unaligned field offsets, odd field counts,
//! buffers right at the minimum/near-maximum length.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Type, Value};

const MAX: usize = 8 * 1024 * 1024;

#[test]
fn every_fixed_width_reads_back_correctly_at_every_odd_byte_offset() {
	// A leading Bool (1 byte) pushes every following fixed field's start
	// offset off whatever natural alignment its width would otherwise
	// suggest.
	let def = RowDef::new(
		1,
		vec![
			FieldDef::fixed(Type::Bool),
			FieldDef::fixed(Type::Int2),
			FieldDef::fixed(Type::Int4),
			FieldDef::fixed(Type::Int8),
			FieldDef::fixed(Type::Int16),
		],
	);
	let layout = RowLayout::new(def);
	let values = vec![Value::Bool(true), Value::Int2(-2), Value::Int4(-4), Value::Int8(-8), Value::Int16(-16)];
	let buf = encode(&layout, &values, MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert!(view.get_bool(0));
	assert_eq!(view.get_i32(2), -4);
	assert_eq!(view.get_i64(3), -8);
}

#[test]
fn minimal_empty_row_is_exactly_the_header_and_trailer() {
	let layout = RowLayout::new(RowDef::new(1, vec![]));
	let buf = encode(&layout, &[], MAX).unwrap();
	assert_eq!(buf.len(), 18);
	assert!(RowView::parse(&layout, &buf, MAX).is_ok());
}

#[test]
fn zero_length_variable_payloads_still_reserve_a_schema_sized_offset_table() {
	// The offset table's width is a property of the schema's declared
	// maximum sizes, not of what's actually written: cumulative maxes
	// 64, 128, 192, 256 need widths 1, 1, 1, 2, so the table is 5 bytes
	// even though every payload here is empty.
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::variable(Type::Utf8, 64); 4]));
	let values = vec![Value::Utf8(String::new()); 4];
	let buf = encode(&layout, &values, MAX).unwrap();
	// header(12) + null bitmap(1) + offset table(5) + trailer(6), no fixed region, no payload bytes.
	assert_eq!(buf.len(), 12 + 1 + 5 + 6);
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert_eq!(view.get_utf8(0), "");
	assert_eq!(view.get_utf8(3), "");
}

#[test]
fn a_schema_with_no_variable_fields_allocates_no_offset_table() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Int4)]));
	let buf = encode(&layout, &[Value::Int4(1)], MAX).unwrap();
	// header(12) + null bitmap(1) + fixed(4) + trailer(6), no offset table.
	assert_eq!(buf.len(), 12 + 1 + 4 + 6);
}
