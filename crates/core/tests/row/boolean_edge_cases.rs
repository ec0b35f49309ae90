// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Boolean edge case tests for the row encoding system.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Type, Value};

const MAX: usize = 8 * 1024 * 1024;

#[test]
fn boolean_undefined_is_distinct_from_false() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Bool)]));

	let defined_false = encode(&layout, &[Value::Bool(false)], MAX).unwrap();
	let undefined = encode(&layout, &[Value::Undefined], MAX).unwrap();

	let defined_view = RowView::parse(&layout, &defined_false, MAX).unwrap();
	let undefined_view = RowView::parse(&layout, &undefined, MAX).unwrap();

	assert!(defined_view.is_defined(0));
	assert!(!defined_view.get_bool(0));
	assert!(!undefined_view.is_defined(0));
}

#[test]
fn eight_boolean_fields_pack_into_one_bitmap_byte_without_interfering() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Bool); 8]));
	let values: Vec<Value> = (0..8).map(|i| Value::Bool(i % 2 == 0)).collect();
	let buf = encode(&layout, &values, MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	for i in 0..8 {
		assert_eq!(view.get_bool(i), i % 2 == 0);
	}
}

#[test]
fn nine_boolean_fields_spill_into_a_second_bitmap_byte() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Bool); 9]));
	let mut values = vec![Value::Bool(false); 9];
	values[8] = Value::Undefined;
	let buf = encode(&layout, &values, MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert!(!view.is_defined(8));
	for i in 0..8 {
		assert!(view.is_defined(i));
	}
}
