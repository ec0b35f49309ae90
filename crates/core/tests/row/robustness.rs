// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Robustness tests: error handling, malformed input, stability at scale.

use reifydb_core::error::Error;
use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Type, Value};

const MAX: usize = 8 * 1024 * 1024;

#[test]
fn wrong_field_count_is_rejected_before_touching_the_buffer() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Int4); 3]));
	let err = encode(&layout, &[Value::Int4(1)], MAX).unwrap_err();
	assert!(matches!(err, Error::EncodingError(_)));
}

#[test]
fn wrong_value_kind_for_a_fixed_field_is_rejected() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Int4)]));
	let err = encode(&layout, &[Value::Bool(true)], MAX).unwrap_err();
	assert!(matches!(err, Error::EncodingError(_)));
}

#[test]
fn mismatched_row_def_id_is_rejected_on_parse() {
	let writer = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Int4)]));
	let reader = RowLayout::new(RowDef::new(2, vec![FieldDef::fixed(Type::Int4)]));
	let buf = encode(&writer, &[Value::Int4(1)], MAX).unwrap();
	assert!(matches!(RowView::parse(&reader, &buf, MAX), Err(Error::CorruptRow(_))));
}

#[test]
fn mismatched_field_count_is_rejected_on_parse() {
	let writer = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Int4)]));
	let reader = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Int4), FieldDef::fixed(Type::Int4)]));
	let buf = encode(&writer, &[Value::Int4(1)], MAX).unwrap();
	assert!(matches!(RowView::parse(&reader, &buf, MAX), Err(Error::CorruptRow(_))));
}

#[test]
fn a_row_beyond_the_configured_limit_is_rejected_during_construction() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::variable(Type::Blob, 1024)]));
	let err = encode(&layout, &[Value::Blob(vec![0u8; 512])], 32).unwrap_err();
	assert!(matches!(err, Error::EncodingError(_)));
}

#[test]
fn a_row_of_one_thousand_fields_round_trips() {
	let field_count = 1000;
	let def = RowDef::new(1, vec![FieldDef::fixed(Type::Int4); field_count]);
	let layout = RowLayout::new(def);
	let values: Vec<Value> = (0..field_count).map(|i| Value::Int4(i as i32)).collect();
	let buf = encode(&layout, &values, MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	for i in (0..field_count).step_by(37) {
		assert_eq!(view.get_i32(i), i as i32);
	}
}
