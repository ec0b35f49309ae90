// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Scalability tests: row sizes the codec must handle without surprises as
//! field count grows.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Date, Type, Value};

const MAX: usize = 8 * 1024 * 1024;

fn field_for(i: usize) -> FieldDef {
	match i % 8 {
		0 => FieldDef::fixed(Type::Bool),
		1 => FieldDef::fixed(Type::Int1),
		2 => FieldDef::fixed(Type::Int2),
		3 => FieldDef::fixed(Type::Int4),
		4 => FieldDef::fixed(Type::Int8),
		5 => FieldDef::fixed(Type::Float4),
		6 => FieldDef::fixed(Type::Date),
		_ => FieldDef::variable(Type::Utf8, 64),
	}
}

fn value_for(i: usize) -> Value {
	match i % 8 {
		0 => Value::Bool(true),
		1 => Value::Int1(42),
		2 => Value::Int2(1234),
		3 => Value::Int4(123_456),
		4 => Value::Int8(1_234_567_890),
		5 => Value::Float4(1.5),
		6 => Value::Date(Date::from_ymd(2024, 6, 15).unwrap()),
		_ => Value::Utf8(format!("field-{i}")),
	}
}

#[test]
fn growing_field_counts_all_round_trip() {
	for count in [10, 50, 100, 200, 500] {
		let fields: Vec<FieldDef> = (0..count).map(field_for).collect();
		let layout = RowLayout::new(RowDef::new(1, fields));
		let values: Vec<Value> = (0..count).map(value_for).collect();
		let buf = encode(&layout, &values, MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.iter_values(), values, "mismatch at field count {count}");
	}
}

#[test]
fn a_single_field_near_the_row_size_limit_still_encodes() {
	let limit = 64 * 1024;
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::variable(Type::Blob, limit)]));
	let payload = vec![7u8; limit - 1];
	let buf = encode(&layout, &[Value::Blob(payload.clone())], MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert_eq!(view.get_blob(0), payload.as_slice());
}
