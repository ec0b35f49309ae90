// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Stress tests exercising every scalar type together in one row.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Date, Interval, Time, Type, Value};

const MAX: usize = 8 * 1024 * 1024;

fn all_scalar_types() -> Vec<FieldDef> {
	vec![
		FieldDef::fixed(Type::Bool),
		FieldDef::fixed(Type::Int1),
		FieldDef::fixed(Type::Int2),
		FieldDef::fixed(Type::Int4),
		FieldDef::fixed(Type::Int8),
		FieldDef::fixed(Type::Int16),
		FieldDef::fixed(Type::Uint1),
		FieldDef::fixed(Type::Uint2),
		FieldDef::fixed(Type::Uint4),
		FieldDef::fixed(Type::Uint8),
		FieldDef::fixed(Type::Uint16),
		FieldDef::fixed(Type::Float4),
		FieldDef::fixed(Type::Float8),
		FieldDef::fixed(Type::Date),
		FieldDef::fixed(Type::Time),
		FieldDef::fixed(Type::Interval),
		FieldDef::variable(Type::Utf8, 128),
		FieldDef::variable(Type::Blob, 128),
	]
}

fn all_scalar_values() -> Vec<Value> {
	vec![
		Value::Bool(true),
		Value::Int1(-1),
		Value::Int2(-2),
		Value::Int4(-3),
		Value::Int8(-4),
		Value::Int16(-5),
		Value::Uint1(1),
		Value::Uint2(2),
		Value::Uint4(3),
		Value::Uint8(4),
		Value::Uint16(5),
		Value::Float4(1.5),
		Value::Float8(2.5),
		Value::Date(Date::from_ymd(2024, 1, 1).unwrap()),
		Value::Time(Time::from_hms(1, 2, 3).unwrap()),
		Value::Interval(Interval::from_nanos(-1)),
		Value::Utf8("mixed".into()),
		Value::Blob(vec![9, 8, 7]),
	]
}

#[test]
fn every_scalar_type_round_trips_together_in_one_row() {
	let layout = RowLayout::new(RowDef::new(1, all_scalar_types()));
	let values = all_scalar_values();
	let buf = encode(&layout, &values, MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert_eq!(view.iter_values(), values);
}

#[test]
fn many_rows_with_alternating_undefined_fields_stay_independent() {
	let layout = RowLayout::new(RowDef::new(1, all_scalar_types()));
	for defined in [true, false] {
		let values: Vec<Value> =
			if defined { all_scalar_values() } else { vec![Value::Undefined; all_scalar_types().len()] };
		let buf = encode(&layout, &values, MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.iter_values(), values);
	}
}

#[test]
fn a_wide_row_of_many_small_variable_fields_stays_consistent() {
	let field_count = 64;
	let def = RowDef::new(1, vec![FieldDef::variable(Type::Utf8, 16); field_count]);
	let layout = RowLayout::new(def);
	let values: Vec<Value> = (0..field_count).map(|i| Value::Utf8(format!("v{i}"))).collect();
	let buf = encode(&layout, &values, MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	for i in 0..field_count {
		assert_eq!(view.get_utf8(i), format!("v{i}"));
	}
}
