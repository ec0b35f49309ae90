// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Float edge case tests for the row encoding system.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Type, Value};

const MAX: usize = 8 * 1024 * 1024;

#[test]
fn float4_special_values_preserve_their_exact_bit_pattern() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Float4)]));
	let values = [
		f32::NAN,
		f32::INFINITY,
		f32::NEG_INFINITY,
		f32::MIN,
		f32::MAX,
		f32::MIN_POSITIVE,
		-f32::MIN_POSITIVE,
		0.0_f32,
		-0.0_f32,
		f32::from_bits(0x7fc00001),
		f32::from_bits(0x00000001),
	];
	for value in values {
		let buf = encode(&layout, &[Value::Float4(value)], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_f32(0).to_bits(), value.to_bits());
	}
}

#[test]
fn float8_special_values_preserve_their_exact_bit_pattern() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Float8)]));
	let values = [
		f64::NAN,
		f64::INFINITY,
		f64::NEG_INFINITY,
		f64::MIN,
		f64::MAX,
		f64::MIN_POSITIVE,
		0.0_f64,
		-0.0_f64,
		f64::from_bits(0x7ff8000000000001),
	];
	for value in values {
		let buf = encode(&layout, &[Value::Float8(value)], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_f64(0).to_bits(), value.to_bits());
	}
}

#[test]
fn both_float_widths_coexist_in_one_row() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Float4), FieldDef::fixed(Type::Float8)]));
	let buf = encode(&layout, &[Value::Float4(1.5), Value::Float8(2.5)], MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert_eq!(view.get_f32(0), 1.5);
	assert_eq!(view.get_f64(1), 2.5);
}
