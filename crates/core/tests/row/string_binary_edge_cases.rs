// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! String and binary data edge case tests for the row encoding system.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Type, Value};

const MAX: usize = 8 * 1024 * 1024;

#[test]
fn utf8_special_sequences_round_trip() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::variable(Type::Utf8, 32_768)]));
	let test_strings = [
		"",
		"a",
		"α",
		"中",
		"𝄞",
		"\0",
		"a\0b",
		"\n\r\t",
		"🎭🎨🎪",
		"\u{FEFF}",
		"a\u{0301}",
		&"x".repeat(10_000),
	];

	for test_str in test_strings {
		let buf = encode(&layout, &[Value::Utf8(test_str.to_string())], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_utf8(0), test_str, "failed for string: {test_str:?}");
	}
}

#[test]
fn blob_preserves_arbitrary_bytes_including_invalid_utf8() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::variable(Type::Blob, 256)]));
	let payloads: [&[u8]; 3] = [&[], &[0xff, 0xfe, 0x00, 0x80], &[0u8; 255]];
	for payload in payloads {
		let buf = encode(&layout, &[Value::Blob(payload.to_vec())], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_blob(0), payload);
	}
}

#[test]
fn empty_and_undefined_variable_fields_are_distinct() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::variable(Type::Utf8, 16)]));

	let empty = encode(&layout, &[Value::Utf8(String::new())], MAX).unwrap();
	let undefined = encode(&layout, &[Value::Undefined], MAX).unwrap();

	let empty_view = RowView::parse(&layout, &empty, MAX).unwrap();
	let undefined_view = RowView::parse(&layout, &undefined, MAX).unwrap();

	assert!(empty_view.is_defined(0));
	assert_eq!(empty_view.get_utf8(0), "");
	assert!(!undefined_view.is_defined(0));
}
