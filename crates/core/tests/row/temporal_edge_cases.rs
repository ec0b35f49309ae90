// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Temporal field edge cases for the row encoding system.

use reifydb_core::row::{RowLayout, encode, RowView};
use reifydb_core::schema::{FieldDef, RowDef};
use reifydb_type::{Date, Interval, Time, Type, Value};

const MAX: usize = 8 * 1024 * 1024;

#[test]
fn date_boundaries_round_trip() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Date)]));
	let dates = [
		Date::from_ymd(1, 1, 1).unwrap(),
		Date::from_ymd(1970, 1, 1).unwrap(),
		Date::from_ymd(2000, 2, 29).unwrap(),
		Date::from_ymd(2100, 2, 28).unwrap(),
		Date::from_ymd(9999, 12, 31).unwrap(),
	];
	for date in dates {
		let buf = encode(&layout, &[Value::Date(date)], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_date(0), date);
	}
}

#[test]
fn time_edge_values_round_trip() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Time)]));
	let times = [
		Time::from_hms(0, 0, 0).unwrap(),
		Time::from_hms(12, 0, 0).unwrap(),
		Time::from_hms(23, 59, 59).unwrap(),
	];
	for time in times {
		let buf = encode(&layout, &[Value::Time(time)], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_time(0), time);
	}
}

#[test]
fn interval_extremes_round_trip() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Interval)]));
	let intervals = [Interval::from_nanos(0), Interval::from_nanos(-1), Interval::from_nanos(i64::MAX), Interval::from_nanos(i64::MIN)];
	for interval in intervals {
		let buf = encode(&layout, &[Value::Interval(interval)], MAX).unwrap();
		let view = RowView::parse(&layout, &buf, MAX).unwrap();
		assert_eq!(view.get_interval(0), interval);
	}
}

#[test]
fn undefined_temporal_fields_are_distinguishable_from_epoch() {
	let layout = RowLayout::new(RowDef::new(1, vec![FieldDef::fixed(Type::Date)]));
	let buf = encode(&layout, &[Value::Undefined], MAX).unwrap();
	let view = RowView::parse(&layout, &buf, MAX).unwrap();
	assert!(!view.is_defined(0));
}
