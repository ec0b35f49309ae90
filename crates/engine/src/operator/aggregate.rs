// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::row::{RowView, encode};
use reifydb_core::{Cursor, Next, Result, RowLayout};
use reifydb_type::Value;

/// Per-run accumulator state for one column of `aggregate_Partial`'s output.
/// `factory` builds a fresh set of these at the start of every run.
pub trait Aggregator {
	fn step(&mut self, value: &Value);
	fn finish(&self) -> Value;
}

/// `aggregate_Partial(input, groupingFieldsCount, factory, aggregatorNames)`:
/// input is assumed sorted on its first `grouping_fields_count` fields. For
/// each maximal run of rows sharing those fields, accumulates one aggregator
/// per entry of `aggregate_fields` (the source field each one reads),
/// finalizing to a row of the grouping fields followed by each aggregator's
/// output, in `aggregate_fields` order — which is also the order
/// `aggregatorNames` names them in the emitted schema.
pub struct AggregatePartial<'a, C, F> {
	child: C,
	source: &'a RowLayout,
	target: &'a RowLayout,
	grouping_fields_count: usize,
	aggregate_fields: Vec<usize>,
	factory: F,
	max_row_bytes: usize,
	current_key: Option<Vec<Value>>,
	aggregators: Vec<Box<dyn Aggregator>>,
}

impl<'a, C: Cursor, F: FnMut() -> Vec<Box<dyn Aggregator>>> AggregatePartial<'a, C, F> {
	pub fn new(
		child: C,
		source: &'a RowLayout,
		target: &'a RowLayout,
		grouping_fields_count: usize,
		aggregate_fields: Vec<usize>,
		factory: F,
		max_row_bytes: usize,
	) -> Self {
		AggregatePartial {
			child,
			source,
			target,
			grouping_fields_count,
			aggregate_fields,
			factory,
			max_row_bytes,
			current_key: None,
			aggregators: Vec::new(),
		}
	}

	fn values_of(&self, row: &[u8]) -> Result<Vec<Value>> {
		Ok(RowView::parse(self.source, row, self.max_row_bytes)?.iter_values())
	}

	fn start_run(&mut self, key: Vec<Value>) {
		self.current_key = Some(key);
		self.aggregators = (self.factory)();
	}

	fn accumulate(&mut self, values: &[Value]) {
		for (aggregator, &field) in self.aggregators.iter_mut().zip(&self.aggregate_fields) {
			aggregator.step(&values[field]);
		}
	}

	fn flush(&mut self) -> Result<Vec<u8>> {
		let mut values = self.current_key.take().expect("flush called with no active run");
		let aggregators = std::mem::take(&mut self.aggregators);
		values.extend(aggregators.iter().map(|a| a.finish()));
		encode(self.target, &values, self.max_row_bytes)
	}
}

impl<'a, C: Cursor, F: FnMut() -> Vec<Box<dyn Aggregator>>> Cursor for AggregatePartial<'a, C, F> {
	fn open(&mut self) -> Result<()> {
		self.child.open()
	}

	#[tracing::instrument(level = "trace", skip(self))]
	fn next(&mut self) -> Result<Next> {
		loop {
			match self.child.next()? {
				Next::Row(row) => {
					let values = self.values_of(&row)?;
					let key: Vec<Value> = values[..self.grouping_fields_count].to_vec();
					match &self.current_key {
						None => {
							self.start_run(key);
							self.accumulate(&values);
						}
						Some(current) if *current == key => {
							self.accumulate(&values);
						}
						Some(_) => {
							let out = self.flush()?;
							self.start_run(key);
							self.accumulate(&values);
							return Ok(Next::Row(out));
						}
					}
				}
				Next::End => {
					return match self.current_key {
						Some(_) => Ok(Next::Row(self.flush()?)),
						None => Ok(Next::End),
					};
				}
			}
		}
	}

	fn close(&mut self) -> Result<()> {
		self.child.close()
	}
}
