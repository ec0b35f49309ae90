// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

use reifydb_core::{Adapter, Cursor, Error, Next, Result};
use reifydb_type::HKey;

/// The result summary every update plan's `run` returns (spec.md §4.2):
/// how many input rows were consumed, and how many of those produced an
/// actual adapter mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PlanResult {
	pub rows_processed: u64,
	pub rows_modified: u64,
}

fn adapter_error(rows_processed: u64, source: Error) -> Error {
	Error::AdapterError { rows_processed, source: Box::new(source) }
}

/// `insert_Default`: for each row the child cursor produces, inserts it
/// under `table` (nested under `parent`, or at the group root). A plan
/// handle, not a cursor — `run` drives the child to completion itself.
pub struct InsertDefault<'a, C, A: Adapter> {
	child: C,
	adapter: &'a mut A,
	table: u64,
	parent: Option<HKey>,
}

impl<'a, C: Cursor, A: Adapter> InsertDefault<'a, C, A> {
	pub fn new(child: C, adapter: &'a mut A, table: u64, parent: Option<HKey>) -> Self {
		InsertDefault { child, adapter, table, parent }
	}

	#[tracing::instrument(level = "trace", skip(self))]
	pub fn run(&mut self) -> Result<PlanResult> {
		self.child.open()?;
		let mut result = PlanResult::default();
		loop {
			match self.child.next() {
				Ok(Next::Row(row)) => {
					if let Err(err) = self.adapter.insert(self.table, self.parent.as_ref(), &row) {
						self.child.close()?;
						return Err(adapter_error(result.rows_processed, err));
					}
					result.rows_processed += 1;
					result.rows_modified += 1;
				}
				Ok(Next::End) => break,
				Err(err) => {
					self.child.close()?;
					return Err(err);
				}
			}
		}
		self.child.close()?;
		Ok(result)
	}
}

/// `update_Default(fn)`: for each `(hkey, oldRow)` pair the child produces,
/// applies `fn(oldRow) -> newRow` and overwrites the row stored at `hkey`.
pub struct UpdateDefault<'a, C, A: Adapter, F> {
	child: C,
	adapter: &'a mut A,
	table: u64,
	f: F,
}

impl<'a, C, A: Adapter, F> UpdateDefault<'a, C, A, F>
where
	C: Iterator<Item = Result<(HKey, Vec<u8>)>>,
	F: FnMut(&[u8]) -> Result<Vec<u8>>,
{
	pub fn new(child: C, adapter: &'a mut A, table: u64, f: F) -> Self {
		UpdateDefault { child, adapter, table, f }
	}

	#[tracing::instrument(level = "trace", skip(self))]
	pub fn run(&mut self) -> Result<PlanResult> {
		let mut result = PlanResult::default();
		for item in &mut self.child {
			let (hkey, old_row) = item.map_err(|err| adapter_error(result.rows_processed, err))?;
			let new_row = (self.f)(&old_row).map_err(|err| adapter_error(result.rows_processed, err))?;
			self.adapter.update(self.table, &hkey, &new_row).map_err(|err| adapter_error(result.rows_processed, err))?;
			result.rows_processed += 1;
			result.rows_modified += 1;
		}
		Ok(result)
	}
}

/// `delete_Default`: deletes every `hkey` the child produces from `table`.
pub struct DeleteDefault<'a, C, A: Adapter> {
	child: C,
	adapter: &'a mut A,
	table: u64,
}

impl<'a, C, A: Adapter> DeleteDefault<'a, C, A>
where
	C: Iterator<Item = Result<HKey>>,
{
	pub fn new(child: C, adapter: &'a mut A, table: u64) -> Self {
		DeleteDefault { child, adapter, table }
	}

	#[tracing::instrument(level = "trace", skip(self))]
	pub fn run(&mut self) -> Result<PlanResult> {
		let mut result = PlanResult::default();
		for item in &mut self.child {
			let hkey = item.map_err(|err| adapter_error(result.rows_processed, err))?;
			self.adapter.delete(self.table, &hkey).map_err(|err| adapter_error(result.rows_processed, err))?;
			result.rows_processed += 1;
			result.rows_modified += 1;
		}
		Ok(result)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reifydb_core::testing::{MemoryAdapter, test_row, test_schema};
	use reifydb_type::Value;

	struct VecCursor {
		rows: std::vec::IntoIter<Vec<u8>>,
	}

	impl Cursor for VecCursor {
		fn open(&mut self) -> Result<()> {
			Ok(())
		}
		fn next(&mut self) -> Result<Next> {
			Ok(match self.rows.next() {
				Some(row) => Next::Row(row),
				None => Next::End,
			})
		}
		fn close(&mut self) -> Result<()> {
			Ok(())
		}
	}

	#[test]
	fn insert_writes_every_child_row_and_reports_the_plan_result() {
		let layout = test_schema(1);
		let rows = vec![test_row(&layout, 1, "a"), test_row(&layout, 2, "b")];
		let child = VecCursor { rows: rows.clone().into_iter() };
		let mut adapter = MemoryAdapter::new();
		let mut insert = InsertDefault::new(child, &mut adapter, 1, None);
		let result = insert.run().unwrap();
		assert_eq!(result, PlanResult { rows_processed: 2, rows_modified: 2 });
		let scanned: Vec<_> = adapter.group_scan(1).unwrap().map(|r| r.unwrap().1).collect();
		assert_eq!(scanned, rows);
	}

	#[test]
	fn update_applies_fn_to_the_old_row_before_writing() {
		let layout = test_schema(1);
		let mut adapter = MemoryAdapter::new();
		let hkey = adapter.insert(1, None, &test_row(&layout, 1, "a")).unwrap();
		let items = vec![Ok((hkey.clone(), test_row(&layout, 1, "a")))];
		let layout_ref = &layout;
		let mut update = UpdateDefault::new(items.into_iter(), &mut adapter, 1, move |_old: &[u8]| {
			reifydb_core::row::encode(layout_ref, &[Value::Int4(99), Value::Utf8("z".into())], 8 * 1024 * 1024)
		});
		let result = update.run().unwrap();
		assert_eq!(result, PlanResult { rows_processed: 1, rows_modified: 1 });
		let scanned: Vec<_> = adapter.group_scan(1).unwrap().map(|r| r.unwrap().1).collect();
		assert_eq!(scanned, vec![test_row(&layout, 99, "z")]);
	}

	#[test]
	fn delete_removes_every_named_hkey() {
		let layout = test_schema(1);
		let mut adapter = MemoryAdapter::new();
		let hkey = adapter.insert(1, None, &test_row(&layout, 1, "a")).unwrap();
		let mut delete = DeleteDefault::new(std::iter::once(Ok(hkey)), &mut adapter, 1);
		let result = delete.run().unwrap();
		assert_eq!(result, PlanResult { rows_processed: 1, rows_modified: 1 });
		assert_eq!(adapter.group_scan(1).unwrap().count(), 0);
	}

	#[test]
	fn update_failure_surfaces_partial_progress() {
		let layout = test_schema(1);
		let mut adapter = MemoryAdapter::new();
		let hkey = adapter.insert(1, None, &test_row(&layout, 1, "a")).unwrap();
		let missing_hkey = HKey::from_segments([99]);
		let items = vec![Ok((hkey, test_row(&layout, 1, "a"))), Ok((missing_hkey, test_row(&layout, 2, "b")))];
		let mut update = UpdateDefault::new(items.into_iter(), &mut adapter, 1, |old: &[u8]| Ok(old.to_vec()));
		let err = update.run().unwrap_err();
		assert!(matches!(err, Error::AdapterError { rows_processed: 1, .. }));
	}
}
