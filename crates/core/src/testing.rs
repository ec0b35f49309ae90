// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! In-memory test fixtures shared across this crate's and the operator
//! tree's tests, in the spirit of `reifydb-engine`'s own `test_utils`
//! module: small, deterministic, no I/O.

use std::collections::BTreeMap;

use reifydb_type::{HKey, Type, Value};

use crate::adapter::Adapter;
use crate::error::{Error, Result};
use crate::row::{RowLayout, encode};
use crate::schema::{FieldDef, RowDef};

/// A two-column `(id Int4, name Utf8)` schema, useful wherever a test needs
/// *a* row shape without caring what it is.
pub fn test_schema(row_def_id: u32) -> RowLayout {
	RowLayout::new(RowDef::new(row_def_id, vec![FieldDef::fixed(Type::Int4), FieldDef::variable(Type::Utf8, 256)]))
}

/// Encodes `(id, name)` under [`test_schema`]'s layout.
pub fn test_row(layout: &RowLayout, id: i32, name: &str) -> Vec<u8> {
	encode(layout, &[Value::Int4(id), Value::Utf8(name.to_string())], 8 * 1024 * 1024).expect("test row fits the default row-size limit")
}

/// A trivial, fully in-memory [`Adapter`] backed by a sorted map, for tests
/// that exercise the operator tree without a real storage engine.
#[derive(Default)]
pub struct MemoryAdapter {
	rows: BTreeMap<(u64, HKey), Vec<u8>>,
	next_ordinal: BTreeMap<(u64, HKey), u64>,
}

impl MemoryAdapter {
	pub fn new() -> Self {
		MemoryAdapter::default()
	}

	/// Inserts a row directly under a caller-chosen hkey, bypassing
	/// ordinal allocation. Used to seed fixtures with a known shape.
	pub fn seed(&mut self, table: u64, hkey: HKey, row: Vec<u8>) {
		self.rows.insert((table, hkey), row);
	}
}

impl Adapter for MemoryAdapter {
	fn group_scan(&self, table: u64) -> Result<Box<dyn Iterator<Item = Result<(HKey, Vec<u8>)>> + '_>> {
		let iter = self
			.rows
			.iter()
			.filter(move |((t, _), _)| *t == table)
			.map(|((_, hkey), row)| Ok((hkey.clone(), row.clone())));
		Ok(Box::new(iter))
	}

	fn index_scan(&self, index: u64) -> Result<Box<dyn Iterator<Item = Result<(HKey, Vec<u8>)>> + '_>> {
		self.group_scan(index)
	}

	fn ancestor_lookup(&self, hkey: &HKey, ancestor_table: u64) -> Result<Option<Vec<u8>>> {
		let mut best: Option<(&HKey, &Vec<u8>)> = None;
		for ((table, candidate), row) in &self.rows {
			if *table != ancestor_table || !hkey.is_descendant_of_or_equal(candidate) {
				continue;
			}
			if best.map(|(b, _)| candidate.depth() > b.depth()).unwrap_or(true) {
				best = Some((candidate, row));
			}
		}
		Ok(best.map(|(_, row)| row.clone()))
	}

	fn branch_lookup(&self, hkey: &HKey, child_table: u64) -> Result<Box<dyn Iterator<Item = Result<(HKey, Vec<u8>)>> + '_>> {
		let parent = hkey.clone();
		let iter = self
			.rows
			.iter()
			.filter(move |((t, candidate), _)| *t == child_table && candidate.depth() == parent.depth() + 1 && candidate.is_descendant_of_or_equal(&parent))
			.map(|((_, hkey), row)| Ok((hkey.clone(), row.clone())));
		Ok(Box::new(iter))
	}

	fn insert(&mut self, table: u64, parent: Option<&HKey>, row: &[u8]) -> Result<HKey> {
		let parent = parent.cloned().unwrap_or_else(HKey::root);
		let ordinal = self.next_ordinal.entry((table, parent.clone())).or_insert(0);
		let hkey = parent.child(*ordinal);
		*ordinal += 1;
		self.rows.insert((table, hkey.clone()), row.to_vec());
		Ok(hkey)
	}

	fn update(&mut self, table: u64, hkey: &HKey, row: &[u8]) -> Result<()> {
		if !self.rows.contains_key(&(table, hkey.clone())) {
			return Err(Error::EncodingError(format!("no row at {hkey:?} in table {table}")));
		}
		self.rows.insert((table, hkey.clone()), row.to_vec());
		Ok(())
	}

	fn delete(&mut self, table: u64, hkey: &HKey) -> Result<()> {
		self.rows.remove(&(table, hkey.clone()));
		Ok(())
	}
}
