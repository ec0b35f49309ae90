// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! Row codec, cursor protocol, and storage adapter contract shared by the
//! operator tree in `reifydb-engine`.

pub mod adapter;
pub mod config;
pub mod cursor;
pub mod error;
pub mod row;
pub mod schema;
pub mod testing;

pub use adapter::Adapter;
pub use config::EngineConfig;
pub use cursor::{Bindings, Cursor, Limit, Next, RootCursor};
pub use error::{Error, Result};
pub use row::{RowLayout, RowView, peek_row_def_id};
pub use schema::{FieldDef, RowDef};
