// Copyright (c) reifydb.com 2025
// This file is licensed under the AGPL-3.0-or-later

//! The self-describing binary row format (spec.md §6.1): byte primitives,
//! schema-derived offsets, and the construct/parse/iterate/copy/project
//! operations built on top of them.

mod codec;
mod layout;
pub mod primitives;

pub use codec::{RowView, encode, encode_into, peek_row_def_id, project};
pub use layout::RowLayout;
