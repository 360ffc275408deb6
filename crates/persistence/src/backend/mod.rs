// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific code.
//!
//! Only `SQLite` is supported. Everything here is limited to connection
//! setup, PRAGMA handling, migrations and `last_insert_rowid()`; queries and
//! mutations live in `queries/` and `mutations/`.

pub mod sqlite;

pub use sqlite::{
    EXPECTED_TABLES, enable_wal_mode, get_last_insert_rowid, initialize_database,
    verify_expected_tables, verify_foreign_key_enforcement,
};
