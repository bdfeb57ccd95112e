// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection setup, migrations and PRAGMA handling live here, along with
//! the few helpers that cannot be expressed in Diesel DSL. Stores in
//! `queries/` and `mutations/` use Diesel DSL only.

pub mod sqlite;
