// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Warehouse connection parameters, minus the password (see
/// [`crate::DbCredentials`]).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConnectionSettings {
    pub host: String,
    #[serde(default = "DbConnectionSettings::default_port")]
    pub port: u16,
    pub user: String,
    pub database: String,
}

impl DbConnectionSettings {
    fn default_port() -> u16 {
        5432
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
