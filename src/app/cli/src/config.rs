// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::Path;

use database_common::{DbConnectionSettings, DbCredentials};
use serde::Deserialize;
use starmart_warehouse::TransformOptions;

use crate::error::CliError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DB_PASSWORD_ENV_VAR: &str = "STARMART_DB_PASSWORD";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct CliConfig {
    pub database: DbConnectionSettings,

    #[serde(default)]
    pub transform: TransformOptions,
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&raw).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The password never lives in the config file, only in the environment.
pub fn credentials_from_env() -> Result<DbCredentials, CliError> {
    match std::env::var(DB_PASSWORD_ENV_VAR) {
        Ok(password) => Ok(DbCredentials::new(password)),
        Err(_) => Err(CliError::MissingPassword),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
