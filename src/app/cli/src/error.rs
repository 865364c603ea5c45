// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use starmart_warehouse::*;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Environment variable {} is not set", crate::config::DB_PASSWORD_ENV_VAR)]
    MissingPassword,

    #[error("Failed to connect to the warehouse: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    UnknownTable(#[from] UnknownTableError),

    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),

    #[error(transparent)]
    Transform(TransformError),

    #[error(transparent)]
    Validate(#[from] ValidateTableError),

    #[error(transparent)]
    Upsert(#[from] UpsertDimensionError),

    #[error(transparent)]
    LoadFacts(#[from] LoadFactsError),

    #[error(transparent)]
    PopulateDates(#[from] PopulateDatesError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<TransformError> for CliError {
    fn from(e: TransformError) -> Self {
        match e {
            TransformError::UnknownTable(e) => Self::UnknownTable(e),
            TransformError::InvalidData(e) => Self::InvalidData(e),
            e => Self::Transform(e),
        }
    }
}

impl CliError {
    /// Non-zero process exit code, chosen so schedulers can tell bad input
    /// data apart from configuration faults and run conflicts.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidData(_) => 2,
            Self::UnknownTable(_)
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::MissingPassword => 3,
            Self::Upsert(UpsertDimensionError::RunAlreadyExecuted(_))
            | Self::Upsert(UpsertDimensionError::ConcurrentRun(_))
            | Self::LoadFacts(LoadFactsError::RunAlreadyExecuted(_))
            | Self::LoadFacts(LoadFactsError::ConcurrentRun(_))
            | Self::Transform(TransformError::Upsert(
                UpsertDimensionError::RunAlreadyExecuted(_)
                | UpsertDimensionError::ConcurrentRun(_),
            ))
            | Self::Transform(TransformError::FactLoad(
                LoadFactsError::RunAlreadyExecuted(_) | LoadFactsError::ConcurrentRun(_),
            )) => 4,
            _ => 1,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
