// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::{
    FactLoadResult,
    InternalError,
    LoadFactsError,
    UnknownTableError,
    UpsertDimensionError,
    UpsertResult,
    ValidateTableError,
    ValidationReport,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Entry point for one transformation run. Parses the table identifier
/// supplied by the caller, runs the validation gate over the raw table(s)
/// involved, and routes to exactly one of the two transformation paths.
#[async_trait::async_trait]
pub trait TransformDispatcher: Send + Sync {
    async fn run(&self, table_name: &str) -> Result<TransformOutcome, TransformError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    DimensionUpserted(UpsertResult),
    FactsLoaded(FactLoadResult),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    UnknownTable(#[from] UnknownTableError),

    #[error(transparent)]
    InvalidData(#[from] InvalidDataError),

    #[error(transparent)]
    Upsert(#[from] UpsertDimensionError),

    #[error(transparent)]
    FactLoad(#[from] LoadFactsError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl From<ValidateTableError> for TransformError {
    fn from(e: ValidateTableError) -> Self {
        match e {
            ValidateTableError::Internal(e) => Self::Internal(e),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("{report}")]
pub struct InvalidDataError {
    pub report: ValidationReport,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
