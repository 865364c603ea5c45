// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{InternalError, NotADimensionTableError, UpsertResult, WarehouseTable};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// SCD Type-2 upsert of one dimension table, executed as a single
/// transaction: stage distinct source tuples, close superseded open
/// versions through yesterday, insert fresh versions valid from the run
/// date, drop the staging relation. A failure at any step leaves the
/// dimension exactly as it was.
#[async_trait::async_trait]
pub trait Scd2UpsertEngine: Send + Sync {
    async fn upsert_dimension(
        &self,
        table: WarehouseTable,
    ) -> Result<UpsertResult, UpsertDimensionError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
pub enum UpsertDimensionError {
    #[error(transparent)]
    NotADimensionTable(#[from] NotADimensionTableError),

    #[error(transparent)]
    RunAlreadyExecuted(#[from] RunAlreadyExecutedError),

    #[error(transparent)]
    ConcurrentRun(#[from] ConcurrentRunError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("Table '{table}' was already transformed on {run_date}")]
pub struct RunAlreadyExecutedError {
    pub table: String,
    pub run_date: NaiveDate,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Error)]
#[error("Another transformation of table '{table}' is in progress")]
pub struct ConcurrentRunError {
    pub table: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
