// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod sqlite_date_dimension_populator;
mod sqlite_scd2_upsert_engine;
mod sqlite_star_join_fact_loader;
mod sqlite_validation_gate;

pub use sqlite_date_dimension_populator::*;
pub use sqlite_scd2_upsert_engine::*;
pub use sqlite_star_join_fact_loader::*;
pub use sqlite_validation_gate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

use chrono::NaiveDate;
use sqlx::SqliteConnection;
use starmart_warehouse::{
    ErrorIntoInternal,
    InternalError,
    LoadFactsError,
    RunAlreadyExecutedError,
    UpsertDimensionError,
};

use crate::statements;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) enum RecordRunError {
    AlreadyExecuted(RunAlreadyExecutedError),
    Internal(InternalError),
}

impl From<RecordRunError> for UpsertDimensionError {
    fn from(e: RecordRunError) -> Self {
        match e {
            RecordRunError::AlreadyExecuted(e) => Self::RunAlreadyExecuted(e),
            RecordRunError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<RecordRunError> for LoadFactsError {
    fn from(e: RecordRunError) -> Self {
        match e {
            RecordRunError::AlreadyExecuted(e) => Self::RunAlreadyExecuted(e),
            RecordRunError::Internal(e) => Self::Internal(e),
        }
    }
}

/// Claims the (table, run date) slot in the run ledger inside the run's own
/// transaction, so the claim commits or rolls back together with the
/// transformation it guards.
pub(crate) async fn record_transform_run(
    connection: &mut SqliteConnection,
    table_name: &str,
    run_date: NaiveDate,
) -> Result<(), RecordRunError> {
    match sqlx::query(&statements::record_transform_run())
        .bind(table_name)
        .bind(run_date)
        .execute(connection)
        .await
    {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(RecordRunError::AlreadyExecuted(RunAlreadyExecutedError {
                table: table_name.to_string(),
                run_date,
            }))
        }
        Err(e) => Err(RecordRunError::Internal(e.int_err())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
