// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod postgres_date_dimension_populator;
mod postgres_scd2_upsert_engine;
mod postgres_star_join_fact_loader;
mod postgres_validation_gate;

pub use postgres_date_dimension_populator::*;
pub use postgres_scd2_upsert_engine::*;
pub use postgres_star_join_fact_loader::*;
pub use postgres_validation_gate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

use chrono::NaiveDate;
use sqlx::PgConnection;
use starmart_warehouse::{
    ConcurrentRunError,
    ErrorIntoInternal,
    InternalError,
    LoadFactsError,
    RunAlreadyExecutedError,
    UpsertDimensionError,
};

use crate::statements;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) enum ClaimRunError {
    AlreadyExecuted(RunAlreadyExecutedError),
    Concurrent(ConcurrentRunError),
    Internal(InternalError),
}

impl From<ClaimRunError> for UpsertDimensionError {
    fn from(e: ClaimRunError) -> Self {
        match e {
            ClaimRunError::AlreadyExecuted(e) => Self::RunAlreadyExecuted(e),
            ClaimRunError::Concurrent(e) => Self::ConcurrentRun(e),
            ClaimRunError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<ClaimRunError> for LoadFactsError {
    fn from(e: ClaimRunError) -> Self {
        match e {
            ClaimRunError::AlreadyExecuted(e) => Self::RunAlreadyExecuted(e),
            ClaimRunError::Concurrent(e) => Self::ConcurrentRun(e),
            ClaimRunError::Internal(e) => Self::Internal(e),
        }
    }
}

/// Claims the (table, run date) slot in the run ledger inside the run's own
/// transaction. An advisory lock keyed by table name is taken first, so a
/// concurrent run of the same table fails fast instead of blocking on the
/// uncommitted ledger row.
pub(crate) async fn claim_transform_run(
    connection: &mut PgConnection,
    table_name: &str,
    run_date: NaiveDate,
) -> Result<(), ClaimRunError> {
    let lock_acquired: bool = sqlx::query_scalar(&statements::try_advisory_lock())
        .bind(table_name)
        .fetch_one(&mut *connection)
        .await
        .map_err(|e| ClaimRunError::Internal(e.int_err()))?;

    if !lock_acquired {
        return Err(ClaimRunError::Concurrent(ConcurrentRunError {
            table: table_name.to_string(),
        }));
    }

    match sqlx::query(&statements::record_transform_run())
        .bind(table_name)
        .bind(run_date)
        .execute(connection)
        .await
    {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(ClaimRunError::AlreadyExecuted(RunAlreadyExecutedError {
                table: table_name.to_string(),
                run_date,
            }))
        }
        Err(e) => Err(ClaimRunError::Internal(e.int_err())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
