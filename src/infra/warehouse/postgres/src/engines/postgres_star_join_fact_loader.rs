// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::*;
use sqlx::PgPool;
use starmart_warehouse::*;
use time_source::SystemTimeSource;

use crate::engines::claim_transform_run;
use crate::statements;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const FACT_TABLE: &str = "fact_orders";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresStarJoinFactLoader {
    pg_pool: PgPool,
    time_source: Arc<dyn SystemTimeSource>,
    options: Arc<TransformOptions>,
}

#[component(pub)]
#[interface(dyn StarJoinFactLoader)]
impl PostgresStarJoinFactLoader {
    pub fn new(
        pg_pool: PgPool,
        time_source: Arc<dyn SystemTimeSource>,
        options: Arc<TransformOptions>,
    ) -> Self {
        Self {
            pg_pool,
            time_source,
            options,
        }
    }
}

#[async_trait::async_trait]
impl StarJoinFactLoader for PostgresStarJoinFactLoader {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn load_facts(&self) -> Result<FactLoadResult, LoadFactsError> {
        let run_date = self.time_source.today();

        let mut tx = self.pg_pool.begin().await.int_err()?;

        if self.options.enforce_run_ledger {
            claim_transform_run(&mut *tx, FACT_TABLE, run_date).await?;
        }

        sqlx::query(&statements::create_fact_staging_table())
            .execute(&mut *tx)
            .await
            .int_err()?;

        let rows_staged = sqlx::query(&statements::stage_denormalized_order_lines())
            .execute(&mut *tx)
            .await
            .int_err()?
            .rows_affected();

        let rows_inserted = sqlx::query(&statements::insert_resolved_fact_rows())
            .bind(open_end_date())
            .execute(&mut *tx)
            .await
            .int_err()?
            .rows_affected();

        let rows_unresolved = rows_staged - rows_inserted;

        if rows_unresolved > 0 {
            if self.options.fail_on_unresolved_facts {
                // Dropping the open transaction rolls the whole run back
                return Err(UnresolvedFactRowsError {
                    row_count: rows_unresolved,
                }
                .into());
            }

            tracing::warn!(
                rows_unresolved,
                "Excluded fact rows that did not resolve to current dimension versions"
            );
        }

        tx.commit().await.int_err()?;

        tracing::debug!(rows_staged, rows_inserted, rows_unresolved, "Fact load committed");

        Ok(FactLoadResult {
            run_date,
            rows_staged,
            rows_inserted,
            rows_unresolved,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
