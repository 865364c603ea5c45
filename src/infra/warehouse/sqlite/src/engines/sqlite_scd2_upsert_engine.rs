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
use sqlx::SqlitePool;
use starmart_warehouse::*;
use time_source::SystemTimeSource;

use crate::engines::record_transform_run;
use crate::statements;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SqliteScd2UpsertEngine {
    sqlite_pool: SqlitePool,
    schema_registry: Arc<SchemaRegistry>,
    time_source: Arc<dyn SystemTimeSource>,
    options: Arc<TransformOptions>,
}

#[component(pub)]
#[interface(dyn Scd2UpsertEngine)]
impl SqliteScd2UpsertEngine {
    pub fn new(
        sqlite_pool: SqlitePool,
        schema_registry: Arc<SchemaRegistry>,
        time_source: Arc<dyn SystemTimeSource>,
        options: Arc<TransformOptions>,
    ) -> Self {
        Self {
            sqlite_pool,
            schema_registry,
            time_source,
            options,
        }
    }
}

#[async_trait::async_trait]
impl Scd2UpsertEngine for SqliteScd2UpsertEngine {
    #[tracing::instrument(level = "debug", skip_all, fields(%table))]
    async fn upsert_dimension(
        &self,
        table: WarehouseTable,
    ) -> Result<UpsertResult, UpsertDimensionError> {
        let schema = self.schema_registry.dimension_schema(table)?;
        let staging_columns = self
            .schema_registry
            .columns_for(table, ColumnRole::Staging)?;

        let run_date = self.time_source.today();
        let closed_through = run_date
            .pred_opt()
            .ok_or_else(|| InternalError::new("Run date has no predecessor"))?;

        let mut tx = self.sqlite_pool.begin().await.int_err()?;

        if self.options.enforce_run_ledger {
            record_transform_run(&mut *tx, schema.dimension_table, run_date).await?;
        }

        sqlx::query(&statements::create_staging_table(
            schema.staging_table,
            &staging_columns,
        ))
        .execute(&mut *tx)
        .await
        .int_err()?;

        let rows_staged = sqlx::query(&statements::stage_distinct_source_rows(&schema))
            .bind(run_date)
            .execute(&mut *tx)
            .await
            .int_err()?
            .rows_affected();

        let rows_closed = sqlx::query(&statements::close_superseded_versions(
            &schema,
            self.options.versioning_policy,
        ))
        .bind(closed_through)
        .bind(open_end_date())
        .execute(&mut *tx)
        .await
        .int_err()?
        .rows_affected();

        let rows_inserted = sqlx::query(&statements::insert_new_versions(&schema))
            .bind(open_end_date())
            .execute(&mut *tx)
            .await
            .int_err()?
            .rows_affected();

        sqlx::query(&statements::drop_staging_table(schema.staging_table))
            .execute(&mut *tx)
            .await
            .int_err()?;

        tx.commit().await.int_err()?;

        tracing::debug!(
            %table,
            rows_staged,
            rows_closed,
            rows_inserted,
            "Dimension upsert committed"
        );

        Ok(UpsertResult {
            table,
            run_date,
            rows_staged,
            rows_closed,
            rows_inserted,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
