// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::NaiveDate;
use dill::*;
use sqlx::PgPool;
use starmart_warehouse::*;

use crate::statements;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct PostgresDateDimensionPopulator {
    pg_pool: PgPool,
}

#[component(pub)]
#[interface(dyn DateDimensionPopulator)]
impl PostgresDateDimensionPopulator {
    pub fn new(pg_pool: PgPool) -> Self {
        Self { pg_pool }
    }
}

#[async_trait::async_trait]
impl DateDimensionPopulator for PostgresDateDimensionPopulator {
    #[tracing::instrument(level = "debug", skip_all, fields(%from, %to))]
    async fn populate(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PopulateDatesResult, PopulateDatesError> {
        if from > to {
            return Err(InvalidDateRangeError { from, to }.into());
        }

        let mut tx = self.pg_pool.begin().await.int_err()?;

        let mut rows_inserted = 0;
        let mut rows_skipped = 0;

        let mut date = from;
        while date <= to {
            let row = DateDimensionRow::for_date(date);

            let rows_affected = sqlx::query(&statements::insert_date_row())
                .bind(row.date_key)
                .bind(row.date)
                .bind(row.year)
                .bind(i64::from(row.quarter))
                .bind(i64::from(row.month))
                .bind(i64::from(row.day))
                .bind(i64::from(row.weekday))
                .bind(i64::from(row.iso_week))
                .execute(&mut *tx)
                .await
                .int_err()?
                .rows_affected();

            if rows_affected == 0 {
                rows_skipped += 1;
            } else {
                rows_inserted += 1;
            }

            date = date
                .succ_opt()
                .ok_or_else(|| InternalError::new("Date range exceeds supported calendar"))?;
        }

        tx.commit().await.int_err()?;

        tracing::debug!(rows_inserted, rows_skipped, "Date dimension populated");

        Ok(PopulateDatesResult {
            rows_inserted,
            rows_skipped,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
