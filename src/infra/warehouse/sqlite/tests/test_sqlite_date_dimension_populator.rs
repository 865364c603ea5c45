// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::NaiveDate;
use dill::{Catalog, CatalogBuilder};
use sqlx::SqlitePool;
use starmart_warehouse::*;
use starmart_warehouse_sqlite::SqliteDateDimensionPopulator;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_populates_inclusive_range_with_derived_attributes(sqlite_pool: SqlitePool) {
    let harness = SqliteDateDimensionPopulatorHarness::new(sqlite_pool);

    let result = harness
        .populator()
        .populate(date(2023, 8, 14), date(2023, 8, 20))
        .await
        .unwrap();

    assert_eq!(result.rows_inserted, 7);
    assert_eq!(result.rows_skipped, 0);
    assert_eq!(harness.date_count().await, 7);

    let (year, quarter, month, day, weekday, week) = harness.date_row(2023_08_15).await;
    assert_eq!(year, 2023);
    assert_eq!(quarter, 3);
    assert_eq!(month, 8);
    assert_eq!(day, 15);
    // Tuesday, with Sunday = 0
    assert_eq!(weekday, 2);
    assert_eq!(week, 33);

    let (.., weekday, _) = harness.date_row(2023_08_20).await;
    assert_eq!(weekday, 0);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_repopulation_skips_existing_days(sqlite_pool: SqlitePool) {
    let harness = SqliteDateDimensionPopulatorHarness::new(sqlite_pool);

    harness
        .populator()
        .populate(date(2023, 1, 1), date(2023, 1, 10))
        .await
        .unwrap();

    let result = harness
        .populator()
        .populate(date(2023, 1, 5), date(2023, 1, 15))
        .await
        .unwrap();

    assert_eq!(result.rows_inserted, 5);
    assert_eq!(result.rows_skipped, 6);
    assert_eq!(harness.date_count().await, 15);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_single_day_range(sqlite_pool: SqlitePool) {
    let harness = SqliteDateDimensionPopulatorHarness::new(sqlite_pool);

    let result = harness
        .populator()
        .populate(date(2024, 2, 29), date(2024, 2, 29))
        .await
        .unwrap();

    assert_eq!(result.rows_inserted, 1);
    assert_eq!(result.rows_skipped, 0);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_inverted_range_is_rejected(sqlite_pool: SqlitePool) {
    let harness = SqliteDateDimensionPopulatorHarness::new(sqlite_pool);

    let res = harness
        .populator()
        .populate(date(2023, 8, 20), date(2023, 8, 14))
        .await;

    assert!(matches!(res, Err(PopulateDatesError::InvalidRange(_))));
    assert_eq!(harness.date_count().await, 0);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct SqliteDateDimensionPopulatorHarness {
    catalog: Catalog,
    sqlite_pool: SqlitePool,
}

impl SqliteDateDimensionPopulatorHarness {
    fn new(sqlite_pool: SqlitePool) -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add_value(sqlite_pool.clone());
        catalog_builder.add::<SqliteDateDimensionPopulator>();

        Self {
            catalog: catalog_builder.build(),
            sqlite_pool,
        }
    }

    fn populator(&self) -> Arc<dyn DateDimensionPopulator> {
        self.catalog.get_one().unwrap()
    }

    async fn date_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM dim_dates")
            .fetch_one(&self.sqlite_pool)
            .await
            .unwrap()
    }

    async fn date_row(&self, date_key: i64) -> (i64, i64, i64, i64, i64, i64) {
        sqlx::query_as(
            "SELECT year, quarter, month, day, weekday, week FROM dim_dates WHERE date_key = ?1",
        )
        .bind(date_key)
        .fetch_one(&self.sqlite_pool)
        .await
        .unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
