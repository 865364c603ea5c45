// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::{Catalog, CatalogBuilder};
use sqlx::SqlitePool;
use starmart_warehouse::*;
use starmart_warehouse_sqlite::SqliteValidationGate;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_clean_table_passes(sqlite_pool: SqlitePool) {
    let harness = SqliteValidationGateHarness::new(sqlite_pool);
    harness.insert_customer(Some(1), Some("ada@example.com"), Some("San Mateo")).await;
    harness.insert_customer(Some(2), Some("bob@example.com"), Some("Oakland")).await;

    let report = harness
        .gate()
        .validate(WarehouseTable::Customers)
        .await
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report, ValidationReport::valid(WarehouseTable::Customers));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_null_rows_are_counted_per_column(sqlite_pool: SqlitePool) {
    let harness = SqliteValidationGateHarness::new(sqlite_pool);
    harness.insert_customer(Some(1), None, Some("San Mateo")).await;
    harness.insert_customer(Some(2), None, None).await;

    let report = harness
        .gate()
        .validate(WarehouseTable::Customers)
        .await
        .unwrap();

    assert!(!report.is_valid());
    assert_eq!(
        report.violations,
        vec![
            Violation::NotNull {
                column: "email".to_string(),
                row_count: 2,
            },
            Violation::NotNull {
                column: "city".to_string(),
                row_count: 1,
            },
        ],
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_duplicate_natural_keys_are_reported_with_values(sqlite_pool: SqlitePool) {
    let harness = SqliteValidationGateHarness::new(sqlite_pool);
    for customer_id in [7, 7, 9, 9, 8] {
        harness
            .insert_customer(Some(customer_id), Some("ada@example.com"), Some("Oakland"))
            .await;
    }

    let report = harness
        .gate()
        .validate(WarehouseTable::Customers)
        .await
        .unwrap();

    assert_eq!(
        report.violations,
        vec![Violation::UniqueKey {
            column: "customer_id".to_string(),
            values: vec!["7".to_string(), "9".to_string()],
        }],
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(sqlx::test(migrations = "../../../../migrations/sqlite"))]
async fn test_all_violations_accumulate_in_one_pass(sqlite_pool: SqlitePool) {
    let harness = SqliteValidationGateHarness::new(sqlite_pool);
    harness.insert_customer(Some(1), None, Some("San Mateo")).await;
    harness.insert_customer(Some(1), Some("ada@example.com"), Some("Oakland")).await;

    let report = harness
        .gate()
        .validate(WarehouseTable::Customers)
        .await
        .unwrap();

    assert_eq!(
        report.violations,
        vec![
            Violation::NotNull {
                column: "email".to_string(),
                row_count: 1,
            },
            Violation::UniqueKey {
                column: "customer_id".to_string(),
                values: vec!["1".to_string()],
            },
        ],
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct SqliteValidationGateHarness {
    catalog: Catalog,
    sqlite_pool: SqlitePool,
}

impl SqliteValidationGateHarness {
    fn new(sqlite_pool: SqlitePool) -> Self {
        let mut catalog_builder = CatalogBuilder::new();
        catalog_builder.add_value(sqlite_pool.clone());
        catalog_builder.add_value(SchemaRegistry::new());
        catalog_builder.add::<SqliteValidationGate>();

        Self {
            catalog: catalog_builder.build(),
            sqlite_pool,
        }
    }

    fn gate(&self) -> Arc<dyn ValidationGate> {
        self.catalog.get_one().unwrap()
    }

    async fn insert_customer(
        &self,
        customer_id: Option<i64>,
        email: Option<&str>,
        city: Option<&str>,
    ) {
        sqlx::query(
            "INSERT INTO customers \
             (customer_id, first_name, last_name, email, address, city, state, zip_code) \
             VALUES (?1, 'Ada', 'Lovelace', ?2, '12 Pine St', ?3, 'CA', '94016')",
        )
        .bind(customer_id)
        .bind(email)
        .bind(city)
        .execute(&self.sqlite_pool)
        .await
        .unwrap();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
