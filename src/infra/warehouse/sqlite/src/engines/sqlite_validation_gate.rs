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

use crate::statements;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct SqliteValidationGate {
    sqlite_pool: SqlitePool,
    schema_registry: Arc<SchemaRegistry>,
}

#[component(pub)]
#[interface(dyn ValidationGate)]
impl SqliteValidationGate {
    pub fn new(sqlite_pool: SqlitePool, schema_registry: Arc<SchemaRegistry>) -> Self {
        Self {
            sqlite_pool,
            schema_registry,
        }
    }
}

#[async_trait::async_trait]
impl ValidationGate for SqliteValidationGate {
    #[tracing::instrument(level = "debug", skip_all, fields(%table))]
    async fn validate(
        &self,
        table: WarehouseTable,
    ) -> Result<ValidationReport, ValidateTableError> {
        let source_name = table.source_name();
        let mut violations = Vec::new();

        for column in self.schema_registry.source_columns(table) {
            if column.nullable {
                continue;
            }

            let null_count: i64 =
                sqlx::query_scalar(&statements::count_null_rows(source_name, column.name))
                    .fetch_one(&self.sqlite_pool)
                    .await
                    .int_err()?;

            if null_count > 0 {
                violations.push(Violation::NotNull {
                    column: column.name.to_string(),
                    row_count: u64::try_from(null_count).int_err()?,
                });
            }
        }

        let natural_key = self.schema_registry.natural_key(table);
        let duplicates: Vec<(String, i64)> =
            sqlx::query_as(&statements::duplicate_key_values(source_name, natural_key.name))
                .fetch_all(&self.sqlite_pool)
                .await
                .int_err()?;

        if !duplicates.is_empty() {
            violations.push(Violation::UniqueKey {
                column: natural_key.name.to_string(),
                values: duplicates.into_iter().map(|(value, _)| value).collect(),
            });
        }

        Ok(ValidationReport { table, violations })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
