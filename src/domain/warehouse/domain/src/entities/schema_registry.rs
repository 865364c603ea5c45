// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::WarehouseTable;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Varchar(u16),
    Decimal(u8, u8),
    Date,
}

impl SqlType {
    /// DDL rendering of the type, identical across supported dialects.
    pub fn ddl(self) -> String {
        match self {
            Self::Integer => "INTEGER".to_string(),
            Self::Varchar(len) => format!("VARCHAR({len})"),
            Self::Decimal(precision, scale) => format!("DECIMAL({precision},{scale})"),
            Self::Date => "DATE".to_string(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
        }
    }

    pub const fn not_null(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Source,
    Staging,
    Dimension,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// SCD2 layout of one dimension: where staged rows go, which column is the
/// generated surrogate key, which is the business (natural) key, and which
/// attributes are versioned.
#[derive(Debug, Clone, Copy)]
pub struct DimensionSchema {
    pub source_table: WarehouseTable,
    pub dimension_table: &'static str,
    pub staging_table: &'static str,
    pub surrogate_key: &'static str,
    pub natural_key: &'static ColumnDef,
    pub attributes: &'static [ColumnDef],
}

impl DimensionSchema {
    pub const LOAD_DATE_COLUMN: &'static str = "load_date";
    pub const START_DATE_COLUMN: &'static str = "start_date";
    pub const END_DATE_COLUMN: &'static str = "end_date";

    /// Natural key followed by the attributes, in declaration order.
    pub fn tracked_column_names(&self) -> Vec<&'static str> {
        std::iter::once(self.natural_key.name)
            .chain(self.attributes.iter().map(|c| c.name))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// Source column declarations. The natural key is always the first column.
// Every column is required in the raw load and checked by the validation
// gate before any transformation runs.

static CUSTOMERS_SOURCE: [ColumnDef; 8] = [
    ColumnDef::not_null("customer_id", SqlType::Integer),
    ColumnDef::not_null("first_name", SqlType::Varchar(50)),
    ColumnDef::not_null("last_name", SqlType::Varchar(50)),
    ColumnDef::not_null("email", SqlType::Varchar(50)),
    ColumnDef::not_null("address", SqlType::Varchar(50)),
    ColumnDef::not_null("city", SqlType::Varchar(50)),
    ColumnDef::not_null("state", SqlType::Varchar(50)),
    ColumnDef::not_null("zip_code", SqlType::Varchar(10)),
];

static PRODUCTS_SOURCE: [ColumnDef; 5] = [
    ColumnDef::not_null("product_id", SqlType::Integer),
    ColumnDef::not_null("product_name", SqlType::Varchar(50)),
    ColumnDef::not_null("category", SqlType::Varchar(50)),
    ColumnDef::not_null("description", SqlType::Varchar(50)),
    ColumnDef::not_null("price", SqlType::Decimal(8, 2)),
];

static STORES_SOURCE: [ColumnDef; 6] = [
    ColumnDef::not_null("store_id", SqlType::Integer),
    ColumnDef::not_null("store_name", SqlType::Varchar(50)),
    ColumnDef::not_null("address", SqlType::Varchar(50)),
    ColumnDef::not_null("city", SqlType::Varchar(50)),
    ColumnDef::not_null("state", SqlType::Varchar(50)),
    ColumnDef::not_null("zip_code", SqlType::Varchar(10)),
];

static ORDERS_SOURCE: [ColumnDef; 4] = [
    ColumnDef::not_null("order_id", SqlType::Integer),
    ColumnDef::not_null("customer_id", SqlType::Integer),
    ColumnDef::not_null("store_id", SqlType::Integer),
    ColumnDef::not_null("order_date", SqlType::Date),
];

static ORDERDETAILS_SOURCE: [ColumnDef; 4] = [
    ColumnDef::not_null("order_id", SqlType::Integer),
    ColumnDef::not_null("product_id", SqlType::Integer),
    ColumnDef::not_null("quantity", SqlType::Integer),
    ColumnDef::not_null("unit_price", SqlType::Decimal(8, 2)),
];

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Static, total mapping from table identity to its column sets. Loaded once
/// and shared by every engine, so column semantics are never re-derived from
/// string splitting at the call sites.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaRegistry;

impl SchemaRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn source_columns(&self, table: WarehouseTable) -> &'static [ColumnDef] {
        match table {
            WarehouseTable::Customers => &CUSTOMERS_SOURCE,
            WarehouseTable::Products => &PRODUCTS_SOURCE,
            WarehouseTable::Stores => &STORES_SOURCE,
            WarehouseTable::Orders => &ORDERS_SOURCE,
            WarehouseTable::OrderDetails => &ORDERDETAILS_SOURCE,
        }
    }

    /// First declared source column.
    pub fn natural_key(&self, table: WarehouseTable) -> &'static ColumnDef {
        &self.source_columns(table)[0]
    }

    pub fn dimension_schema(
        &self,
        table: WarehouseTable,
    ) -> Result<DimensionSchema, NotADimensionTableError> {
        let (dimension_table, staging_table, surrogate_key) = match table {
            WarehouseTable::Customers => {
                ("dim_customers", "dim_customers_staging", "customer_key")
            }
            WarehouseTable::Products => ("dim_products", "dim_products_staging", "product_key"),
            WarehouseTable::Stores => ("dim_stores", "dim_stores_staging", "store_key"),
            WarehouseTable::Orders | WarehouseTable::OrderDetails => {
                return Err(NotADimensionTableError { table });
            }
        };

        let source = self.source_columns(table);

        Ok(DimensionSchema {
            source_table: table,
            dimension_table,
            staging_table,
            surrogate_key,
            natural_key: &source[0],
            attributes: &source[1..],
        })
    }

    /// Ordered column set for one of the three roles a table can play.
    pub fn columns_for(
        &self,
        table: WarehouseTable,
        role: ColumnRole,
    ) -> Result<Vec<ColumnDef>, NotADimensionTableError> {
        match role {
            ColumnRole::Source => Ok(self.source_columns(table).to_vec()),
            ColumnRole::Staging => {
                let schema = self.dimension_schema(table)?;
                let mut columns = vec![*schema.natural_key];
                columns.extend_from_slice(schema.attributes);
                columns.push(ColumnDef::not_null(
                    DimensionSchema::LOAD_DATE_COLUMN,
                    SqlType::Date,
                ));
                Ok(columns)
            }
            ColumnRole::Dimension => {
                let schema = self.dimension_schema(table)?;
                let mut columns =
                    vec![ColumnDef::not_null(schema.surrogate_key, SqlType::Integer)];
                columns.push(*schema.natural_key);
                columns.extend_from_slice(schema.attributes);
                columns.push(ColumnDef::not_null(
                    DimensionSchema::START_DATE_COLUMN,
                    SqlType::Date,
                ));
                columns.push(ColumnDef::not_null(
                    DimensionSchema::END_DATE_COLUMN,
                    SqlType::Date,
                ));
                Ok(columns)
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
#[error("Table '{table}' is not an SCD2 dimension source")]
pub struct NotADimensionTableError {
    pub table: WarehouseTable,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_total_over_dimension_sources() {
        let registry = SchemaRegistry::new();

        for table in WarehouseTable::DIMENSION_SOURCES {
            let schema = registry.dimension_schema(table).unwrap();
            assert_eq!(schema.source_table, table);
            assert_eq!(schema.natural_key.name, registry.natural_key(table).name);
            assert!(!schema.attributes.is_empty());
        }
    }

    #[test]
    fn test_natural_key_is_first_source_column() {
        let registry = SchemaRegistry::new();

        for table in WarehouseTable::ALL {
            let key = registry.natural_key(table);
            assert_eq!(key.name, registry.source_columns(table)[0].name);
            assert!(!key.nullable);
        }
    }

    #[test]
    fn test_fact_sources_have_no_dimension_schema() {
        let registry = SchemaRegistry::new();

        assert!(registry.dimension_schema(WarehouseTable::Orders).is_err());
        assert!(
            registry
                .dimension_schema(WarehouseTable::OrderDetails)
                .is_err()
        );
    }

    #[test]
    fn test_columns_for_staging_role() {
        let registry = SchemaRegistry::new();
        let columns = registry
            .columns_for(WarehouseTable::Stores, ColumnRole::Staging)
            .unwrap();

        let names: Vec<_> = columns.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "store_id",
                "store_name",
                "address",
                "city",
                "state",
                "zip_code",
                "load_date"
            ]
        );
    }

    #[test]
    fn test_columns_for_dimension_role() {
        let registry = SchemaRegistry::new();
        let columns = registry
            .columns_for(WarehouseTable::Products, ColumnRole::Dimension)
            .unwrap();

        let names: Vec<_> = columns.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "product_key",
                "product_id",
                "product_name",
                "category",
                "description",
                "price",
                "start_date",
                "end_date"
            ]
        );
    }
}
