// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The raw operational tables this warehouse knows about. Routing between
/// the SCD2 path and the fact path is a pure function of this identity:
/// `Orders` and `OrderDetails` feed the fact loader, everything else is a
/// dimension source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarehouseTable {
    Customers,
    Products,
    Stores,
    Orders,
    OrderDetails,
}

impl WarehouseTable {
    pub const ALL: [Self; 5] = [
        Self::Customers,
        Self::Products,
        Self::Stores,
        Self::Orders,
        Self::OrderDetails,
    ];

    pub const DIMENSION_SOURCES: [Self; 3] = [Self::Customers, Self::Products, Self::Stores];

    pub fn source_name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Products => "products",
            Self::Stores => "stores",
            Self::Orders => "orders",
            Self::OrderDetails => "orderdetails",
        }
    }

    pub fn is_fact_source(self) -> bool {
        matches!(self, Self::Orders | Self::OrderDetails)
    }

    pub fn is_dimension_source(self) -> bool {
        !self.is_fact_source()
    }
}

impl std::fmt::Display for WarehouseTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source_name())
    }
}

impl std::str::FromStr for WarehouseTable {
    type Err = UnknownTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customers" => Ok(Self::Customers),
            "products" => Ok(Self::Products),
            "stores" => Ok(Self::Stores),
            "orders" => Ok(Self::Orders),
            "orderdetails" => Ok(Self::OrderDetails),
            _ => Err(UnknownTableError {
                table: s.to_string(),
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
#[error("Table '{table}' is not registered in the warehouse schema")]
pub struct UnknownTableError {
    pub table: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            WarehouseTable::from_str("OrderDetails").unwrap(),
            WarehouseTable::OrderDetails
        );
        assert_eq!(
            WarehouseTable::from_str("STORES").unwrap(),
            WarehouseTable::Stores
        );
    }

    #[test]
    fn test_parse_unknown_table() {
        let err = WarehouseTable::from_str("warehouses").unwrap_err();
        assert_eq!(err.table, "warehouses");
    }

    #[test]
    fn test_fact_path_routing() {
        assert!(WarehouseTable::Orders.is_fact_source());
        assert!(WarehouseTable::OrderDetails.is_fact_source());
        for table in WarehouseTable::DIMENSION_SOURCES {
            assert!(table.is_dimension_source());
        }
    }
}
