// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod date_dimension;
mod schema_registry;
mod transform_options;
mod transform_results;
mod validation_report;
mod warehouse_table;

pub use date_dimension::*;
pub use schema_registry::*;
pub use transform_options::*;
pub use transform_results::*;
pub use validation_report::*;
pub use warehouse_table::*;
