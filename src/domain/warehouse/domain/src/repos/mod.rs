// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod date_dimension_populator;
mod scd2_upsert_engine;
mod star_join_fact_loader;
mod validation_gate;

pub use date_dimension_populator::*;
pub use scd2_upsert_engine::*;
pub use star_join_fact_loader::*;
pub use validation_gate::*;
