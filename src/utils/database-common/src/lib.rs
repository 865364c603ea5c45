// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod db_connection_settings;
mod db_credentials;
mod helpers;
mod pools;

pub use db_connection_settings::*;
pub use db_credentials::*;
pub use helpers::*;
pub use pools::*;
