// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::{DbConnectionSettings, DbCredentials};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builds a Postgres pool for one transformation run. Each engine call opens
/// its own transaction on this pool and releases it on every exit path.
pub async fn build_pg_pool(
    settings: &DbConnectionSettings,
    credentials: &DbCredentials,
) -> Result<PgPool, sqlx::Error> {
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(credentials.password())
        .database(&settings.database);

    PgPoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
