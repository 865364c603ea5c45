// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Parser)]
#[command(name = "starmart", version, about = "Starmart warehouse transformation tool")]
pub struct Cli {
    /// Path to the warehouse configuration file
    #[arg(long, default_value = "starmart.yaml")]
    pub config: PathBuf,

    /// Apply pending database migrations before running the command
    #[arg(long)]
    pub migrate: bool,

    #[command(subcommand)]
    pub command: Command,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a raw table against its declared constraints
    Validate {
        #[arg(long)]
        table: String,
    },

    /// Run the SCD2 upsert of one dimension table
    Upsert {
        #[arg(long)]
        table: String,
    },

    /// Denormalize orders and append resolved fact rows
    LoadFacts,

    /// Fill the date dimension for an inclusive calendar range
    PopulateDates {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,
    },

    /// Validate and transform one table end to end
    Run {
        #[arg(long)]
        table: String,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
