// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{Datelike, NaiveDate};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One calendar day of the date dimension with its derived attributes.
/// `date_key` is deterministic (`yyyymmdd`), so re-populating a range can
/// never produce a second row for the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDimensionRow {
    pub date_key: i32,
    pub date: NaiveDate,
    pub year: i32,
    pub quarter: u32,
    pub month: u32,
    pub day: u32,
    /// Day of week, Sunday = 0.
    pub weekday: u32,
    pub iso_week: u32,
}

impl DateDimensionRow {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date_key: date.year() * 10_000 + (date.month() * 100 + date.day()) as i32,
            date,
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().num_days_from_sunday(),
            iso_week: date.iso_week().week(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// The `end_date` value marking a dimension version as currently valid.
pub fn open_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_attributes() {
        let row = DateDimensionRow::for_date(NaiveDate::from_ymd_opt(2023, 8, 15).unwrap());

        assert_eq!(row.date_key, 2023_08_15);
        assert_eq!(row.year, 2023);
        assert_eq!(row.quarter, 3);
        assert_eq!(row.month, 8);
        assert_eq!(row.day, 15);
        // 2023-08-15 was a Tuesday
        assert_eq!(row.weekday, 2);
        assert_eq!(row.iso_week, 33);
    }

    #[test]
    fn test_iso_week_belongs_to_previous_year_at_boundary() {
        // 2023-01-01 is a Sunday that falls into ISO week 52 of 2022
        let row = DateDimensionRow::for_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());

        assert_eq!(row.weekday, 0);
        assert_eq!(row.iso_week, 52);
        assert_eq!(row.quarter, 1);
    }

    #[test]
    fn test_leap_day() {
        let row = DateDimensionRow::for_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        assert_eq!(row.date_key, 2024_02_29);
        assert_eq!(row.quarter, 1);
        assert_eq!(row.day, 29);
    }
}
