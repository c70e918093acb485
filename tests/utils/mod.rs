//! Shared fixtures for the integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sanctions_dashboard::SanctionRecord;

pub const OFAC: &str = "Office of Foreign Assets Control (OFAC)";

/// Fixed run time so validity checks are deterministic
#[must_use]
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[must_use]
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An open-ended sanction on a Russian person since 2015 and an expired one
/// on a Russian company
#[must_use]
pub fn scenario_records() -> Vec<SanctionRecord> {
    vec![
        SanctionRecord::new("sanction-a", "person-a", "Person")
            .with_names(&["Ivan Petrov"])
            .with_start_date(&["2015-01-01"])
            .with_countries(&["ru"])
            .with_origin(&["ru"])
            .with_authority(&[OFAC])
            .with_source_url(&["https://example.org/ofac"]),
        SanctionRecord::new("sanction-b", "company-b", "Company")
            .with_names(&["Rostok LLC"])
            .with_start_date(&["2010-01-01"])
            .with_end_date(&["2011-01-01"])
            .with_countries(&["ru"]),
    ]
}

/// `count` sanctions on distinct persons, all starting on `date`
#[must_use]
pub fn same_day_people(count: usize, date: &str) -> Vec<SanctionRecord> {
    (0..count)
        .map(|i| {
            let name = format!("Person {i}");
            SanctionRecord::new(format!("sanction-{i}"), format!("person-{i}"), "Person")
                .with_names(&[name.as_str()])
                .with_start_date(&[date])
                .with_countries(&["ru"])
                .with_origin(&["ru"])
        })
        .collect()
}
