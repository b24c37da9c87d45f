//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const HEADER: &str = "indiastates,industry_group,total_workers,main_males,main_females,marginal_males,marginal_females,total_main_workers,total_marginal_workers";

/// Write `contents` to a temp file with the given extension.
pub fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(tmp, "{contents}").unwrap();
    tmp.flush().unwrap();
    tmp
}

/// The three-row dashboard scenario.
pub fn scenario_csv() -> NamedTempFile {
    let body = [
        HEADER,
        "StateA,Ind1,100,60,40,0,0,100,0",
        "StateA,Ind2,50,30,20,0,0,50,0",
        "StateB,Ind1,30,10,5,10,5,15,15",
    ]
    .join("\n");
    write_temp(".csv", &body)
}
