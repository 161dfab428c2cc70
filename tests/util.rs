//! Shared test utilities for integration tests
//!
//! Provides database fixtures and a launcher that records
//! plans instead of replacing the test process.

#![allow(dead_code)]

use assert_fs::prelude::*;
use gonav::core::dispatch::{DispatchOutcome, LaunchPlan, Launcher};

/// Write `content` as `slugs.data` inside a fresh temp directory.
pub fn make_database(content: &str) -> assert_fs::TempDir
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("slugs.data")
        .write_str(content)
        .expect("write database");

    tmp
}

/// Launcher that remembers every plan and pretends the hand-off worked
#[derive(Debug, Default)]
pub struct RecordingLauncher
{
    pub plans: Vec<LaunchPlan>,
}

impl Launcher for RecordingLauncher
{
    fn launch(
        &mut self,
        plan: &LaunchPlan,
    ) -> DispatchOutcome
    {
        self.plans
            .push(plan.clone());
        DispatchOutcome::Replaced
    }
}
