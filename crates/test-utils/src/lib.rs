pub mod builders;

use std::sync::Once;

use chrono::{NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Route planner logs through the test harness.
///
/// Output is captured per test and shown only when a test fails. Filter
/// directives come from `STUDYPLAN_LOG` (default `warn`), so
/// `STUDYPLAN_LOG=studyplan::plan=debug` shows every placement decision.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("STUDYPLAN_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Deterministic RNG for session-type draws.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// `date` at the given wall-clock time.
pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).expect("valid test time")
}
