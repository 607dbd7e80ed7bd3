use moka::future::Cache;
use std::time::Duration;

use crate::model::employee::EmployeeId;

/// Upper bound on employees tracked at once; entries expire after the window anyway.
const MAX_TRACKED: u64 = 100_000;

/// Per-employee gate in front of the scan endpoint. A scan opens a window
/// during which further scans of the same employee are refused.
#[derive(Clone)]
pub struct ScanCooldown {
    cache: Option<Cache<EmployeeId, ()>>,
}

impl ScanCooldown {
    /// A zero window disables the gate.
    pub fn new(window: Duration) -> Self {
        let cache = (!window.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(MAX_TRACKED)
                .time_to_live(window)
                .build()
        });
        Self { cache }
    }

    /// True when the scan may proceed. Check and insert are one atomic step.
    pub async fn try_acquire(&self, employee_id: EmployeeId) -> bool {
        match &self.cache {
            Some(cache) => cache.entry(employee_id).or_insert(()).await.is_fresh(),
            None => true,
        }
    }
}
