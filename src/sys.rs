//! Host-system defaults: the current instant and the host time zone.

#[cfg(feature = "sys")]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current instant in epoch milliseconds. Without the `sys`
/// feature the epoch itself is returned, keeping parse defaults
/// deterministic.
pub(crate) fn epoch_ms_now() -> i64 {
    #[cfg(feature = "sys")]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
    #[cfg(not(feature = "sys"))]
    {
        0
    }
}

/// Returns the host's IANA time zone identifier, when it can be
/// determined.
pub(crate) fn host_time_zone() -> Option<String> {
    #[cfg(feature = "sys")]
    {
        iana_time_zone::get_timezone().ok()
    }
    #[cfg(not(feature = "sys"))]
    {
        None
    }
}
