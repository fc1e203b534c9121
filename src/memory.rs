/// A source of the process' peak resident set size.
pub trait MemoryGauge {
    /// Peak resident set size of the process so far, in kilobytes, or `None` when the
    /// platform does not report it.
    fn peak_rss_kb(&self) -> Option<u64>;
}

/// Reads the peak resident set size from `getrusage(RUSAGE_SELF)`.
#[derive(Debug, Default, Copy, Clone)]
pub struct RusageGauge;

impl MemoryGauge for RusageGauge {
    #[cfg(unix)]
    fn peak_rss_kb(&self) -> Option<u64> {
        let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
        // SAFETY: getrusage only writes into the struct we pass it
        let status = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if status != 0 {
            return None;
        }
        // SAFETY: getrusage returned success, so the struct is initialised
        let max_rss = unsafe { usage.assume_init() }.ru_maxrss;
        u64::try_from(max_rss).ok().map(max_rss_to_kb)
    }

    #[cfg(not(unix))]
    fn peak_rss_kb(&self) -> Option<u64> {
        None
    }
}

/// `ru_maxrss` is in bytes on Apple platforms and in kilobytes elsewhere.
#[cfg(any(target_os = "macos", target_os = "ios"))]
fn max_rss_to_kb(max_rss: u64) -> u64 {
    max_rss / 1024
}

#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
fn max_rss_to_kb(max_rss: u64) -> u64 {
    max_rss
}

/// A gauge that always reports the same value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedGauge(pub u64);

impl MemoryGauge for FixedGauge {
    fn peak_rss_kb(&self) -> Option<u64> {
        Some(self.0)
    }
}
