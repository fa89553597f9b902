//! Platform probes used by the stats layer. Elevation is advisory only: it
//! changes a warning message and whether the real page-cache drop is attempted,
//! never the polling or task behavior.

/// Whether the process runs with elevated privileges (root on unix).
#[cfg(unix)]
pub fn is_elevated() -> bool {
    // Safe: geteuid has no failure mode and touches no memory.
    unsafe { libc::geteuid() == 0 }
}

/// Elevation detection is not implemented off unix; default to "not elevated".
#[cfg(not(unix))]
pub fn is_elevated() -> bool {
    false
}

/// Ask the kernel to drop reclaimable page caches. Returns `Ok(true)` when the
/// drop was performed, `Ok(false)` when skipped (not elevated or unsupported
/// platform), `Err` when the write itself failed.
#[cfg(target_os = "linux")]
pub fn drop_file_caches() -> std::io::Result<bool> {
    if !is_elevated() {
        return Ok(false);
    }
    std::fs::write("/proc/sys/vm/drop_caches", "1")?;
    Ok(true)
}

#[cfg(not(target_os = "linux"))]
pub fn drop_file_caches() -> std::io::Result<bool> {
    Ok(false)
}
