//! Human-readable sizes, rates and elapsed times for stderr reporting
//!
//! Sizes use binary units to agree with the MiB/s rates reported by the core.

use std::time::Duration;

const BINARY_UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];

/// Byte count in binary units; exact below 1 KiB
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < BINARY_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    // Whole multiples such as page sizes read better without decimals
    if value.fract() == 0.0 {
        format!("{value:.0} {}", BINARY_UNITS[unit])
    } else {
        format!("{value:.1} {}", BINARY_UNITS[unit])
    }
}

/// Rate given in MiB/s, dropping to KiB/s for slow sources such as pipes
pub fn format_rate(mib_per_sec: f64) -> String {
    if mib_per_sec >= 1.0 {
        format!("{mib_per_sec:.1} MiB/s")
    } else {
        format!("{:.0} KiB/s", mib_per_sec * 1024.0)
    }
}

/// Elapsed wall time: `0.042s`, `1m 05.3s`, `2h 03m 09s`
pub fn format_elapsed(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        0..60 => format!("{:.3}s", duration.as_secs_f64()),
        60..3600 => {
            let rest = duration.as_secs_f64() - (secs / 60 * 60) as f64;
            format!("{}m {rest:04.1}s", secs / 60)
        }
        _ => format!("{}h {:02}m {:02}s", secs / 3600, secs % 3600 / 60, secs % 60),
    }
}
