//! Logging macros shared by the firmware and the host tests.
//!
//! On the embedded target these forward to `defmt` (carried over RTT by `defmt-rtt`).
//! On the host they print with a level prefix so test output shows what the state
//! machine did. Format strings must stay within the subset both backends accept:
//! `{}`, `{:?}` and `{:#x}`.

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::info!($($arg)*);

        #[cfg(not(target_os = "none"))]
        ::std::println!("[INFO] {}", ::core::format_args!($($arg)*));
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::warn!($($arg)*);

        #[cfg(not(target_os = "none"))]
        ::std::println!("[WARN] {}", ::core::format_args!($($arg)*));
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::error!($($arg)*);

        #[cfg(not(target_os = "none"))]
        ::std::eprintln!("[ERROR] {}", ::core::format_args!($($arg)*));
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::debug!($($arg)*);

        #[cfg(not(target_os = "none"))]
        ::std::println!("[DEBUG] {}", ::core::format_args!($($arg)*));
    }};
}
