//! Bridges that route records from other logging facades into a [`Logger`](crate::Logger).
//!
//! Records emitted by this crate itself are never bridged back.

#[cfg(feature = "log-compat")]
pub mod log_bridge;

#[cfg(feature = "tracing-compat")]
pub mod tracing_bridge;

#[cfg(feature = "log-compat")]
pub use log_bridge::{LogBridge, init_log_bridge};

#[cfg(feature = "tracing-compat")]
pub use tracing_bridge::{TracingBridge, init_tracing_bridge};

#[cfg(any(feature = "log-compat", feature = "tracing-compat"))]
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// True for targets inside this crate
#[cfg(any(feature = "log-compat", feature = "tracing-compat"))]
fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

#[cfg(all(test, any(feature = "log-compat", feature = "tracing-compat")))]
mod tests {
    use super::*;

    #[test]
    fn test_own_target() {
        assert!(is_own_target("proven_logger_rotating"));
        assert!(is_own_target("proven_logger_rotating::rotation"));
        assert!(!is_own_target("proven_logger_rotating_extra"));
        assert!(!is_own_target("app::worker"));
    }
}
