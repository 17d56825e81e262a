//! Locale handling.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → locale.rs (first segment a configured locale? split it off)
//!     → otherwise detector.rs (cookie / Accept-Language / default)
//!         → Detection::{Next, Rewrite, Redirect}
//! ```

pub mod detector;
pub mod locale;

pub use detector::{Detection, LocaleDetector, LocalePrefix, NegotiatingDetector, NoopDetector};
pub use locale::{LocaleError, LocalePath, LocaleSet};
