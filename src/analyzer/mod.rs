//! # Build Observation
//!
//! A [`BuildObserver`] is the per-run session a build pipeline talks to. It
//! admits, normalizes, and records resolved edges while the build runs, and
//! turns them into an [`Analysis`] and a formatted report once the build is
//! complete.
//!
//! ## Example
//!
//! ```
//! use loop_de_loop::analyzer::BuildObserver;
//! use loop_de_loop::detector::CircularMode;
//! use loop_de_loop::reports::JsonFormatter;
//!
//! # fn main() -> Result<(), loop_de_loop::error::LoopError> {
//! let observer = BuildObserver::builder()
//!     .with_mode(CircularMode::Circular)
//!     .with_formatter(JsonFormatter::compact())
//!     .build();
//!
//! observer.observe("src/index.js", "src/index.js")?;
//! observer.observe("src/a.js", "src/index.js")?;
//! observer.observe("src/index.js", "src/a.js")?;
//!
//! let outcome = observer.finish()?;
//! assert_eq!(outcome.report, r#"["src/index.js","src/a.js","src/index.js"]"#);
//! # Ok(())
//! # }
//! ```

mod analyzer_impl;
pub use analyzer_impl::*;
