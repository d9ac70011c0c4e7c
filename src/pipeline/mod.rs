//! Message triage pipeline.
//!
//! One invocation flows through:
//! 1. `LogStore::ensure_ready()` — self-healing log initialization
//! 2. `Classifier::classify()` — model call, raw JSON text back
//! 3. `validate()` — schema and domain checks, typed failures
//! 4. Routing — spam/sales/support policy, log append, conditional alert
//!
//! Classification failures abort the invocation; notification failures are
//! recorded in the returned report and never abort.

pub mod router;
pub mod types;
pub mod validate;

pub use router::Router;
pub use types::{Classification, EmailStatus, Intent, RoutedCase, TriageReport};
pub use validate::validate;
