/// dirstat Core — ranking structures, scanning, and analysis.
///
/// This crate contains all business logic with zero rendering
/// dependencies. It is designed to be reusable across different
/// frontends (CLI, TUI, service).
///
/// # Modules
///
/// - [`tree`] — Order-statistics tree and the bounded top-K selector
///   every "top N" report is built on.
/// - [`model`] — Scan entry types and display formatting.
/// - [`scanner`] — Background filesystem walking with an event stream.
/// - [`analysis`] — Statistics collectors fed from the event stream.
pub mod analysis;
pub mod model;
pub mod scanner;
pub mod tree;
