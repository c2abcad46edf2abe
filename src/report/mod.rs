//! Report renderers.
//!
//! - [`terminal`] — colored, tabular output; respects `--verbose` / `--quiet`.
//!
//! JSON output is produced directly in `main` with `serde_json`.

pub mod terminal;
