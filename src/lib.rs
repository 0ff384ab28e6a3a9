//! # gridfmt
//!
//! A pretty-printer for array-heavy data scripts with marker-driven table
//! formatting.
//!
//! Array-of-array literals (and calls whose arguments are all array literals)
//! annotated with a `// prettier-table` line comment on the line directly
//! above are printed as fixed-width tables, one row per line with every
//! column padded to a common width. Everything else goes through the regular
//! width-aware layout engine.
//!
//! The usual entry point is [`gridfmt::pipeline::format_source`], or
//! [`gridfmt::pipeline::Formatter`] when extensions need to be configured.

pub mod gridfmt;
