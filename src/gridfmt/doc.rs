//! Layout documents and their serialization
//!
//! The printer does not emit text directly; it builds a layout document
//! first and a separate serializer decides where lines actually break.
//! The document algebra follows the Wadler style: groups try to fit on one
//! line and break otherwise, fills break element by element, indentation
//! and alignment nest, and line-suffix content is deferred to the end of
//! the current line.
//!
//! ## Modules
//!
//! - `builders` - The `Doc` type and its constructor functions
//! - `printer` - Width-aware serialization of a `Doc` to text

pub mod builders;
pub mod printer;

pub use builders::{Doc, LineMode};
pub use printer::{print_doc, PrintedDoc, UNBOUNDED_WIDTH};
