//! Node printing
//!
//! Printing runs through an ordered chain of node printers. Interception
//! layers (like table rendering) sit at the head and forward anything they
//! don't handle; the chain terminates in the engine's own
//! [`default::DefaultPrinter`]. Comment placement happens once before
//! printing and is consulted by every chain entry through the shared
//! [`comments::CommentAssignments`] side table.

pub mod comments;
pub mod default;
pub mod interface;

pub use comments::{assign_comments, CommentAssignments, CommentSlot, CommentStyle};
pub use default::DefaultPrinter;
pub use interface::{
    CommentVerdict, NodePrinter, ParsedSource, PrintContext, PrintError, PrinterFeatures,
};
