//! Data types exchanged with memory bank callers.
//!
//! - [`AppendTarget`]: one entry to append, optionally scoped to a section.
//! - [`AppendResult`]: per-document outcome tagged with an [`AppendStatus`].
//! - [`Files`]: either the catalog of document names or their contents.

mod document;
mod entry;

pub use document::*;
pub use entry::*;
