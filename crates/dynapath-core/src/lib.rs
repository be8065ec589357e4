//! Core types for addressing outline nodes by human-readable path.
//!
//! This crate has no transport code. It defines:
//! - `DynaPath`: a document path plus a node path, with fluent composition
//! - `FileListing` / `OutlineDocument`: the two tree shapes a remote outliner returns
//! - `OutlineBackend`: the seam over the remote service
//! - `Resolver`: the two-stage walk from a `DynaPath` to a concrete node

mod backend;
mod error;
mod path;
mod resolve;
mod tree;

pub use backend::OutlineBackend;
pub use error::{BackendError, PathError, ResolveError};
pub use path::{DynaPath, PathSource};
pub use resolve::{Resolution, Resolver, Traversal};
pub use tree::{FileEntry, FileKind, FileListing, OutlineDocument, OutlineNode, ROOT_NODE_ID};
