//! Two-stage resolution of a `DynaPath`.
//!
//! Both stages walk a flat id→entry map, restricting each step to the
//! children picked by the previous step and taking the first entry whose
//! text equals the segment. Trees are fetched fresh on every call.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument, trace, warn};

use crate::backend::OutlineBackend;
use crate::error::{BackendError, ResolveError};
use crate::path::DynaPath;
use crate::tree::{FileEntry, OutlineNode, ROOT_NODE_ID};

/// Descent rules for folders in the file tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Traversal {
    /// After matching a folder, the next segment is looked up among the
    /// account root's children again, not the folder's own children.
    #[default]
    Compatible,
    /// After matching a folder, the next segment is looked up among that folder's children.
    Nested,
}

/// A fully resolved path.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub document_id: String,
    pub node: OutlineNode,
}

/// Resolves paths against an `OutlineBackend`.
pub struct Resolver {
    backend: Arc<dyn OutlineBackend>,
    traversal: Traversal,
    strict_segments: bool,
}

impl Resolver {
    pub fn new(backend: Arc<dyn OutlineBackend>) -> Self {
        Self {
            backend,
            traversal: Traversal::default(),
            strict_segments: false,
        }
    }

    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Fail with `SegmentNotFound` instead of skipping segments that match nothing.
    pub fn with_strict_segments(mut self, strict: bool) -> Self {
        self.strict_segments = strict;
        self
    }

    /// Resolve the document, then the node inside it.
    ///
    /// Returns `None` when either stage ends without a target. The document
    /// read is skipped entirely when no document matched.
    #[instrument(skip(self, path), fields(path = %path), level = "debug")]
    pub async fn resolve(&self, path: &DynaPath) -> Result<Option<Resolution>, ResolveError> {
        let Some(document_id) = self.resolve_document(path.document_segments()).await? else {
            info!("No document matched {}", path);
            return Ok(None);
        };

        let node = self
            .resolve_node(&document_id, path.node_segments())
            .await?;

        match node {
            Some(node) => {
                info!("Resolved {} to node {} in {}", path, node.id, document_id);
                Ok(Some(Resolution { document_id, node }))
            }
            None => {
                info!("No node matched {} in {}", path, document_id);
                Ok(None)
            }
        }
    }

    /// Resolve document segments to a document id.
    ///
    /// A document must be the last segment: any segment after a matched
    /// document fails with `DocumentNotTerminal`.
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve_document(
        &self,
        segments: &[String],
    ) -> Result<Option<String>, ResolveError> {
        let listing = self.backend.list_files().await?;

        let files: HashMap<&str, &FileEntry> = listing
            .files
            .iter()
            .map(|f| (f.id.as_str(), f))
            .collect();
        trace!("File tree: {:?}", files);

        let root = files.get(listing.root_file_id.as_str()).ok_or_else(|| {
            BackendError::Malformed(format!(
                "root file {} missing from listing",
                listing.root_file_id
            ))
        })?;
        debug!("Fetched {} files, root {}", files.len(), root.id);

        let mut candidates = root.child_ids();
        let mut target: Option<&FileEntry> = None;

        for (depth, segment) in segments.iter().enumerate() {
            if let Some(document) = target {
                return Err(ResolveError::DocumentNotTerminal {
                    document: document.title.clone(),
                    segment: segment.clone(),
                });
            }

            match first_match(candidates, &files, |f| f.title == *segment) {
                Some(folder) if folder.is_folder() => {
                    debug!("Segment {:?} matched folder {}", segment, folder.id);
                    candidates = match self.traversal {
                        Traversal::Compatible => root.child_ids(),
                        Traversal::Nested => folder.child_ids(),
                    };
                }
                Some(document) => {
                    debug!("Segment {:?} matched document {}", segment, document.id);
                    target = Some(document);
                }
                None => self.unmatched(segment, depth)?,
            }
        }

        Ok(target.map(|f| f.id.clone()))
    }

    /// Resolve node segments inside one document, starting from its root.
    ///
    /// Returns the last node matched; an unmatched segment leaves the
    /// previous target in place.
    #[instrument(skip(self), level = "debug")]
    pub async fn resolve_node(
        &self,
        document_id: &str,
        segments: &[String],
    ) -> Result<Option<OutlineNode>, ResolveError> {
        let document = self.backend.read_document(document_id).await?;

        let nodes: HashMap<&str, &OutlineNode> = document
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n))
            .collect();
        trace!("Node tree: {:?}", nodes);

        let root = nodes.get(ROOT_NODE_ID).ok_or_else(|| {
            BackendError::Malformed(format!("document {} has no root node", document_id))
        })?;
        debug!("Fetched {} nodes for document {}", nodes.len(), document_id);

        let mut candidates = root.child_ids();
        let mut target: Option<&OutlineNode> = None;

        for (depth, segment) in segments.iter().enumerate() {
            match first_match(candidates, &nodes, |n| n.content == *segment) {
                Some(node) => {
                    debug!("Segment {:?} matched node {}", segment, node.id);
                    candidates = node.child_ids();
                    target = Some(node);
                }
                None => self.unmatched(segment, depth)?,
            }
        }

        Ok(target.cloned())
    }

    fn unmatched(&self, segment: &str, depth: usize) -> Result<(), ResolveError> {
        if self.strict_segments {
            return Err(ResolveError::SegmentNotFound {
                segment: segment.to_string(),
                depth,
            });
        }
        debug!("No match for segment {:?} at depth {}", segment, depth);
        Ok(())
    }
}

/// First candidate, in service order, accepted by `matches`.
fn first_match<'a, T>(
    candidates: &[String],
    lookup: &HashMap<&str, &'a T>,
    matches: impl Fn(&T) -> bool,
) -> Option<&'a T> {
    candidates
        .iter()
        .filter_map(|id| {
            let entry = lookup.get(id.as_str()).copied();
            if entry.is_none() {
                warn!("Child {} is missing from the fetched tree", id);
            }
            entry
        })
        .find(|entry| matches(entry))
}
