//! Run-scoped leftover canvases
//!
//! The leftover map associates every source path with the canvas that
//! accumulates its unconsumed pixels. It lives for a whole run and is
//! passed explicitly to every input task.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};

use crate::canvas::Canvas;
use crate::errors::SliceResult;

/// Mapping from source path to its leftover canvas
#[derive(Debug, Default)]
pub struct LeftoverMap {
    canvases: BTreeMap<String, Canvas>,
}

impl LeftoverMap {
    pub fn new() -> Self {
        LeftoverMap::default()
    }

    /// Get the canvas for a source path, creating it on first use
    ///
    /// `init` runs only when no canvas exists for `source_path` yet, so the
    /// seeding it performs happens at most once per key.
    ///
    /// # Arguments
    /// * `source_path` - Relative source path used as key
    /// * `init` - Builds the initial canvas
    pub fn get_or_insert_with<F>(&mut self, source_path: &str, init: F) -> &mut Canvas
    where
        F: FnOnce() -> Canvas,
    {
        self.canvases.entry(source_path.to_string()).or_insert_with(|| {
            debug!("Creating leftover canvas for {}", source_path);
            init()
        })
    }

    pub fn get(&self, source_path: &str) -> Option<&Canvas> {
        self.canvases.get(source_path)
    }

    pub fn contains(&self, source_path: &str) -> bool {
        self.canvases.contains_key(source_path)
    }

    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    /// Iterate over (source path, canvas) pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Canvas)> {
        self.canvases.iter().map(|(path, canvas)| (path.as_str(), canvas))
    }

    /// Save every canvas below `root`, mirroring the source paths
    ///
    /// # Returns
    /// The number of files written
    pub fn save_all(&self, root: &Path) -> SliceResult<usize> {
        for (source_path, canvas) in &self.canvases {
            canvas.save(&root.join(source_path))?;
        }

        info!("Saved {} leftover images to {}", self.canvases.len(), root.display());
        Ok(self.canvases.len())
    }
}
