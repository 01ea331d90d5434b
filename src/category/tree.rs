use std::slice;

use serde::Serialize;
use tracing::debug;

use super::path::CategoryPath;
use crate::error::{require_non_blank, EngineError, EngineResult, Entity};
use crate::media::VideoId;

const ROOT: usize = 0;

#[derive(Debug)]
struct CategoryNode {
    name: String,
    children: Vec<usize>,
    videos: Vec<VideoId>,
}

impl CategoryNode {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
            videos: Vec::new(),
        }
    }
}

/// One row of a pre-order walk over the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOutlineEntry {
    pub depth: usize,
    pub name: String,
    pub path: CategoryPath,
    pub direct_videos: usize,
}

/// Category hierarchy stored as an arena. Nodes are only ever appended as
/// children of existing nodes, so the structure cannot contain cycles.
#[derive(Debug)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
}

impl CategoryTree {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![CategoryNode::new(root_name.into())],
        }
    }

    pub fn root_name(&self) -> &str {
        &self.nodes[ROOT].name
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn resolve(&self, path: &CategoryPath) -> Option<usize> {
        let mut current = ROOT;
        for segment in path.segments() {
            current = *self.nodes[current]
                .children
                .iter()
                .find(|&&child| self.nodes[child].name == *segment)?;
        }
        Some(current)
    }

    fn resolve_or_err(&self, path: &CategoryPath) -> EngineResult<usize> {
        self.resolve(path)
            .ok_or_else(|| EngineError::not_found(Entity::Category, path))
    }

    pub fn contains(&self, path: &CategoryPath) -> bool {
        self.resolve(path).is_some()
    }

    pub fn add_category(&mut self, parent: &CategoryPath, name: &str) -> EngineResult<CategoryPath> {
        let name = require_non_blank(name, "Category name")?;
        if name.contains('/') {
            return Err(EngineError::Invalid(format!(
                "Category name '{}' cannot contain '/'",
                name
            )));
        }
        let parent_idx = self.resolve_or_err(parent)?;
        let path = parent.child(name);
        if self.nodes[parent_idx]
            .children
            .iter()
            .any(|&child| self.nodes[child].name == name)
        {
            return Err(EngineError::duplicate(Entity::Category, &path));
        }

        let idx = self.nodes.len();
        self.nodes.push(CategoryNode::new(name.to_string()));
        self.nodes[parent_idx].children.push(idx);
        debug!("Added category {}", path);
        Ok(path)
    }

    pub fn attach_video(&mut self, path: &CategoryPath, video: VideoId) -> EngineResult<()> {
        let idx = self.resolve_or_err(path)?;
        let videos = &mut self.nodes[idx].videos;
        if !videos.contains(&video) {
            videos.push(video);
        }
        Ok(())
    }

    /// Removes the video from whichever node holds it.
    pub fn detach_video(&mut self, video: VideoId) -> bool {
        for node in &mut self.nodes {
            if let Some(pos) = node.videos.iter().position(|v| *v == video) {
                node.videos.remove(pos);
                return true;
            }
        }
        false
    }

    /// Videos attached to `path`, or to `path` and all its descendants in
    /// depth-first pre-order (node first, then children left to right).
    pub fn list_videos(
        &self,
        path: &CategoryPath,
        include_descendants: bool,
    ) -> EngineResult<CategoryVideos<'_>> {
        let idx = self.resolve_or_err(path)?;
        Ok(CategoryVideos {
            tree: self,
            stack: vec![idx],
            pending: [].iter(),
            include_descendants,
        })
    }

    /// Child paths of `path`, left to right.
    pub fn children(&self, path: &CategoryPath) -> EngineResult<Vec<CategoryPath>> {
        let idx = self.resolve_or_err(path)?;
        Ok(self.nodes[idx]
            .children
            .iter()
            .map(|&child| path.child(self.nodes[child].name.clone()))
            .collect())
    }

    /// First node named `name` in depth-first order.
    pub fn find_by_name(&self, name: &str) -> Option<CategoryPath> {
        if self.nodes[ROOT].name == name {
            return Some(CategoryPath::root());
        }
        self.outline()
            .into_iter()
            .find(|entry| entry.depth > 0 && entry.name == name)
            .map(|entry| entry.path)
    }

    pub fn outline(&self) -> Vec<CategoryOutlineEntry> {
        let mut rows = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(ROOT, 0usize, CategoryPath::root())];
        while let Some((idx, depth, path)) = stack.pop() {
            let node = &self.nodes[idx];
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1, path.child(self.nodes[child].name.clone())));
            }
            rows.push(CategoryOutlineEntry {
                depth,
                name: node.name.clone(),
                path,
                direct_videos: node.videos.len(),
            });
        }
        rows
    }
}

/// Lazy depth-first walk over the videos of a subtree. Cheap to recreate, so
/// callers restart a listing by asking the tree again.
pub struct CategoryVideos<'a> {
    tree: &'a CategoryTree,
    stack: Vec<usize>,
    pending: slice::Iter<'a, VideoId>,
    include_descendants: bool,
}

impl<'a> Iterator for CategoryVideos<'a> {
    type Item = VideoId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(video) = self.pending.next() {
                return Some(*video);
            }
            let idx = self.stack.pop()?;
            let node = &self.tree.nodes[idx];
            self.pending = node.videos.iter();
            if self.include_descendants {
                self.stack.extend(node.children.iter().rev().copied());
            }
        }
    }
}
