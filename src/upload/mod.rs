//! FIFO staging area for uploads waiting to be published.

use std::collections::{vec_deque, VecDeque};

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone)]
pub struct UploadQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for UploadQueue<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> UploadQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    pub fn process_next(&mut self) -> EngineResult<T> {
        self.items.pop_front().ok_or(EngineError::Empty("Upload queue"))
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Head to tail.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }
}
