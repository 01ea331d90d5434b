//! Bounded most-recent-first stack of playback events.

use std::collections::{vec_deque, VecDeque};
use std::iter::Rev;
use std::time::SystemTime;

use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::media::{VideoId, ViewerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaybackEvent {
    pub video: VideoId,
    pub viewer: ViewerId,
    pub played_at: SystemTime,
}

impl PlaybackEvent {
    pub fn new(video: VideoId, viewer: ViewerId) -> Self {
        Self {
            video,
            viewer,
            played_at: SystemTime::now(),
        }
    }
}

/// Fixed-capacity stack. The back of the deque is the top; pushing past the
/// capacity drops entries from the front.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryStack<T> {
    pub fn new(capacity: usize) -> EngineResult<Self> {
        if capacity == 0 {
            return Err(EngineError::Invalid(
                "History capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }

    pub fn peek(&self) -> EngineResult<&T> {
        self.items.back().ok_or(EngineError::Empty("History"))
    }

    /// Top to bottom, most recent first.
    pub fn iter(&self) -> Rev<vec_deque::Iter<'_, T>> {
        self.items.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.items.retain(keep);
    }
}

impl<'a, T> IntoIterator for &'a HistoryStack<T> {
    type Item = &'a T;
    type IntoIter = Rev<vec_deque::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_is_invalid() {
        assert!(matches!(
            HistoryStack::<u32>::new(0),
            Err(EngineError::Invalid(_))
        ));
    }

    #[test]
    fn test_holds_min_of_pushes_and_capacity() {
        for capacity in 1..5 {
            for pushes in 0..8 {
                let mut stack = HistoryStack::new(capacity).unwrap();
                for i in 0..pushes {
                    stack.push(i);
                }
                assert_eq!(stack.len(), pushes.min(capacity));
                let expected: Vec<_> = (0..pushes).rev().take(capacity).collect();
                assert_eq!(stack.iter().copied().collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn test_eviction_keeps_most_recent() {
        let mut stack = HistoryStack::new(3).unwrap();
        for video in ["A", "B", "C", "D"] {
            stack.push(video);
        }
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec!["D", "C", "B"]);
        assert_eq!(*stack.peek().unwrap(), "D");
    }

    #[test]
    fn test_peek_empty() {
        let stack = HistoryStack::<u32>::new(2).unwrap();
        assert_eq!(stack.peek(), Err(EngineError::Empty("History")));
    }

    #[test]
    fn test_iter_does_not_consume() {
        let mut stack = HistoryStack::new(5).unwrap();
        stack.push(1);
        stack.push(2);
        let first: Vec<_> = stack.iter().collect();
        let second: Vec<_> = (&stack).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_retain() {
        let mut stack = HistoryStack::new(5).unwrap();
        for i in [1, 2, 1, 3] {
            stack.push(i);
        }
        stack.retain(|&i| i != 1);
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![3, 2]);
    }
}
