//! Singly-linked suggestion list with a traversal cursor.
//!
//! Nodes live in an arena and link to each other by index. The cursor starts
//! before the first node; each `next` moves it forward by one link.

use clap::ValueEnum;

use crate::error::{EngineError, EngineResult};

/// What `next` does once the cursor sits on the last node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SuggestionEndPolicy {
    /// Stay on the last node and report `EndOfList`.
    #[default]
    Hold,
    /// Jump back to the head.
    Wrap,
}

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    BeforeFirst,
    At(usize),
}

#[derive(Debug, Clone)]
pub struct SuggestionList<T> {
    nodes: Vec<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    cursor: Cursor,
    policy: SuggestionEndPolicy,
}

impl<T> SuggestionList<T> {
    pub fn new(policy: SuggestionEndPolicy) -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            cursor: Cursor::BeforeFirst,
            policy,
        }
    }

    pub fn policy(&self) -> SuggestionEndPolicy {
        self.policy
    }

    /// Replaces the whole list and rewinds the cursor.
    pub fn build<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.cursor = Cursor::BeforeFirst;
        for item in items {
            self.push(item);
        }
    }

    /// Appends at the tail. The cursor does not move.
    pub fn push(&mut self, item: T) {
        let idx = self.nodes.len();
        self.nodes.push(Node { item, next: None });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    pub fn next(&mut self) -> EngineResult<&T> {
        let target = match self.cursor {
            Cursor::BeforeFirst => self.head,
            Cursor::At(idx) => match (self.nodes[idx].next, self.policy) {
                (Some(next), _) => Some(next),
                (None, SuggestionEndPolicy::Wrap) => self.head,
                (None, SuggestionEndPolicy::Hold) => None,
            },
        };
        let idx = target.ok_or(EngineError::EndOfList)?;
        self.cursor = Cursor::At(idx);
        Ok(&self.nodes[idx].item)
    }

    pub fn reset(&mut self) {
        self.cursor = Cursor::BeforeFirst;
    }

    pub fn current(&self) -> EngineResult<&T> {
        match self.cursor {
            Cursor::BeforeFirst => Err(EngineError::NotStarted),
            Cursor::At(idx) => Ok(&self.nodes[idx].item),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks the links from the head. Does not touch the cursor.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
        }
    }

    /// Drops items failing `keep`. A cursor on a dropped node falls back to
    /// the closest kept node before it, or to before-first.
    pub(crate) fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let cursor_at = match self.cursor {
            Cursor::At(idx) => Some(idx),
            Cursor::BeforeFirst => None,
        };
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut link = self.head;
        while let Some(idx) = link {
            order.push(idx);
            link = self.nodes[idx].next;
        }

        let mut slots: Vec<Option<T>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|node| Some(node.item))
            .collect();
        self.head = None;
        self.tail = None;
        self.cursor = Cursor::BeforeFirst;

        let mut passed_cursor = false;
        for idx in order {
            let Some(item) = slots[idx].take() else {
                continue;
            };
            if keep(&item) {
                self.push(item);
                if cursor_at.is_some() && !passed_cursor {
                    self.cursor = Cursor::At(self.nodes.len() - 1);
                }
            }
            if cursor_at == Some(idx) {
                passed_cursor = true;
            }
        }
    }
}

pub struct Iter<'a, T> {
    nodes: &'a [Node<T>],
    next: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = &self.nodes[idx];
        self.next = node.next;
        Some(&node.item)
    }
}
