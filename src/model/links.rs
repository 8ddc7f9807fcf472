// src/model/links.rs

use crate::model::queues::DelayQueue;
use std::ops::{Index, IndexMut};

/// Stable handle to one pipe between two adjacent participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(usize);

/// Arena holding every inter-tier pipe. Tiers keep `LinkId`s and borrow the
/// arena for the length of their turn.
#[derive(Debug, Default, Clone)]
pub struct Links {
    queues: Vec<DelayQueue>,
}

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, queue: DelayQueue) -> LinkId {
        self.queues.push(queue);
        LinkId(self.queues.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

impl Index<LinkId> for Links {
    type Output = DelayQueue;

    fn index(&self, id: LinkId) -> &DelayQueue {
        &self.queues[id.0]
    }
}

impl IndexMut<LinkId> for Links {
    fn index_mut(&mut self, id: LinkId) -> &mut DelayQueue {
        &mut self.queues[id.0]
    }
}
