//! Frontier queue for the breadth-first crawl
//!
//! URLs are handed out strictly first-in first-out. Duplicates are accepted
//! on push; the crawl loop filters them at pop time against the crawl state.

use std::collections::VecDeque;

/// FIFO work queue of URLs pending a crawl attempt
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// URLs waiting to be popped, oldest first
    queue: VecDeque<String>,

    /// Total number of URLs ever pushed, duplicates included
    enqueued: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a frontier seeded with `url`
    pub fn seeded(url: impl Into<String>) -> Self {
        let mut frontier = Self::new();
        frontier.push(url);
        frontier
    }

    /// Appends a URL to the back of the queue
    pub fn push(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
        self.enqueued += 1;
    }

    /// Appends every URL in order
    pub fn extend<I>(&mut self, urls: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for url in urls {
            self.push(url);
        }
    }

    /// Removes and returns the oldest URL
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Returns the number of URLs in the frontier
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total number of URLs ever pushed
    pub fn total_enqueued(&self) -> usize {
        self.enqueued
    }
}
