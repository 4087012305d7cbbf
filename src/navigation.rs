// Copyright (C) 2026 BigLinux Team
// Licensed under GPL-3.0-or-later

/// Result of pressing "next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStep {
    Moved(usize),
    /// Next was pressed on the last page; the session ends
    Finish,
}

/// State of one progress dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotState {
    Completed,
    Active,
    Pending,
}

/// Current page among an ordered, non-empty list of pages.
///
/// Invariant: `current < count` and `count >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    current: usize,
    count: usize,
}

impl Navigation {
    /// Starts on page 0. A count of zero is raised to one: the introductory
    /// page always exists.
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            count: count.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.count
    }

    /// No-op on the first page
    pub fn back(&mut self) {
        if !self.is_first() {
            self.current -= 1;
        }
    }

    pub fn next(&mut self) -> NavStep {
        if self.is_last() {
            return NavStep::Finish;
        }
        self.current += 1;
        NavStep::Moved(self.current)
    }

    /// Returns false and leaves the state alone when `target` is out of range
    pub fn jump(&mut self, target: usize) -> bool {
        if target >= self.count {
            return false;
        }
        self.current = target;
        true
    }

    pub fn dots(&self) -> Vec<DotState> {
        (0..self.count)
            .map(|i| match i.cmp(&self.current) {
                std::cmp::Ordering::Less => DotState::Completed,
                std::cmp::Ordering::Equal => DotState::Active,
                std::cmp::Ordering::Greater => DotState::Pending,
            })
            .collect()
    }
}
