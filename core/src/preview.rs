use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket {
    pub row: usize,
    generation: u64,
}

/// Tracks the most recent file selection of every image row so that a slow
/// read cannot overwrite the preview of a newer one.
#[derive(Debug, Default)]
pub struct PreviewTracker {
    latest: HashMap<usize, u64>,
    next_generation: u64,
}

impl PreviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, row: usize) -> PreviewTicket {
        self.next_generation = self.next_generation.saturating_add(1);
        let generation = self.next_generation;
        self.latest.insert(row, generation);
        PreviewTicket { row, generation }
    }

    pub fn accept(&self, ticket: &PreviewTicket) -> bool {
        self.latest.get(&ticket.row) == Some(&ticket.generation)
    }

    pub fn forget(&mut self, row: usize) {
        self.latest.remove(&row);
    }

    pub fn pending_rows(&self) -> usize {
        self.latest.len()
    }
}
