//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene transition requests.
//
// The scene transition service queues requests here during updates. The
// scene manager drains the queue at tick boundaries.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;

//=== Load Mode ===========================================================

/// How a requested scene becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Applied at the current tick boundary.
    Immediate,

    /// Loaded over the scene's load steps, one per tick.
    Async,
}

//=== Completion Signal ===================================================

/// Sent exactly once when an asynchronous transition finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionComplete {
    pub scene: String,
}

//=== Transition Request ==================================================

/// A single queued transition.
#[derive(Debug)]
pub(crate) struct TransitionRequest {
    pub scene: String,
    pub mode: LoadMode,
    pub completion: Option<Sender<TransitionComplete>>,
}

//=== Transition Queue ====================================================

/// FIFO of pending transition requests.
#[derive(Debug, Default)]
pub(crate) struct TransitionQueue {
    queue: Vec<TransitionRequest>,
}

impl TransitionQueue {
    /// Queues a request for the next tick boundary.
    pub fn push(&mut self, request: TransitionRequest) {
        self.queue.push(request);
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests, leaving the queue empty.
    pub fn take(&mut self) -> Vec<TransitionRequest> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Tests
//=========================================================================
