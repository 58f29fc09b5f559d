//=========================================================================
// Event Collector
//=========================================================================
//
// Host event collector with bounded polling and shutdown detection.
//
// Architecture:
//   Receiver<HostEvent> → collect_frame() → ui_events → TickControl
//
// Bounded polling prevents starvation when the host floods the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::HostEvent;
use crate::core::ui_event::UiEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects host events per frame.
pub(crate) struct EventCollector {
    receiver: Receiver<HostEvent>,
    ui_events: Vec<UiEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<HostEvent>) -> Self {
        Self {
            receiver,
            ui_events: Vec::with_capacity(8),
        }
    }

    /// Collects pending host events (bounded to prevent starvation).
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        self.ui_events.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "host", "Host channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "host", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Returns the UI events collected for this frame.
    #[cfg(test)]
    pub(crate) fn events(&self) -> &[UiEvent] {
        &self.ui_events
    }

    /// Takes ownership of the collected UI events, leaving an empty vec.
    pub(crate) fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.ui_events)
    }

    fn handle_event(&mut self, event: HostEvent) -> TickControl {
        match event {
            HostEvent::Ui(batch) => {
                self.ui_events.extend(batch);
                TickControl::Continue
            }
            HostEvent::CloseRequested => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
