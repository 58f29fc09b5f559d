//=========================================================================
// Host Bridge
//=========================================================================
//
// Bridges the host environment (UI layer, audio facility) with the
// engine loop.
//
// Both directions are plain crossbeam channels, so hosts can run on any
// thread and backends can be swapped without touching core code.
//
// Components:
// - `interface`: host event types (the contract)
// - `event_collector`: engine-side per-frame event collection
// - `audio_output`: audio device trait and its worker thread
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod audio_output;
pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub use audio_output::{AudioDevice, LogDevice};
pub use event_collector::TickControl;
pub use interface::HostEvent;

//=== Internal API ========================================================

pub(crate) use audio_output::spawn_audio_thread;
pub(crate) use event_collector::EventCollector;
