//=========================================================================
// Audio Output
//=========================================================================
//
// Bridges the audio service with the host audio facility.
//
// Architecture:
//   AudioService ──Sender<PlaybackCommand>──► audio thread ──► AudioDevice
//
// The audio thread runs until every sender is gone, then returns the
// number of commands it handled.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::io;
use std::thread;

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::services::PlaybackCommand;

//=== AudioDevice =========================================================

/// Host audio facility receiving playback commands.
///
/// Implement this to hook the runtime up to a real mixer. Commands arrive
/// in the order the audio service issued them.
pub trait AudioDevice: Send + 'static {
    fn handle(&mut self, command: PlaybackCommand);
}

//=== LogDevice ===========================================================

/// Default device: logs every command and plays nothing.
#[derive(Debug, Default)]
pub struct LogDevice;

impl AudioDevice for LogDevice {
    fn handle(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::PlayOneShot { clip, volume } => {
                info!(target: "audio", "Play one-shot {} at {:.2}", clip, volume)
            }
            PlaybackCommand::PlayAmbient { clip, looping, volume } => {
                info!(target: "audio", "Play ambient {} at {:.2} (loop: {})", clip, volume, looping)
            }
            PlaybackCommand::StopAmbient => info!(target: "audio", "Stop ambient"),
            PlaybackCommand::SetAmbientVolume(volume) => {
                info!(target: "audio", "Ambient volume {:.2}", volume)
            }
        }
    }
}

//=== Audio Thread ========================================================

/// Spawns the thread feeding `device` from `receiver`.
pub(crate) fn spawn_audio_thread(
    mut device: Box<dyn AudioDevice>,
    receiver: Receiver<PlaybackCommand>,
) -> io::Result<thread::JoinHandle<u64>> {
    thread::Builder::new()
        .name("audio".to_string())
        .spawn(move || {
            let mut handled = 0;
            for command in receiver.iter() {
                device.handle(command);
                handled += 1;
            }
            debug!(target: "audio", "Audio thread drained, {} commands handled", handled);
            handled
        })
}

//=========================================================================
// Unit Tests
//=========================================================================
