//=========================================================================
// Audio Service
//=========================================================================
//
// Owns the two playback channels and the volume mix.
//
// Architecture:
//   AudioService
//     ├─ ambient: AmbientChannel (one current clip, loop-capable)
//     ├─ effect:  EffectChannel  (overlapping one-shots)
//     └─ output:  Sender<PlaybackCommand> ──► AudioDevice thread
//
// Effective volumes:
//   one-shot = call_volume * effect_volume * master_volume
//   ambient  = ambient_volume * master_volume
//
// Master and ambient volume changes are pushed to the live ambient
// channel immediately. Effect volume is read at the next one-shot, so
// sounds already playing keep the volume they started with.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::Service;

//=== AudioClip ===========================================================

/// Opaque handle to a decodable audio asset.
///
/// Cloning is cheap. The runtime never looks inside a clip; it only
/// forwards the handle to the audio device.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioClip(Arc<str>);

impl AudioClip {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//=== PlaybackCommand =====================================================

/// Requests sent from the audio service to the audio device.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    /// Fire-and-forget sound on the effect channel.
    PlayOneShot { clip: AudioClip, volume: f32 },

    /// Replace the ambient clip and start it.
    PlayAmbient {
        clip: AudioClip,
        looping: bool,
        volume: f32,
    },

    /// Stop ambient playback.
    StopAmbient,

    /// Update the live volume of the ambient channel.
    SetAmbientVolume(f32),
}

//=== Channels ============================================================

/// State of the ambient (music) channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientChannel {
    clip: Option<AudioClip>,
    looping: bool,
    volume: f32,
    playing: bool,
}

impl AmbientChannel {
    fn new(volume: f32) -> Self {
        Self {
            clip: None,
            looping: true,
            volume,
            playing: false,
        }
    }

    pub fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Live volume, already multiplied by the master volume.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

#[derive(Debug, Default)]
struct EffectChannel {
    played: u64,
}

//=== AudioService ========================================================

/// Process-wide sound service.
///
/// Reach it through the service registry:
///
/// ```rust
/// use startup_clicker::prelude::*;
///
/// let mut services = ServiceRegistry::new();
/// let audio = services.instance::<AudioService>();
/// audio.set_master_volume(0.5);
/// audio.play_button_click_sound(); // warns: no clip configured
/// assert_eq!(audio.master_volume(), 0.5);
/// ```
pub struct AudioService {
    button_click_clip: Option<AudioClip>,
    ambient: Option<AmbientChannel>,
    effect: Option<EffectChannel>,
    master_volume: f32,
    ambient_volume: f32,
    effect_volume: f32,
    output: Option<Sender<PlaybackCommand>>,
}

impl Service for AudioService {
    const NAME: &'static str = "AudioService";
}

impl Default for AudioService {
    fn default() -> Self {
        Self {
            button_click_clip: None,
            ambient: None,
            effect: None,
            master_volume: 1.0,
            ambient_volume: 1.0,
            effect_volume: 1.0,
            output: None,
        }
    }
}

impl AudioService {
    //--- Construction -----------------------------------------------------

    /// Creates a service with the given click clip already configured.
    pub fn with_button_click_clip(clip: AudioClip) -> Self {
        Self {
            button_click_clip: Some(clip),
            ..Self::default()
        }
    }

    /// Connects the service to an audio device.
    ///
    /// Replaces any previous output. Ambient playback started before the
    /// output existed is re-sent so the device catches up.
    pub fn attach_output(&mut self, output: Sender<PlaybackCommand>) {
        debug!(target: "audio", "Audio output attached");
        self.output = Some(output);

        let resume = self
            .ambient
            .as_ref()
            .filter(|channel| channel.playing)
            .and_then(|channel| Some((channel.clip.clone()?, channel.looping, channel.volume)));

        if let Some((clip, looping, volume)) = resume {
            self.send(PlaybackCommand::PlayAmbient { clip, looping, volume });
        }
    }

    /// Disconnects the audio device, returning the old sender.
    ///
    /// Dropping the returned sender lets the device thread finish.
    pub fn detach_output(&mut self) -> Option<Sender<PlaybackCommand>> {
        self.output.take()
    }

    //--- Playback ---------------------------------------------------------

    /// Plays the configured click clip on the effect channel.
    ///
    /// Without a configured clip this only logs a warning.
    pub fn play_button_click_sound(&mut self) {
        let Some(clip) = self.button_click_clip.clone() else {
            warn!(target: "audio", "Button click clip is not configured, skipping playback");
            return;
        };

        let volume = self.effect_volume * self.master_volume;
        self.emit_one_shot(clip, volume);
    }

    /// Plays `clip` on the effect channel, scaled by `volume`.
    ///
    /// `volume` is clamped to `[0, 1]`. A missing clip is a no-op.
    pub fn play_one_shot(&mut self, clip: Option<&AudioClip>, volume: f32) {
        let Some(clip) = clip else {
            debug!(target: "audio", "One-shot requested without a clip");
            return;
        };

        let volume = clamp_unit(volume) * self.effect_volume * self.master_volume;
        self.emit_one_shot(clip.clone(), volume);
    }

    /// [`play_one_shot`](Self::play_one_shot) at full call volume.
    pub fn play_one_shot_default(&mut self, clip: Option<&AudioClip>) {
        self.play_one_shot(clip, 1.0);
    }

    /// Replaces the ambient clip and starts it.
    pub fn play_ambient(&mut self, clip: Option<&AudioClip>, looping: bool) {
        let Some(clip) = clip else {
            debug!(target: "audio", "Ambient playback requested without a clip");
            return;
        };

        let volume = self.ambient_volume * self.master_volume;
        self.ensure_channels();

        if let Some(channel) = self.ambient.as_mut() {
            if let Some(previous) = channel.clip.as_ref().filter(|_| channel.playing) {
                debug!(target: "audio", "Replacing ambient clip {}", previous);
            }
            channel.clip = Some(clip.clone());
            channel.looping = looping;
            channel.volume = volume;
            channel.playing = true;
        }

        debug!(target: "audio", "Ambient {} (loop: {}, volume: {:.3})", clip, looping, volume);
        self.send(PlaybackCommand::PlayAmbient {
            clip: clip.clone(),
            looping,
            volume,
        });
    }

    /// Stops ambient playback. No-op if the channel was never created.
    pub fn stop_ambient(&mut self) {
        let Some(channel) = self.ambient.as_mut() else {
            return;
        };

        channel.playing = false;
        self.send(PlaybackCommand::StopAmbient);
    }

    //--- Volume -----------------------------------------------------------

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = clamp_unit(volume);
        self.apply_ambient_volume();
    }

    pub fn set_ambient_volume(&mut self, volume: f32) {
        self.ambient_volume = clamp_unit(volume);
        self.apply_ambient_volume();
    }

    /// Takes effect at the next one-shot.
    pub fn set_effect_volume(&mut self, volume: f32) {
        self.effect_volume = clamp_unit(volume);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn ambient_volume(&self) -> f32 {
        self.ambient_volume
    }

    pub fn effect_volume(&self) -> f32 {
        self.effect_volume
    }

    //--- Configuration ----------------------------------------------------

    /// Replaces the click clip; `None` clears it.
    pub fn set_button_click_clip(&mut self, clip: Option<AudioClip>) {
        self.button_click_clip = clip;
    }

    pub fn button_click_clip(&self) -> Option<&AudioClip> {
        self.button_click_clip.as_ref()
    }

    //--- Inspection -------------------------------------------------------

    /// Ambient channel state, if the channels exist yet.
    pub fn ambient_channel(&self) -> Option<&AmbientChannel> {
        self.ambient.as_ref()
    }

    /// Total one-shots played since the channels were created.
    pub fn one_shots_played(&self) -> u64 {
        self.effect.as_ref().map_or(0, |effect| effect.played)
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_channels(&mut self) {
        if self.ambient.is_none() {
            info!(target: "audio", "Creating ambient channel");
            self.ambient = Some(AmbientChannel::new(self.ambient_volume * self.master_volume));
        }
        if self.effect.is_none() {
            info!(target: "audio", "Creating effect channel");
            self.effect = Some(EffectChannel::default());
        }
    }

    fn emit_one_shot(&mut self, clip: AudioClip, volume: f32) {
        self.ensure_channels();
        if let Some(effect) = self.effect.as_mut() {
            effect.played += 1;
        }

        debug!(target: "audio", "One-shot {} (volume: {:.3})", clip, volume);
        self.send(PlaybackCommand::PlayOneShot { clip, volume });
    }

    fn apply_ambient_volume(&mut self) {
        let volume = self.ambient_volume * self.master_volume;
        let Some(channel) = self.ambient.as_mut() else {
            return;
        };

        channel.volume = volume;
        self.send(PlaybackCommand::SetAmbientVolume(volume));
    }

    fn send(&self, command: PlaybackCommand) {
        if let Some(output) = &self.output {
            if output.send(command).is_err() {
                warn!(target: "audio", "Audio device disconnected, command dropped");
            }
        }
    }
}

/// Clamps to `[0, 1]`, mapping NaN to silence.
fn clamp_unit(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crossbeam_channel::{unbounded, Receiver};

    fn click() -> AudioClip {
        AudioClip::new("ui/click")
    }

    fn connected(service: AudioService) -> (AudioService, Receiver<PlaybackCommand>) {
        let (tx, rx) = unbounded();
        let mut service = service;
        service.attach_output(tx);
        (service, rx)
    }

    //--- Volume Clamping --------------------------------------------------

    #[test]
    fn master_volume_is_clamped() {
        let mut audio = AudioService::default();

        audio.set_master_volume(-0.5);
        assert_eq!(audio.master_volume(), 0.0);

        audio.set_master_volume(1.7);
        assert_eq!(audio.master_volume(), 1.0);

        audio.set_master_volume(0.4);
        assert_relative_eq!(audio.master_volume(), 0.4);
    }

    #[test]
    fn channel_volumes_are_clamped() {
        let mut audio = AudioService::default();

        audio.set_ambient_volume(3.0);
        audio.set_effect_volume(-1.0);

        assert_eq!(audio.ambient_volume(), 1.0);
        assert_eq!(audio.effect_volume(), 0.0);
    }

    #[test]
    fn nan_volume_maps_to_silence() {
        let mut audio = AudioService::default();
        audio.set_master_volume(f32::NAN);
        assert_eq!(audio.master_volume(), 0.0);
    }

    #[test]
    fn defaults_are_full_volume() {
        let audio = AudioService::default();
        assert_eq!(audio.master_volume(), 1.0);
        assert_eq!(audio.ambient_volume(), 1.0);
        assert_eq!(audio.effect_volume(), 1.0);
        assert!(audio.ambient_channel().is_none());
    }

    //--- One-Shots --------------------------------------------------------

    #[test]
    fn click_plays_at_effect_times_master() {
        let (mut audio, rx) = connected(AudioService::with_button_click_clip(click()));
        audio.set_master_volume(0.5);
        audio.set_effect_volume(0.8);

        audio.play_button_click_sound();

        match rx.try_recv().unwrap() {
            PlaybackCommand::PlayOneShot { clip, volume } => {
                assert_eq!(clip, click());
                assert_relative_eq!(volume, 0.4, epsilon = 1e-6);
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(audio.one_shots_played(), 1);
    }

    #[test]
    fn click_without_clip_is_noop() {
        let (mut audio, rx) = connected(AudioService::default());

        audio.play_button_click_sound();

        assert!(rx.try_recv().is_err());
        assert_eq!(audio.one_shots_played(), 0);
    }

    #[test]
    fn clearing_click_clip_disables_click() {
        let (mut audio, rx) = connected(AudioService::with_button_click_clip(click()));

        audio.set_button_click_clip(None);
        audio.play_button_click_sound();

        assert!(audio.button_click_clip().is_none());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn one_shot_scales_by_call_volume() {
        let (mut audio, rx) = connected(AudioService::default());
        audio.set_master_volume(0.5);
        audio.set_effect_volume(0.5);
        let coin = AudioClip::new("sfx/coin");

        audio.play_one_shot(Some(&coin), 0.5);

        match rx.try_recv().unwrap() {
            PlaybackCommand::PlayOneShot { volume, .. } => {
                assert_relative_eq!(volume, 0.125, epsilon = 1e-6)
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn one_shot_without_clip_is_noop() {
        let (mut audio, rx) = connected(AudioService::default());

        audio.play_one_shot_default(None);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn effect_volume_applies_per_call() {
        let (mut audio, rx) = connected(AudioService::with_button_click_clip(click()));

        audio.play_button_click_sound();
        audio.set_effect_volume(0.25);
        audio.play_button_click_sound();

        let volumes: Vec<f32> = rx
            .try_iter()
            .filter_map(|command| match command {
                PlaybackCommand::PlayOneShot { volume, .. } => Some(volume),
                _ => None,
            })
            .collect();

        // The first one-shot keeps the volume it started with
        assert_eq!(volumes.len(), 2);
        assert_relative_eq!(volumes[0], 1.0);
        assert_relative_eq!(volumes[1], 0.25);
    }

    //--- Ambient ----------------------------------------------------------

    #[test]
    fn ambient_replace_keeps_latest_clip() {
        let (mut audio, rx) = connected(AudioService::default());
        let clip_a = AudioClip::new("music/a");
        let clip_b = AudioClip::new("music/b");

        audio.play_ambient(Some(&clip_a), true);
        audio.play_ambient(Some(&clip_b), false);

        let channel = audio.ambient_channel().unwrap();
        assert_eq!(channel.clip(), Some(&clip_b));
        assert!(!channel.is_looping());
        assert!(channel.is_playing());

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[1],
            PlaybackCommand::PlayAmbient {
                clip: clip_b,
                looping: false,
                volume: 1.0
            }
        );
    }

    #[test]
    fn ambient_without_clip_is_noop() {
        let (mut audio, rx) = connected(AudioService::default());

        audio.play_ambient(None, true);

        assert!(audio.ambient_channel().is_none());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stop_ambient_without_channel_is_noop() {
        let (mut audio, rx) = connected(AudioService::default());

        audio.stop_ambient();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn stop_ambient_stops_channel() {
        let (mut audio, rx) = connected(AudioService::default());
        audio.play_ambient(Some(&AudioClip::new("music/title")), true);

        audio.stop_ambient();

        assert!(!audio.ambient_channel().unwrap().is_playing());
        assert_eq!(rx.try_iter().last(), Some(PlaybackCommand::StopAmbient));
    }

    #[test]
    fn volume_changes_update_live_ambient() {
        let (mut audio, rx) = connected(AudioService::default());
        audio.play_ambient(Some(&AudioClip::new("music/title")), true);

        audio.set_ambient_volume(0.5);
        audio.set_master_volume(0.5);

        assert_relative_eq!(audio.ambient_channel().unwrap().volume(), 0.25);
        assert_eq!(
            rx.try_iter().last(),
            Some(PlaybackCommand::SetAmbientVolume(0.25))
        );
    }

    #[test]
    fn effect_volume_leaves_ambient_alone() {
        let (mut audio, rx) = connected(AudioService::default());
        audio.play_ambient(Some(&AudioClip::new("music/title")), true);
        rx.try_iter().for_each(drop);

        audio.set_effect_volume(0.1);

        assert_relative_eq!(audio.ambient_channel().unwrap().volume(), 1.0);
        assert!(rx.try_recv().is_err());
    }

    //--- Output -----------------------------------------------------------

    #[test]
    fn disconnected_output_does_not_panic() {
        let (tx, rx) = unbounded();
        let mut audio = AudioService::with_button_click_clip(click());
        audio.attach_output(tx);
        drop(rx);

        audio.play_button_click_sound();

        assert_eq!(audio.one_shots_played(), 1);
    }

    #[test]
    fn attach_resends_playing_ambient() {
        let mut audio = AudioService::default();
        audio.set_ambient_volume(0.5);
        audio.play_ambient(Some(&AudioClip::new("music/title")), true);

        let (tx, rx) = unbounded();
        audio.attach_output(tx);

        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![PlaybackCommand::PlayAmbient {
                clip: AudioClip::new("music/title"),
                looping: true,
                volume: 0.5,
            }]
        );
    }

    #[test]
    fn attach_skips_stopped_ambient() {
        let mut audio = AudioService::default();
        audio.play_ambient(Some(&AudioClip::new("music/title")), true);
        audio.stop_ambient();

        let (mut audio, rx) = connected(audio);
        audio.play_one_shot_default(None);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn detach_returns_sender() {
        let (tx, _rx) = unbounded();
        let mut audio = AudioService::default();
        audio.attach_output(tx);

        assert!(audio.detach_output().is_some());
        assert!(audio.detach_output().is_none());
    }
}
