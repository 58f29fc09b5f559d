//=========================================================================
// Engine
//
// Composition root and main loop of the clicker runtime.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  ──run()──>  ExitReason
//         │                          │           │
//         ├─ with_tps()              │           └─ construct phase
//         ├─ with_channel_capacity() ├─ start(): wiring phase + initial scene
//         └─ with_audio_device()     └─ tick():  one frame
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::host_bridge::{spawn_audio_thread, EventCollector};
use crate::core::services::{ExitReason, PlaybackCommand};
use crate::core::{
    AudioDevice, AudioService, GlobalContext, GlobalSystems, HostEvent, LogDevice,
    SceneTransitionService, ServiceRegistry, TickControl,
};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 host events
/// - **Audio device**: [`LogDevice`]
///
/// # Examples
///
/// ```no_run
/// use startup_clicker::prelude::*;
///
/// let reason = EngineBuilder::new()
///     .with_tps(30.0)
///     .build()
///     .init(|systems, _services| {
///         systems.scene_manager.register_default("Title", TitleScene::new("Game"));
///         systems.scene_manager.register_scene("Game", GameScene::new(1));
///     })
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    audio_device: Option<Box<dyn AudioDevice>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            audio_device: None,
        }
    }

    /// Sets the target ticks per second for the logic loop.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for host → engine communication.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Sets the device that receives playback commands.
    pub fn with_audio_device<D: AudioDevice>(mut self, device: D) -> Self {
        self.audio_device = Some(Box::new(device));
        self
    }

    /// Builds the engine instance.
    pub fn build(self) -> Engine {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        let (host_tx, host_rx) = bounded(self.channel_capacity);
        let (audio_tx, audio_rx) = unbounded();

        Engine {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
            collector: EventCollector::new(host_rx),
            host_tx: Some(host_tx),
            audio_tx: Some(audio_tx),
            audio_rx: Some(audio_rx),
            audio_device: Some(
                self.audio_device
                    .unwrap_or_else(|| Box::new(LogDevice) as Box<dyn AudioDevice>),
            ),
            tps: self.tps,
            started: false,
            exit_reason: None,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Clicker runtime.
///
/// Owns the systems, the shared context and both host channels. Create
/// via [`EngineBuilder`].
///
/// # Startup
///
/// 1. **Construct** ([`Engine::init`]): register scenes and services
/// 2. **Wire** ([`Engine::start`]): let every scene check its services,
///    publish the scene catalog
/// 3. **Enter** the initial scene; services it places are adopted
/// 4. **Attach** the audio output to the resolved [`AudioService`]
///
/// # Audio
///
/// [`run`](Engine::run) hands the device to a dedicated thread. When the
/// host drives frames through [`tick`](Engine::tick) instead, queued
/// playback commands reach the device at the end of every frame.
pub struct Engine {
    systems: GlobalSystems,
    context: GlobalContext,
    collector: EventCollector,
    host_tx: Option<Sender<HostEvent>>,
    audio_tx: Option<Sender<PlaybackCommand>>,
    audio_rx: Option<Receiver<PlaybackCommand>>,
    audio_device: Option<Box<dyn AudioDevice>>,
    tps: f64,
    started: bool,
    exit_reason: Option<ExitReason>,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Construction phase.
    ///
    /// Provides mutable access to [`GlobalSystems`] and the service
    /// registry for registering scenes and configuring services before
    /// anything is wired.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems, &mut ServiceRegistry),
    {
        info!("Initializing engine systems");

        init_fn(&mut self.systems, &mut self.context.services);

        info!("Engine initialization complete");
        self
    }

    /// Wiring phase followed by entering the initial scene.
    ///
    /// Runs once; later calls do nothing. [`tick`](Self::tick) and
    /// [`run`](Self::run) call it on demand.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        info!("Wiring engine services");
        self.systems.scene_manager.wire(&mut self.context.services);

        self.systems.scene_manager.start(&mut self.context);

        // Initial scene has settled; a service it placed is the one resolved here
        if let Some(output) = self.audio_tx.take() {
            self.context.services.instance::<AudioService>().attach_output(output);
        }
        self.pump_audio();
    }

    //--- Access -----------------------------------------------------------

    /// Sender for the host layer.
    ///
    /// `None` once [`run`](Self::run) has started; the loop then ends when
    /// every handed-out sender is dropped.
    pub fn host_sender(&self) -> Option<Sender<HostEvent>> {
        self.host_tx.clone()
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.context.services
    }

    pub fn services_mut(&mut self) -> &mut ServiceRegistry {
        &mut self.context.services
    }

    pub fn systems(&self) -> &GlobalSystems {
        &self.systems
    }

    /// Why the loop stopped, once it has.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    //--- Frame ------------------------------------------------------------

    /// Runs a single frame.
    ///
    /// 1. Collects host events
    /// 2. Updates the active scene and applies transitions
    /// 3. Feeds playback commands to the device (unless the audio thread owns it)
    /// 4. Checks for a quit request
    pub fn tick(&mut self) -> TickControl {
        self.start();

        if self.collector.collect_frame() == TickControl::Exit {
            self.exit_reason.get_or_insert(ExitReason::HostClosed);
            return TickControl::Exit;
        }

        self.context.frame_events = self.collector.take_events();
        self.systems.update(&mut self.context);
        self.pump_audio();

        let quit = self
            .context
            .services
            .get::<SceneTransitionService>()
            .and_then(SceneTransitionService::quit_requested);

        if let Some(reason) = quit {
            self.exit_reason = Some(reason);
            return TickControl::Exit;
        }

        TickControl::Continue
    }

    /// Delivers queued playback commands while no audio thread owns the device.
    fn pump_audio(&mut self) {
        let (Some(device), Some(receiver)) = (self.audio_device.as_mut(), self.audio_rx.as_ref())
        else {
            return;
        };

        for command in receiver.try_iter() {
            device.handle(command);
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the engine until quit or host disconnect.
    ///
    /// # Lifecycle
    ///
    /// 1. Spawns the audio thread feeding the configured device
    /// 2. Drops the engine's own host sender
    /// 3. Ticks at the configured TPS
    /// 4. Detaches the audio output and joins the audio thread
    pub fn run(mut self) -> ExitReason {
        info!("Starting engine runtime (TPS: {})", self.tps);
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);

        //--- 1. Audio thread ----------------------------------------------
        let audio_handle = match (self.audio_device.take(), self.audio_rx.take()) {
            (Some(device), Some(receiver)) => match spawn_audio_thread(device, receiver) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    error!("Failed to spawn audio thread: {}", e);
                    None
                }
            },
            _ => None,
        };

        //--- 2. Host channel ownership ------------------------------------
        self.host_tx = None;

        //--- 3. Main loop -------------------------------------------------
        self.start();
        let reason = loop {
            let frame_start = Instant::now();

            if let TickControl::Exit = self.tick() {
                break self.exit_reason.unwrap_or(ExitReason::HostClosed);
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        };

        info!("Engine loop exited ({:?})", reason);

        //--- 4. Cleanup ---------------------------------------------------
        if let Some(audio) = self.context.services.get_mut::<AudioService>() {
            drop(audio.detach_output());
        }

        if let Some(handle) = audio_handle {
            match handle.join() {
                Ok(handled) => info!("Audio thread terminated cleanly ({} commands)", handled),
                Err(e) => error!("Audio thread panicked: {:?}", e),
            }
        } else {
            warn!("Engine ran without an audio thread");
        }

        info!("Engine shutdown complete");
        reason
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
