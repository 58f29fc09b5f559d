//=========================================================================
// StartUp Clicker — Headless Demo
//
// Runs the clicker with a scripted host: start the game, click the target
// a few times, reload, click again, then close.
//
//=========================================================================

use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{error, info};

use startup_clicker::prelude::*;

const STEP: Duration = Duration::from_millis(50);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("StartUp Clicker starting...");

    let engine = EngineBuilder::new()
        .with_tps(60.0)
        .build()
        .init(|systems, services| {
            services.register(AudioService::with_button_click_clip(AudioClip::new(
                "ui/button_click",
            )));
            systems
                .scene_manager
                .register_default(TITLE_SCENE, TitleScene::new(GAME_SCENE));
            systems.scene_manager.register_scene(GAME_SCENE, GameScene::new(1));
        });

    let Some(host) = engine.host_sender() else {
        error!("Engine did not provide a host channel");
        return;
    };
    let driver = thread::spawn(move || drive(host));

    let reason = engine.run();

    if driver.join().is_err() {
        error!("Host driver panicked");
    }
    info!("StartUp Clicker exited ({:?})", reason);
}

/// Scripted stand-in for the UI layer.
fn drive(host: Sender<HostEvent>) {
    let script = [
        vec![UiEvent::StartPressed],
        vec![UiEvent::TargetClicked],
        vec![UiEvent::TargetClicked, UiEvent::TargetClicked],
        vec![UiEvent::ReloadPressed],
        vec![UiEvent::TargetClicked],
    ];

    for events in script {
        thread::sleep(STEP);
        if host.send(HostEvent::Ui(events)).is_err() {
            return;
        }
    }

    thread::sleep(STEP);
    let _ = host.send(HostEvent::CloseRequested);
}
