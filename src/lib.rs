//=========================================================================
// StartUp Clicker — Library Root
//
// This crate defines the public API surface of the clicker runtime.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`)
// - Expose the service layer (registry, audio, scene transitions)
// - Provide the title and game scenes of the clicker
//
// Typical usage:
// ```no_run
// use startup_clicker::prelude::*;
//
// fn main() {
//     EngineBuilder::new()
//         .build()
//         .init(|systems, _services| {
//             systems.scene_manager.register_default(TITLE_SCENE, TitleScene::new(GAME_SCENE));
//             systems.scene_manager.register_scene(GAME_SCENE, GameScene::new(1));
//         })
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the services, the scene system and the host bridge.
// `game` contains the clicker's scenes.
//
pub mod core;
pub mod error;
pub mod game;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the composition root and main loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------
pub use engine::{Engine, EngineBuilder};
