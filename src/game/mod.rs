//=========================================================================
// Clicker Scenes
//=========================================================================
//
// The two screens of the clicker game.
//
//   "Title" ──start / any key──► "Game" ──reload──► "Game"
//      └──quit──► session ends
//
//=========================================================================

//=== Module Declarations =================================================

mod play;
mod title;

//=== Public API ==========================================================

pub use play::GameScene;
pub use title::TitleScene;

/// Name the title scene is registered under by default.
pub const TITLE_SCENE: &str = "Title";

/// Name the game scene is registered under by default.
pub const GAME_SCENE: &str = "Game";
