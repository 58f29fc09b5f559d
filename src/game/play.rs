//=========================================================================
// Game Scene
//=========================================================================
//
// Click-to-score screen. The UI layer hit-tests the clickable sprite and
// reports `TargetClicked`; this scene only keeps the score.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::core::services::{AudioService, SceneTransitionService, ServiceRegistry};
use crate::core::ui_event::UiEvent;

//=== GameScene ===========================================================

/// Score counter driven by clicks on the target.
pub struct GameScene {
    click_value: u32,
    score: u64,
}

impl GameScene {
    /// Creates a game scene adding `click_value` per click.
    pub fn new(click_value: u32) -> Self {
        Self {
            click_value,
            score: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    /// Text shown by the score label.
    pub fn score_text(&self) -> String {
        self.score.to_string()
    }

    fn on_target_clicked(&mut self) {
        self.score = self.score.saturating_add(u64::from(self.click_value));
        debug!(target: "scene", "Click! score: {}", self.score_text());
    }
}

impl Scene for GameScene {
    fn wire(&mut self, _services: &mut ServiceRegistry) {
        if self.click_value == 0 {
            warn!(target: "scene", "Game: click value is 0, clicks will not score");
        }
    }

    fn on_enter(&mut self, _context: &mut GlobalContext) {
        self.score = 0;
        info!(target: "scene", "Game: score reset");
    }

    fn on_exit(&mut self, _context: &mut GlobalContext) {
        info!(target: "scene", "Game: final score {}", self.score_text());
    }

    fn update(&mut self, context: &mut GlobalContext) {
        let mut reload = false;

        for event in context.ui_events() {
            match event {
                UiEvent::TargetClicked => self.on_target_clicked(),
                UiEvent::ReloadPressed => reload = true,
                _ => {}
            }
        }

        if reload {
            context.services.instance::<AudioService>().play_button_click_sound();
            if let Err(e) = context.services.instance::<SceneTransitionService>().reload() {
                debug!(target: "scene", "Game: reload ignored: {}", e);
            }
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(context: &mut GlobalContext, events: &[UiEvent]) {
        context.frame_events = events.to_vec();
    }

    #[test]
    fn clicks_add_click_value() {
        let mut context = GlobalContext::new();
        let mut game = GameScene::new(3);
        frame(&mut context, &[UiEvent::TargetClicked, UiEvent::TargetClicked]);

        game.update(&mut context);

        assert_eq!(game.score(), 6);
        assert_eq!(game.score_text(), "6");
    }

    #[test]
    fn other_events_do_not_score() {
        let mut context = GlobalContext::new();
        let mut game = GameScene::new(1);
        frame(&mut context, &[UiEvent::AnyKey, UiEvent::StartPressed]);

        game.update(&mut context);

        assert_eq!(game.score(), 0);
    }

    #[test]
    fn entering_resets_score() {
        let mut context = GlobalContext::new();
        let mut game = GameScene::new(1);
        game.set_score(41);

        game.on_enter(&mut context);

        assert_eq!(game.score(), 0);
    }

    #[test]
    fn set_score_updates_text() {
        let mut game = GameScene::new(1);
        game.set_score(1234);
        assert_eq!(game.score_text(), "1234");
    }

    #[test]
    fn score_saturates() {
        let mut context = GlobalContext::new();
        let mut game = GameScene::new(5);
        game.set_score(u64::MAX - 1);
        frame(&mut context, &[UiEvent::TargetClicked]);

        game.update(&mut context);

        assert_eq!(game.score(), u64::MAX);
    }

    #[test]
    fn reload_requests_active_scene() {
        let mut context = GlobalContext::new();
        {
            let transitions = context.services.instance::<SceneTransitionService>();
            transitions.set_catalog(["Game".to_string()]);
            transitions.mark_active("Game");
        }
        let mut game = GameScene::new(1);
        frame(&mut context, &[UiEvent::ReloadPressed]);

        game.update(&mut context);

        let requests = context
            .services
            .instance::<SceneTransitionService>()
            .take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].scene, "Game");
    }
}
