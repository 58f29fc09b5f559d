//=========================================================================
// Title Scene
//=========================================================================
//
// Start and quit buttons, optionally "press any key to start".
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::globals::GlobalContext;
use crate::core::scene::Scene;
use crate::core::services::{AudioService, SceneTransitionService, ServiceRegistry};
use crate::core::ui_event::UiEvent;

//=== TitleScene ==========================================================

/// Title screen leading into the game scene.
pub struct TitleScene {
    game_scene: String,
    press_any_key_to_start: bool,
}

impl TitleScene {
    /// Creates a title screen that starts `game_scene`.
    ///
    /// Any key starts the game by default.
    pub fn new(game_scene: impl Into<String>) -> Self {
        Self {
            game_scene: game_scene.into(),
            press_any_key_to_start: true,
        }
    }

    /// Enables or disables starting on any key.
    pub fn with_press_any_key(mut self, enabled: bool) -> Self {
        self.press_any_key_to_start = enabled;
        self
    }

    pub fn game_scene(&self) -> &str {
        &self.game_scene
    }

    fn start_game(&self, context: &mut GlobalContext) {
        info!(target: "scene", "Start button clicked");
        context.services.instance::<AudioService>().play_button_click_sound();

        if let Err(e) = context
            .services
            .instance::<SceneTransitionService>()
            .switch_to(&self.game_scene)
        {
            debug!(target: "scene", "Title: start ignored: {}", e);
        }
    }

    fn quit(&self, context: &mut GlobalContext) {
        info!(target: "scene", "Quit button clicked");
        context.services.instance::<AudioService>().play_button_click_sound();
        context.services.instance::<SceneTransitionService>().quit();
    }
}

impl Scene for TitleScene {
    fn wire(&mut self, services: &mut ServiceRegistry) {
        match services.get::<AudioService>() {
            Some(audio) if audio.button_click_clip().is_none() => {
                warn!(target: "scene", "Title: no button click clip configured, buttons will be silent");
            }
            Some(_) => {}
            None => debug!(target: "scene", "Title: AudioService not registered yet, expecting a scene to provide it"),
        }
    }

    fn update(&mut self, context: &mut GlobalContext) {
        let any_key = self.press_any_key_to_start;
        let start = context.ui_events().iter().any(|event| match event {
            UiEvent::StartPressed => true,
            UiEvent::AnyKey => any_key,
            _ => false,
        });
        let quit = context.ui_events().contains(&UiEvent::QuitPressed);

        if start {
            self.start_game(context);
        } else if quit {
            self.quit(context);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::{AudioClip, ExitReason};

    fn context() -> GlobalContext {
        let mut context = GlobalContext::new();
        context
            .services
            .register(AudioService::with_button_click_clip(AudioClip::new("ui/click")));
        let transitions = context.services.instance::<SceneTransitionService>();
        transitions.set_catalog(["Title".to_string(), "Game".to_string()]);
        transitions.mark_active("Title");
        context
    }

    fn frame(context: &mut GlobalContext, events: &[UiEvent]) {
        context.frame_events = events.to_vec();
    }

    #[test]
    fn start_plays_click_and_requests_game() {
        let mut context = context();
        let mut title = TitleScene::new("Game");
        frame(&mut context, &[UiEvent::StartPressed]);

        title.update(&mut context);

        assert_eq!(context.services.instance::<AudioService>().one_shots_played(), 1);
        let requests = context
            .services
            .instance::<SceneTransitionService>()
            .take_requests();
        assert_eq!(requests[0].scene, "Game");
    }

    #[test]
    fn any_key_starts_when_enabled() {
        let mut context = context();
        let mut title = TitleScene::new("Game");
        frame(&mut context, &[UiEvent::AnyKey]);

        title.update(&mut context);

        assert!(context
            .services
            .instance::<SceneTransitionService>()
            .is_transition_in_flight());
    }

    #[test]
    fn any_key_ignored_when_disabled() {
        let mut context = context();
        let mut title = TitleScene::new("Game").with_press_any_key(false);
        frame(&mut context, &[UiEvent::AnyKey]);

        title.update(&mut context);

        assert!(!context
            .services
            .instance::<SceneTransitionService>()
            .is_transition_in_flight());
        assert_eq!(context.services.instance::<AudioService>().one_shots_played(), 0);
    }

    #[test]
    fn quit_requests_shutdown() {
        let mut context = context();
        let mut title = TitleScene::new("Game");
        frame(&mut context, &[UiEvent::QuitPressed]);

        title.update(&mut context);

        let reason = context
            .services
            .instance::<SceneTransitionService>()
            .quit_requested();
        assert!(matches!(
            reason,
            Some(ExitReason::SessionStopped) | Some(ExitReason::Quit)
        ));
        assert_eq!(context.services.instance::<AudioService>().one_shots_played(), 1);
    }

    #[test]
    fn repeated_start_is_harmless() {
        let mut context = context();
        let mut title = TitleScene::new("Game");
        frame(&mut context, &[UiEvent::StartPressed]);

        title.update(&mut context);
        title.update(&mut context);

        let requests = context
            .services
            .instance::<SceneTransitionService>()
            .take_requests();
        assert_eq!(requests.len(), 1);
    }

    #[test]
    fn unknown_game_scene_is_logged_not_fatal() {
        let mut context = context();
        let mut title = TitleScene::new("Missing");
        frame(&mut context, &[UiEvent::StartPressed]);

        title.update(&mut context);

        assert!(!context
            .services
            .instance::<SceneTransitionService>()
            .is_transition_in_flight());
    }

    #[test]
    fn wire_does_not_create_audio_service() {
        let mut services = ServiceRegistry::new();
        let mut title = TitleScene::new("Game");

        title.wire(&mut services);

        assert!(!services.contains::<AudioService>());
        assert_eq!(
            services.place_in_context(AudioService::with_button_click_clip(AudioClip::new("ui/click"))),
            crate::core::services::Registration::Placed
        );
    }
}
