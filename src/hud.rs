//! Status line shown in the window/tab title

use crate::sim::GameState;

/// Prefix for the window title
pub const WINDOW_BASE: &str = "Ghost Busters";

/// Plain-text score/lives summary
pub fn status_text(state: &GameState) -> String {
    if state.is_over() {
        format!("SCORE: {}   GAME OVER (press R to restart)", state.score)
    } else {
        format!("SCORE: {}   LIVES: {}", state.score, state.lives)
    }
}

/// Full window title: base name plus the status line
pub fn window_title(state: &GameState) -> String {
    format!("{}  |  {}", WINDOW_BASE, status_text(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_status_while_playing() {
        let mut state = GameState::new(1);
        state.score = 120;
        state.lives = 2;
        assert_eq!(status_text(&state), "SCORE: 120   LIVES: 2");
    }

    #[test]
    fn test_status_when_over() {
        let mut state = GameState::new(1);
        state.score = 70;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        assert_eq!(
            status_text(&state),
            "SCORE: 70   GAME OVER (press R to restart)"
        );
    }

    #[test]
    fn test_window_title_prefix() {
        let state = GameState::new(1);
        assert_eq!(window_title(&state), "Ghost Busters  |  SCORE: 0   LIVES: 3");
    }
}
