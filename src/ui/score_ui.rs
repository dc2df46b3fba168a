use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::Label;

use crate::destroyable::Destroyable;
use crate::events::{EventObserver, Unsubscriber};
use crate::model::{GameStateEvent, SessionStats};

/// Session summary and high score line at the bottom of the window.
pub struct ScoreUI {
    pub label: Label,
    high_score: Option<u32>,
    session_stats: SessionStats,
    game_state_subscription: Option<Unsubscriber<GameStateEvent>>,
}

impl Destroyable for ScoreUI {
    fn destroy(&mut self) {
        if let Some(subscription) = self.game_state_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl ScoreUI {
    pub fn new(game_state_observer: EventObserver<GameStateEvent>) -> Rc<RefCell<Self>> {
        let label = Label::new(None);
        label.set_css_classes(&["score-line"]);

        let score_ui = Rc::new(RefCell::new(Self {
            label,
            high_score: None,
            session_stats: SessionStats::default(),
            game_state_subscription: None,
        }));
        score_ui.borrow().render();

        let subscription = {
            let score_ui = score_ui.clone();
            game_state_observer.subscribe(move |event| {
                score_ui.borrow_mut().handle_game_state_event(event);
            })
        };
        score_ui.borrow_mut().game_state_subscription = Some(subscription);

        score_ui
    }

    fn handle_game_state_event(&mut self, event: &GameStateEvent) {
        match event {
            GameStateEvent::HighScoreChanged(high_score) => {
                self.high_score = *high_score;
                self.render();
            }
            GameStateEvent::SessionStatsChanged(session_stats) => {
                self.session_stats = *session_stats;
                self.render();
            }
            _ => {}
        }
    }

    fn render(&self) {
        self.label.set_text(&summary_text(self.high_score, &self.session_stats));
    }
}

fn summary_text(high_score: Option<u32>, stats: &SessionStats) -> String {
    let high_score = match high_score {
        Some(score) => score.to_string(),
        None => "N/A".to_string(),
    };
    if stats.total_rounds == 0 {
        format!("High Score: {} (fewest guesses)", high_score)
    } else {
        format!(
            "Rounds: {} | Total Guesses: {} | Avg: {:.2} | High Score: {}",
            stats.total_rounds,
            stats.total_guesses,
            stats.mean_guesses(),
            high_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_before_any_round() {
        assert_eq!(
            summary_text(None, &SessionStats::default()),
            "High Score: N/A (fewest guesses)"
        );
        assert_eq!(
            summary_text(Some(4), &SessionStats::default()),
            "High Score: 4 (fewest guesses)"
        );
    }

    #[test]
    fn test_summary_after_rounds() {
        let stats = SessionStats {
            total_rounds: 2,
            total_guesses: 7,
        };
        assert_eq!(
            summary_text(Some(3), &stats),
            "Rounds: 2 | Total Guesses: 7 | Avg: 3.50 | High Score: 3"
        );
    }
}
