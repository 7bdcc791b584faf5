use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bitflags::bitflags;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

pub const WELCOME_MESSAGE: &str = "Press Start to play a new game!";

bitflags! {
    /// Regions of the page that are visible for a given state.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Panels: u16 {
        const START_BUTTON = 1;
        const RESET_BUTTON = 1 << 1;
        const GUESS_FORM   = 1 << 2;
        const RESULTS      = 1 << 3;
        const HINT         = 1 << 4;
        const HISTORY      = 1 << 5;
        const ATTEMPTS     = 1 << 6;
        const CELEBRATION  = 1 << 7;
        const LOADING      = 1 << 8;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultCard {
    pub icon: &'static str,
    pub message: String,
    pub details: String,
}

impl ResultCard {
    pub fn from_feedback(feedback: &GuessFeedback) -> Self {
        if feedback.correct {
            Self {
                icon: "🎉",
                message: "Correct! You found the number!".to_string(),
                details: congratulations(feedback.attempts),
            }
        } else if feedback.result.contains("Too high") {
            Self {
                icon: "📉",
                message: feedback.result.clone(),
                details: "Try a lower number next time!".to_string(),
            }
        } else {
            Self {
                icon: "📈",
                message: feedback.result.clone(),
                details: "Try a higher number next time!".to_string(),
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// 1-based submission order.
    pub number: usize,
    pub guess: GuessValue,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}: {}", self.number, self.guess)
    }
}

pub fn history_entries(guesses: &[GuessValue]) -> Vec<HistoryEntry> {
    guesses
        .iter()
        .enumerate()
        .map(|(i, &guess)| HistoryEntry {
            number: i + 1,
            guess,
        })
        .collect()
}

/// Everything the page shows, derived from [`GameClient`] alone.
#[derive(Clone, Debug, PartialEq)]
pub struct GameViewModel {
    pub panels: Panels,
    pub status: StatusLine,
    pub result: Option<ResultCard>,
    pub hint: Option<String>,
    pub history: Vec<HistoryEntry>,
    pub attempts: String,
    pub celebration_message: Option<String>,
    pub input: String,
    pub input_invalid: bool,
    pub want_hint: bool,
    /// Controls are inert while a request is in flight.
    pub controls_enabled: bool,
    pub can_submit: bool,
}

impl StatusLine {
    pub const fn icon(&self) -> &'static str {
        match self.kind {
            StatusKind::Info => "🎮",
            StatusKind::Error => "❌",
        }
    }
}

impl GameClient {
    pub fn view(&self) -> GameViewModel {
        let session = self.session();
        let has_feedback = self.feedback().is_some();
        let has_history = !session.guesses.is_empty();

        let mut panels = match self.phase() {
            Phase::Active => {
                let mut panels = Panels::RESET_BUTTON | Panels::GUESS_FORM | Panels::ATTEMPTS;
                panels.set(Panels::RESULTS, has_feedback);
                panels.set(Panels::HISTORY, has_history);
                panels.set(Panels::HINT, self.hint().is_some());
                panels
            }
            // the finished game stays on screen until a reset or a new game
            Phase::Celebrating(_) | Phase::Inactive if has_feedback => {
                let mut panels = Panels::START_BUTTON | Panels::RESULTS | Panels::ATTEMPTS;
                panels.set(Panels::HISTORY, has_history);
                panels
            }
            Phase::Celebrating(_) | Phase::Inactive => Panels::START_BUTTON,
        };
        let celebration_message = match self.phase() {
            Phase::Celebrating(celebration) if celebration.shown => {
                panels.insert(Panels::CELEBRATION);
                Some(celebration.message.clone())
            }
            _ => None,
        };
        panels.set(Panels::LOADING, self.is_busy());

        let input_state = InputState::of(self.input());
        let controls_enabled = !self.is_busy();

        GameViewModel {
            panels,
            status: self.status().cloned().unwrap_or_else(|| StatusLine {
                kind: StatusKind::Info,
                text: WELCOME_MESSAGE.to_string(),
                shaking: false,
                shake: 0,
            }),
            result: self.feedback().map(ResultCard::from_feedback),
            hint: self.hint().map(ToString::to_string),
            history: history_entries(&session.guesses),
            attempts: session.attempts.to_string(),
            celebration_message,
            input: self.input().to_string(),
            input_invalid: input_state.is_invalid(),
            want_hint: self.want_hint(),
            controls_enabled,
            can_submit: controls_enabled && self.phase().is_active() && input_state.is_valid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    fn ok(body: &str) -> Result<HttpReply> {
        Ok(HttpReply::new(200, body))
    }

    fn guess(client: &mut GameClient, input: &str, reply: &str) -> Effects {
        client.set_input(input);
        client.submit_guess();
        client.on_reply(Endpoint::Guess, ok(reply))
    }

    fn rendered_history(view: &GameViewModel) -> Vec<String> {
        view.history.iter().map(|entry| format!("{}", entry)).collect()
    }

    #[test]
    fn history_is_one_indexed_in_reply_order() {
        assert_eq!(
            history_entries(&[50, 75])
                .iter()
                .map(|entry| format!("{}", entry))
                .collect::<Vec<_>>(),
            vec!["#1: 50", "#2: 75"]
        );
        assert!(history_entries(&[]).is_empty());
    }

    #[test]
    fn initial_view_only_offers_start() {
        let view = GameClient::new().view();
        assert_eq!(view.panels, Panels::START_BUTTON);
        assert_eq!(view.status.text, WELCOME_MESSAGE);
        assert_eq!(view.status.icon(), "🎮");
        assert!(!view.can_submit);
    }

    #[test]
    fn loading_overlay_and_inert_controls_while_pending() {
        let mut client = GameClient::new();
        client.load();
        let view = client.view();
        assert!(view.panels.contains(Panels::LOADING));
        assert!(!view.controls_enabled);
    }

    #[test]
    fn result_card_direction() {
        let high = ResultCard::from_feedback(&GuessFeedback {
            correct: false,
            result: "Too high! The number is lower than 60.".to_string(),
            attempts: 1,
        });
        assert_eq!(high.icon, "📉");
        assert_eq!(high.message, "Too high! The number is lower than 60.");
        assert_eq!(high.details, "Try a lower number next time!");

        let low = ResultCard::from_feedback(&GuessFeedback {
            correct: false,
            result: "Too low! The number is higher than 10.".to_string(),
            attempts: 2,
        });
        assert_eq!(low.icon, "📈");
        assert_eq!(low.details, "Try a higher number next time!");
    }

    #[test]
    fn live_validation_gates_submit() {
        let mut client = GameClient::new();
        client.start();
        client.on_reply(Endpoint::Start, ok(r#"{"attempts":0}"#));

        client.set_input("101");
        let view = client.view();
        assert!(view.input_invalid);
        assert!(!view.can_submit);

        client.set_input("");
        let view = client.view();
        assert!(!view.input_invalid);
        assert!(!view.can_submit);

        client.set_input("64");
        assert!(client.view().can_submit);
    }

    #[test]
    fn hint_is_shown_next_to_the_result() {
        let mut client = GameClient::new();
        client.start();
        client.on_reply(Endpoint::Start, ok(r#"{"attempts":0}"#));
        guess(
            &mut client,
            "80",
            r#"{"result":"Too high","correct":false,"attempts":1,"guesses":[80],"ai_hint":"Think smaller."}"#,
        );

        let view = client.view();
        assert!(view.panels.contains(Panels::RESULTS | Panels::HINT));
        assert_eq!(view.result.unwrap().message, "Too high");
        assert_eq!(view.hint.as_deref(), Some("Think smaller."));
    }

    #[test]
    fn full_game_scenario() {
        let mut client = GameClient::new();
        client.start();
        client.on_reply(
            Endpoint::Start,
            ok(r#"{"message":"Game started!","attempts":0,"secret_number":30}"#),
        );
        let view = client.view();
        assert!(view.panels.contains(Panels::GUESS_FORM | Panels::ATTEMPTS));
        assert!(!view.panels.contains(Panels::HISTORY));
        assert_eq!(view.attempts, "0");
        assert_eq!(view.status.text, STARTED_MESSAGE);

        guess(
            &mut client,
            "60",
            r#"{"correct":false,"result":"Too high","attempts":1,"guesses":[60]}"#,
        );
        let view = client.view();
        assert_eq!(view.result.as_ref().unwrap().message, "Too high");
        assert_eq!(rendered_history(&view), vec!["#1: 60"]);
        assert_eq!(view.attempts, "1");
        assert_eq!(client.phase(), &Phase::Active);

        let effects = guess(
            &mut client,
            "30",
            r#"{"correct":true,"result":"Correct! You found the number!","attempts":2,"guesses":[60,30],"final_message":"You got it in 2 tries!"}"#,
        );
        let view = client.view();
        assert!(!view.panels.contains(Panels::CELEBRATION));
        assert!(!view.panels.contains(Panels::GUESS_FORM));
        assert_eq!(rendered_history(&view), vec!["#1: 60", "#2: 30"]);

        let reveal = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Schedule(timer) => Some(*timer),
                _ => None,
            })
            .unwrap();
        let effects = client.on_timer(reveal);
        let view = client.view();
        assert!(view.panels.contains(Panels::CELEBRATION));
        assert_eq!(
            view.celebration_message.as_deref(),
            Some("You got it in 2 tries!")
        );
        assert_eq!(view.result.unwrap().icon, "🎉");

        let Some(Effect::Schedule(dismiss)) = effects.first().cloned() else {
            panic!("dismiss timer expected, got {:?}", effects);
        };
        client.on_timer(dismiss);
        let view = client.view();
        assert_eq!(client.phase(), &Phase::Inactive);
        assert!(view.panels.contains(Panels::START_BUTTON));
        assert!(!view.panels.contains(Panels::CELEBRATION));
    }

    #[test]
    fn reset_view_is_back_to_start_only() {
        let mut client = GameClient::new();
        client.start();
        client.on_reply(Endpoint::Start, ok(r#"{"attempts":0}"#));
        guess(
            &mut client,
            "60",
            r#"{"correct":false,"result":"Too high","attempts":1,"guesses":[60]}"#,
        );
        client.reset();
        client.on_reply(Endpoint::Reset, ok(r#"{"message":"Game reset successfully"}"#));

        let view = client.view();
        assert_eq!(view.panels, Panels::START_BUTTON);
        assert_eq!(view.attempts, "0");
        assert!(view.history.is_empty());
        assert_eq!(view.status.text, RESET_MESSAGE);
    }
}
