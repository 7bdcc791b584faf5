use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::*;

pub const STARTED_MESSAGE: &str = "Game started! Guess a number between 1 and 100.";
pub const RESET_MESSAGE: &str = "Game reset successfully!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Celebration {
    pub message: String,
    /// The overlay only appears once the reveal timer fires.
    pub shown: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Inactive,
    Active,
    /// Game won, the session is over and the celebration is pending or on screen.
    Celebrating(Celebration),
}

impl Phase {
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Inactive
    }
}

/// Local copy of the server-held session, only ever replaced wholesale from a reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionMirror {
    pub attempts: AttemptCount,
    pub guesses: Vec<GuessValue>,
}

/// The last guess verdict as reported by the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessFeedback {
    pub correct: bool,
    pub result: String,
    pub attempts: AttemptCount,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
    pub shaking: bool,
    /// Bumped on every error so each one shakes afresh; zero for info lines.
    pub shake: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    GuessInput,
    StartButton,
}

/// Work the host has to carry out on behalf of the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Send(ServiceRequest),
    Schedule(Timer),
    CancelTimers,
    Focus(FocusTarget),
}

pub type Effects = Vec<Effect>;

/// Owns all client state and drives it through start, guess, reset and the celebration.
///
/// Every user action and every network reply goes through one of the methods below. None of them touch the network,
/// timers or the DOM, they return [`Effect`]s instead and leave presentation to [`GameClient::view`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameClient {
    phase: Phase,
    session: SessionMirror,
    pending: Option<Endpoint>,
    feedback: Option<GuessFeedback>,
    hint: Option<String>,
    status: Option<StatusLine>,
    input: String,
    want_hint: bool,
    epoch: u32,
    shakes: u32,
}

impl GameClient {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> &SessionMirror {
        &self.session
    }

    pub fn pending(&self) -> Option<Endpoint> {
        self.pending
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn feedback(&self) -> Option<&GuessFeedback> {
        self.feedback.as_ref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn want_hint(&self) -> bool {
        self.want_hint
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn set_want_hint(&mut self, want_hint: bool) {
        self.want_hint = want_hint;
    }

    /// Asks the service whether a game survives from an earlier visit.
    pub fn load(&mut self) -> Effects {
        let result = self.begin(ServiceRequest::Status);
        self.settle(result)
    }

    pub fn start(&mut self) -> Effects {
        let result = self.try_start();
        self.settle(result)
    }

    pub fn submit_guess(&mut self) -> Effects {
        let result = self.try_submit_guess();
        self.settle(result)
    }

    pub fn reset(&mut self) -> Effects {
        let result = self.begin(ServiceRequest::Reset);
        self.settle(result)
    }

    /// Closes the celebration overlay. Does nothing unless the overlay is on screen.
    pub fn dismiss_celebration(&mut self) -> Effects {
        if !matches!(&self.phase, Phase::Celebrating(celebration) if celebration.shown) {
            return vec![];
        }
        log::debug!("celebration dismissed");
        let mut effects = self.next_epoch();
        self.phase = Phase::Inactive;
        effects.push(Effect::Focus(FocusTarget::StartButton));
        effects
    }

    pub fn on_timer(&mut self, timer: Timer) -> Effects {
        use TimerKind::*;

        if timer.epoch != self.epoch {
            log::trace!("stale timer: {:?} (epoch {})", timer, self.epoch);
            return vec![];
        }

        let dismiss = self.timer(DismissCelebration);
        match timer.kind {
            RevealCelebration => match &mut self.phase {
                Phase::Celebrating(celebration) if !celebration.shown => {
                    celebration.shown = true;
                    vec![Effect::Schedule(dismiss)]
                }
                _ => vec![],
            },
            DismissCelebration => self.dismiss_celebration(),
            SettleStatus { shake } => {
                match &mut self.status {
                    Some(status) if status.shake == shake => status.shaking = false,
                    _ => log::trace!("shake {} superseded", shake),
                }
                vec![]
            }
        }
    }

    /// Applies the reply to the request currently in flight.
    ///
    /// A reply for any other endpoint is dropped, so a stale reply can never overwrite newer state.
    pub fn on_reply(&mut self, endpoint: Endpoint, reply: Result<HttpReply>) -> Effects {
        if self.pending != Some(endpoint) {
            log::warn!(
                "dropping reply for {:?}, pending: {:?}",
                endpoint,
                self.pending
            );
            return vec![];
        }
        self.pending = None;

        match endpoint {
            Endpoint::Status => self.apply_status(reply),
            Endpoint::Start => {
                let result = reply
                    .and_then(|reply| reply.decode::<StartResponse>("Failed to start game"))
                    .map(|response| self.apply_start(response));
                self.settle(result)
            }
            Endpoint::Guess => {
                let result = reply
                    .and_then(|reply| reply.decode::<GuessResponse>("Failed to submit guess"))
                    .map(|response| self.apply_guess(response));
                self.settle(result)
            }
            Endpoint::Reset => {
                let result = reply
                    .and_then(|reply| reply.decode::<ResetResponse>("Failed to reset game"))
                    .map(|_| self.apply_reset());
                self.settle(result)
            }
        }
    }

    fn try_start(&mut self) -> Result<Effects> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }
        if self.phase.is_active() {
            return Err(ClientError::AlreadyActive);
        }
        let mut effects = self.begin(ServiceRequest::Start)?;
        // "play again" closes the celebration right away, revealed or not
        if matches!(self.phase, Phase::Celebrating(_)) {
            effects.extend(self.next_epoch());
            self.phase = Phase::Inactive;
        }
        Ok(effects)
    }

    fn try_submit_guess(&mut self) -> Result<Effects> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }
        if !self.phase.is_active() {
            return Err(ClientError::NoActiveGame);
        }
        let guess = parse_guess(&self.input)?;
        self.begin(ServiceRequest::Guess(GuessRequest {
            guess,
            get_hint: self.want_hint,
        }))
    }

    fn begin(&mut self, request: ServiceRequest) -> Result<Effects> {
        if self.is_busy() {
            return Err(ClientError::Busy);
        }
        log::debug!("request: {:?}", request);
        self.pending = Some(request.endpoint());
        Ok(vec![Effect::Send(request)])
    }

    fn apply_status(&mut self, reply: Result<HttpReply>) -> Effects {
        match reply.and_then(|reply| reply.decode::<StatusResponse>("Failed to load game status")) {
            Ok(StatusResponse {
                game_active: true,
                attempts,
                guesses,
                ..
            }) => {
                log::info!("resuming game with {} attempts", attempts);
                self.phase = Phase::Active;
                self.session = SessionMirror { attempts, guesses };
                vec![Effect::Focus(FocusTarget::GuessInput)]
            }
            Ok(_) => {
                log::debug!("no game in progress");
                vec![Effect::Focus(FocusTarget::StartButton)]
            }
            Err(err) => {
                log::warn!("could not load game status, assuming none: {}", err);
                vec![Effect::Focus(FocusTarget::StartButton)]
            }
        }
    }

    fn apply_start(&mut self, response: StartResponse) -> Effects {
        log::info!("game started");
        let mut effects = self.next_epoch();
        self.phase = Phase::Active;
        self.session = SessionMirror {
            attempts: response.attempts,
            guesses: response.guesses,
        };
        self.feedback = None;
        self.hint = None;
        self.input.clear();
        self.status = Some(StatusLine {
            kind: StatusKind::Info,
            text: STARTED_MESSAGE.to_string(),
            shaking: false,
            shake: 0,
        });
        effects.push(Effect::Focus(FocusTarget::GuessInput));
        effects
    }

    fn apply_guess(&mut self, response: GuessResponse) -> Effects {
        let GuessResponse {
            result,
            correct,
            attempts,
            guesses,
            hint,
            final_message,
            ..
        } = response;
        log::debug!("guess verdict: {:?} (correct: {})", result, correct);

        self.session = SessionMirror { attempts, guesses };
        self.feedback = Some(GuessFeedback {
            correct,
            result,
            attempts,
        });
        self.input.clear();

        if correct {
            log::info!("game won in {} attempts", attempts);
            let mut effects = self.next_epoch();
            self.phase = Phase::Celebrating(Celebration {
                message: final_message.unwrap_or_else(|| congratulations(attempts)),
                shown: false,
            });
            effects.push(Effect::Schedule(self.timer(TimerKind::RevealCelebration)));
            effects
        } else {
            if hint.is_some() {
                self.hint = hint;
            }
            vec![Effect::Focus(FocusTarget::GuessInput)]
        }
    }

    fn apply_reset(&mut self) -> Effects {
        log::info!("game reset");
        let mut effects = self.next_epoch();
        self.phase = Phase::Inactive;
        self.session = SessionMirror::default();
        self.feedback = None;
        self.hint = None;
        self.input.clear();
        self.status = Some(StatusLine {
            kind: StatusKind::Info,
            text: RESET_MESSAGE.to_string(),
            shaking: false,
            shake: 0,
        });
        effects.push(Effect::Focus(FocusTarget::StartButton));
        effects
    }

    /// Converts a failed action into the status line, leaving the rest of the state alone.
    fn settle(&mut self, result: Result<Effects>) -> Effects {
        match result {
            Ok(effects) => effects,
            Err(ClientError::Busy) => {
                log::debug!("action ignored, request in flight: {:?}", self.pending);
                vec![]
            }
            Err(err) => {
                if err.is_remote() {
                    log::warn!("action failed: {}", err);
                } else {
                    log::debug!("action rejected: {}", err);
                }
                self.shakes = self.shakes.wrapping_add(1).max(1);
                let shake = self.shakes;
                self.status = Some(StatusLine {
                    kind: StatusKind::Error,
                    text: err.to_string(),
                    shaking: true,
                    shake,
                });
                vec![Effect::Schedule(self.timer(TimerKind::SettleStatus { shake }))]
            }
        }
    }

    fn timer(&self, kind: TimerKind) -> Timer {
        Timer {
            kind,
            epoch: self.epoch,
        }
    }

    fn next_epoch(&mut self) -> Effects {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(status) = &mut self.status {
            status.shaking = false;
        }
        vec![Effect::CancelTimers]
    }
}

pub fn congratulations(attempts: AttemptCount) -> String {
    format!(
        "Congratulations! You found the number in {} attempts!",
        attempts
    )
}
