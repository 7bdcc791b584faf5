use crate::api;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use guessr_core as game;
use game::Panels;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

pub(crate) enum Msg {
    Load,
    Start,
    Reset,
    Submit,
    Input(String),
    ToggleHint(bool),
    DismissCelebration,
    Timer(game::Timer),
    Reply(game::Endpoint, game::Result<game::HttpReply>),
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub api_base: AttrValue,
}

#[derive(Properties, Clone, PartialEq)]
struct ResultProps {
    card: game::ResultCard,
}

#[function_component(ResultView)]
fn result_component(props: &ResultProps) -> Html {
    let game::ResultCard {
        icon,
        message,
        details,
    } = props.card.clone();

    html! {
        <section class="results">
            <span class="result-icon">{icon}</span>
            <h3 class="result-message">{message}</h3>
            <p class="result-details">{details}</p>
        </section>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct HistoryProps {
    entries: Vec<game::HistoryEntry>,
}

#[function_component(HistoryView)]
fn history_component(props: &HistoryProps) -> Html {
    html! {
        <section class="history">
            <h3>{"Your guesses"}</h3>
            <ol class="history-list">
                {
                    for props.entries.iter().map(|entry| html! {
                        <li class="history-item" key={entry.number}>{entry.to_string()}</li>
                    })
                }
            </ol>
        </section>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CelebrationProps {
    message: AttrValue,
    confetti: Vec<game::ConfettiPiece>,
    on_play_again: Callback<MouseEvent>,
    on_close: Callback<MouseEvent>,
}

#[function_component(CelebrationView)]
fn celebration_component(props: &CelebrationProps) -> Html {
    html! {
        <div class="celebration" role="dialog" aria-modal="true">
            <div class="confetti-container">
                {
                    for props.confetti.iter().map(|piece| html! {
                        <div class="confetti" style={piece.style()}/>
                    })
                }
            </div>
            <article>
                <h2>{"🎉 You won! 🎉"}</h2>
                <p class="celebration-message">{props.message.clone()}</p>
                <footer>
                    <button class="secondary" onclick={props.on_close.clone()}>{"Close"}</button>
                    <button onclick={props.on_play_again.clone()}>{"Play again"}</button>
                </footer>
            </article>
        </div>
    }
}

/// Scheduled timeouts, each kept until it fires or is cancelled.
struct PendingTimers<H = Timeout> {
    handles: Vec<(game::Timer, H)>,
}

impl<H> Default for PendingTimers<H> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
        }
    }
}

impl<H> PendingTimers<H> {
    fn push(&mut self, timer: game::Timer, handle: H) {
        self.handles.push((timer, handle));
    }

    /// Forgets the handle of a timer that has just fired.
    fn fired(&mut self, timer: game::Timer) {
        self.handles.retain(|(pending, _)| *pending != timer);
    }

    // dropping a gloo timeout cancels it
    fn clear(&mut self) {
        self.handles.clear();
    }

    fn len(&self) -> usize {
        self.handles.len()
    }
}

/// Hosts a [`game::GameClient`]: forwards events to it, carries out its effects and renders its view model.
pub(crate) struct GameView {
    client: game::GameClient,
    timers: PendingTimers,
    confetti: Vec<game::ConfettiPiece>,
    pending_focus: Option<game::FocusTarget>,
    input_ref: NodeRef,
    start_ref: NodeRef,
    _keydown_listener: EventListener,
}

impl GameView {
    fn create_keydown_listener(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::document(), "keydown", move |e| {
            if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
                if e.key() == "Escape" {
                    link.send_message(Msg::DismissCelebration);
                }
            }
        })
    }

    fn run(&mut self, ctx: &Context<Self>, effects: game::Effects) {
        use game::Effect::*;

        for effect in effects {
            log::trace!("effect: {:?}", effect);
            match effect {
                Send(request) => {
                    let api_base = ctx.props().api_base.to_string();
                    ctx.link().send_future(async move {
                        let endpoint = request.endpoint();
                        Msg::Reply(endpoint, api::send(&api_base, &request).await)
                    });
                }
                Schedule(timer) => {
                    let link = ctx.link().clone();
                    let handle = Timeout::new(timer.kind.delay_ms(), move || {
                        link.send_message(Msg::Timer(timer))
                    });
                    self.timers.push(timer, handle);
                }
                CancelTimers => self.timers.clear(),
                Focus(target) => self.pending_focus = Some(target),
            }
        }
    }

    fn sync_confetti(&mut self) {
        let celebrating = self.client.view().panels.contains(Panels::CELEBRATION);
        if celebrating && self.confetti.is_empty() {
            self.confetti = game::scatter(game::CONFETTI_COUNT, js_sys::Math::random);
        } else if !celebrating {
            self.confetti.clear();
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            client: game::GameClient::new(),
            timers: PendingTimers::default(),
            confetti: Vec::new(),
            pending_focus: None,
            input_ref: NodeRef::default(),
            start_ref: NodeRef::default(),
            _keydown_listener: GameView::create_keydown_listener(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let effects = match msg {
            Load => self.client.load(),
            Start => self.client.start(),
            Reset => self.client.reset(),
            Submit => self.client.submit_guess(),
            Input(value) => {
                self.client.set_input(value);
                vec![]
            }
            ToggleHint(checked) => {
                self.client.set_want_hint(checked);
                vec![]
            }
            DismissCelebration => self.client.dismiss_celebration(),
            Timer(timer) => {
                self.timers.fired(timer);
                log::trace!("{} timers pending", self.timers.len());
                self.client.on_timer(timer)
            }
            Reply(endpoint, reply) => {
                log::debug!("reply for {:?}", endpoint);
                self.client.on_reply(endpoint, reply)
            }
        };
        self.run(ctx, effects);
        self.sync_confetti();
        true
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        use game::FocusTarget::*;

        let Some(target) = self.pending_focus.take() else {
            return;
        };
        let node = match target {
            GuessInput => &self.input_ref,
            StartButton => &self.start_ref,
        };
        if let Some(element) = node.cast::<HtmlElement>() {
            if let Err(err) = element.focus() {
                log::debug!("could not focus {:?}: {:?}", target, err);
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let view = self.client.view();
        let panels = view.panels;
        let disabled = !view.controls_enabled;

        let cb_start = ctx.link().callback(|_: MouseEvent| Start);
        let cb_reset = ctx.link().callback(|_: MouseEvent| Reset);
        let cb_submit = ctx.link().callback(|_: MouseEvent| Submit);
        let cb_input = ctx.link().callback(|e: InputEvent| {
            Input(e.target_unchecked_into::<HtmlInputElement>().value())
        });
        let cb_keydown = ctx.link().batch_callback(|e: KeyboardEvent| {
            (e.key() == "Enter").then_some(Submit)
        });
        let cb_hint = ctx.link().callback(|e: Event| {
            ToggleHint(e.target_unchecked_into::<HtmlInputElement>().checked())
        });
        let cb_dismiss = ctx.link().callback(|_: MouseEvent| DismissCelebration);
        let cb_play_again = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Start
        });

        let status_class = classes!(
            "status",
            matches!(view.status.kind, game::StatusKind::Error).then_some("error"),
            view.status.shaking.then_some("shake"),
        );
        let input_class = classes!(view.input_invalid.then_some("invalid"));
        let result = view.result.clone().filter(|_| panels.contains(Panels::RESULTS));
        let hint = view.hint.clone().filter(|_| panels.contains(Panels::HINT));

        html! {
            <div class="guessr">
                <header>
                    <h1>{"Number Guessing Game"}</h1>
                    <p>{"I'm thinking of a number between 1 and 100."}</p>
                </header>

                <div key={view.status.shake} class={status_class} aria-live="polite">
                    <span class="status-icon">{view.status.icon()}</span>
                    <span class="status-text">{view.status.text.clone()}</span>
                </div>

                <nav class="controls">
                    if panels.contains(Panels::START_BUTTON) {
                        <button ref={self.start_ref.clone()} onclick={cb_start} {disabled}
                            aria-label="Start a new number guessing game">{"Start game"}</button>
                    }
                    if panels.contains(Panels::RESET_BUTTON) {
                        <button class="secondary" onclick={cb_reset} {disabled}>{"Reset"}</button>
                    }
                </nav>

                if panels.contains(Panels::ATTEMPTS) {
                    <p class="attempts">{"Attempts: "}<strong>{view.attempts.clone()}</strong></p>
                }

                if panels.contains(Panels::GUESS_FORM) {
                    <section class="guess">
                        <input
                            ref={self.input_ref.clone()}
                            class={input_class}
                            type="number"
                            min="1"
                            max="100"
                            placeholder="1-100"
                            aria-label="Enter your guess between 1 and 100"
                            value={view.input.clone()}
                            oninput={cb_input}
                            onkeydown={cb_keydown}
                            {disabled}
                        />
                        <button onclick={cb_submit} disabled={!view.can_submit}
                            aria-label="Submit your guess">{"Guess"}</button>
                        <label>
                            <input type="checkbox" role="switch" checked={view.want_hint}
                                onchange={cb_hint} {disabled}/>
                            {"Include a hint"}
                        </label>
                    </section>
                }

                if let Some(card) = result {
                    <ResultView {card}/>
                }

                if let Some(hint) = hint {
                    <aside class="hint">
                        <strong>{"💡 Hint: "}</strong>
                        <span class="hint-text">{hint}</span>
                    </aside>
                }

                if panels.contains(Panels::HISTORY) {
                    <HistoryView entries={view.history.clone()}/>
                }

                if let Some(message) = view.celebration_message.clone() {
                    <CelebrationView
                        message={message}
                        confetti={self.confetti.clone()}
                        on_play_again={cb_play_again}
                        on_close={cb_dismiss}
                    />
                }

                if panels.contains(Panels::LOADING) {
                    <div class="loading" aria-busy="true"/>
                }
            </div>
        }
    }
}
