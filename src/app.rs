use tracing::{debug, info};

use crate::game::{Feedback, Focus, Game, Phase, Transition};
use crate::question::{Question, QuestionSource, RandomQuestions};
use crate::setup::{Configuration, QuestionCount, Setup};

/// Discrete events the presentation layer sends to the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    StepUp,
    StepDown,
    SelectQuestionCount(QuestionCount),
    NextQuestionCount,
    PreviousQuestionCount,
    ConfirmSetup,
    AnswerChanged(String),
    Submit,
    Acknowledge,
    RequestReset,
    ConfirmReset,
    CancelReset,
}

/// Whichever controller currently owns the session
#[derive(Debug, Clone)]
pub enum Screen {
    Setup(Setup),
    Playing(Game),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ScreenKind {
    Setup,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Modal {
    None,
    Feedback,
    ResetConfirm,
    Summary,
}

/// Read-only snapshot of the game fields for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct GameView<'a> {
    pub current_question: u32,
    pub question_count: u32,
    pub score: u32,
    pub question: Question,
    pub pending_answer: &'a str,
    pub feedback: Option<&'a Feedback>,
    pub summary: Option<String>,
}

/// Render request handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct View<'a> {
    pub screen: ScreenKind,
    pub config: Configuration,
    pub game: Option<GameView<'a>>,
    pub modal: Modal,
    pub focus: Focus,
}

pub struct App {
    pub screen: Screen,
    source: Box<dyn QuestionSource>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").field("screen", &self.screen).finish()
    }
}

impl App {
    pub fn new(initial: Configuration) -> Self {
        Self::with_source(initial, Box::new(RandomQuestions::new()))
    }

    pub fn with_source(initial: Configuration, source: Box<dyn QuestionSource>) -> Self {
        Self {
            screen: Screen::Setup(Setup::new(initial)),
            source,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.screen {
            Screen::Playing(game) => Some(game),
            Screen::Setup(_) => None,
        }
    }

    pub fn setup(&self) -> Option<&Setup> {
        match &self.screen {
            Screen::Setup(setup) => Some(setup),
            Screen::Playing(_) => None,
        }
    }

    /// Apply one event. Actions that make no sense for the active screen are ignored.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let mut confirmed = None;
        let transition = match &mut self.screen {
            Screen::Setup(setup) => {
                match action {
                    Action::StepUp => {
                        setup.step_up();
                    }
                    Action::StepDown => {
                        setup.step_down();
                    }
                    Action::SelectQuestionCount(count) => setup.select(count),
                    Action::NextQuestionCount => setup.select_next(),
                    Action::PreviousQuestionCount => setup.select_previous(),
                    Action::ConfirmSetup => confirmed = Some(setup.confirm()),
                    _ => {}
                }
                Transition::Stay
            }
            Screen::Playing(game) => match action {
                Action::AnswerChanged(text) => {
                    game.update_answer(&text);
                    Transition::Stay
                }
                Action::Submit => {
                    // Unparseable answers are a silent no-op
                    let _ = game.submit_answer();
                    Transition::Stay
                }
                Action::Acknowledge => game.acknowledge_feedback(self.source.as_mut()),
                Action::RequestReset => {
                    game.request_reset();
                    Transition::Stay
                }
                Action::ConfirmReset => game.confirm_reset(),
                Action::CancelReset => {
                    game.cancel_reset();
                    Transition::Stay
                }
                _ => Transition::Stay,
            },
        };

        if let Some(config) = confirmed {
            info!(?config, "setup confirmed");
            self.screen = Screen::Playing(Game::new(config, self.source.as_mut()));
        } else if let Transition::ToSetup(config) = transition {
            self.screen = Screen::Setup(Setup::new(config));
        }

        let view = self.view();
        debug!(screen = %view.screen, modal = %view.modal, "state");
    }

    pub fn view(&self) -> View<'_> {
        match &self.screen {
            Screen::Setup(setup) => View {
                screen: ScreenKind::Setup,
                config: setup.confirm(),
                game: None,
                modal: Modal::None,
                focus: Focus::Released,
            },
            Screen::Playing(game) => {
                let modal = match game.phase() {
                    Phase::AwaitingInput => Modal::None,
                    Phase::ShowingFeedback(_) => Modal::Feedback,
                    Phase::ConfirmingReset(_) => Modal::ResetConfirm,
                    Phase::Finished => Modal::Summary,
                };
                View {
                    screen: ScreenKind::Playing,
                    config: game.config(),
                    game: Some(GameView {
                        current_question: game.current_question(),
                        question_count: game.question_count(),
                        score: game.score(),
                        question: game.question(),
                        pending_answer: game.pending_answer(),
                        feedback: game.feedback(),
                        summary: game.is_finished().then(|| game.summary()),
                    }),
                    modal,
                    focus: game.focus(),
                }
            }
        }
    }
}
