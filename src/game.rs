use std::mem;

use tracing::{debug, info};

use crate::question::{Question, QuestionSource};
use crate::setup::Configuration;

/// Longest answer kept; 12 x 12 = 144 still fits.
pub const MAX_ANSWER_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("answer {0:?} is not a whole number")]
    InvalidNumericInput(String),
    #[error("no question is waiting for an answer")]
    NotAwaitingInput,
}

/// Result of judging a submitted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct { score: u32 },
    Incorrect { question: Question },
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, Feedback::Correct { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Feedback::Correct { .. } => "Correct!",
            Feedback::Incorrect { .. } => "Sorry!",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Feedback::Correct { score } => format!("Well done! Your score is now {score}"),
            Feedback::Incorrect { question } => format!(
                "{} x {} is {}... Keep trying!",
                question.left,
                question.right,
                question.product()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    ShowingFeedback(Feedback),
    /// Holds the phase to return to on cancel
    ConfirmingReset(Box<Phase>),
    /// Every round has been acknowledged
    Finished,
}

/// Hint for the presentation layer about the answer field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Answer,
    Released,
}

/// What the owner of the game should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    ToSetup(Configuration),
}

/// A running game: configuration snapshot plus live round state
#[derive(Debug, Clone)]
pub struct Game {
    config: Configuration,
    current_question: u32,
    score: u32,
    question: Question,
    pending_answer: String,
    phase: Phase,
}

impl Game {
    /// Starts a game at question 1 with a freshly drawn round.
    pub fn new(config: Configuration, source: &mut dyn QuestionSource) -> Self {
        info!(
            tables_max = config.tables_max.get(),
            question_count = config.question_count.get(),
            "game started"
        );
        let mut game = Self {
            config,
            current_question: 1,
            score: 0,
            question: Question::new(0, 0),
            pending_answer: String::new(),
            phase: Phase::AwaitingInput,
        };
        game.start_round(source);
        game
    }

    pub fn config(&self) -> Configuration {
        self.config
    }

    pub fn current_question(&self) -> u32 {
        self.current_question
    }

    pub fn question_count(&self) -> u32 {
        self.config.question_count.get()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn question(&self) -> Question {
        self.question
    }

    pub fn pending_answer(&self) -> &str {
        &self.pending_answer
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Feedback stays visible behind a reset prompt until acknowledged.
    pub fn feedback(&self) -> Option<&Feedback> {
        match &self.phase {
            Phase::ShowingFeedback(fb) => Some(fb),
            Phase::ConfirmingReset(prev) => match prev.as_ref() {
                Phase::ShowingFeedback(fb) => Some(fb),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn focus(&self) -> Focus {
        match self.phase {
            Phase::AwaitingInput => Focus::Answer,
            _ => Focus::Released,
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.phase {
            Phase::Finished => true,
            Phase::ConfirmingReset(prev) => matches!(prev.as_ref(), Phase::Finished),
            _ => false,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "You scored {} out of {}",
            self.score,
            self.question_count()
        )
    }

    pub fn start_round(&mut self, source: &mut dyn QuestionSource) {
        self.question = source.next_question(self.config.tables_max);
        self.pending_answer.clear();
        self.phase = Phase::AwaitingInput;
        debug!(
            round = self.current_question,
            left = self.question.left,
            right = self.question.right,
            "round started"
        );
    }

    /// Keeps only the first three characters; no numeric check here.
    pub fn update_answer(&mut self, text: &str) {
        if self.phase != Phase::AwaitingInput {
            return;
        }
        self.pending_answer = text.chars().take(MAX_ANSWER_LEN).collect();
    }

    pub fn submit_answer(&mut self) -> Result<Feedback, AnswerError> {
        if self.phase != Phase::AwaitingInput {
            return Err(AnswerError::NotAwaitingInput);
        }
        // Any whole number is judged, including negatives and "-0"
        let guess: i64 = self
            .pending_answer
            .parse()
            .map_err(|_| AnswerError::InvalidNumericInput(self.pending_answer.clone()))?;

        let feedback = if guess == i64::from(self.question.product()) {
            self.score += 1;
            Feedback::Correct { score: self.score }
        } else {
            Feedback::Incorrect {
                question: self.question,
            }
        };
        info!(
            round = self.current_question,
            guess,
            expected = self.question.product(),
            correct = feedback.is_correct(),
            "answer judged"
        );

        self.phase = Phase::ShowingFeedback(feedback.clone());
        Ok(feedback)
    }

    pub fn acknowledge_feedback(&mut self, source: &mut dyn QuestionSource) -> Transition {
        match self.phase {
            Phase::ShowingFeedback(_) => {
                if self.current_question < self.question_count() {
                    self.current_question += 1;
                    self.start_round(source);
                } else {
                    info!(
                        score = self.score,
                        question_count = self.question_count(),
                        "game finished"
                    );
                    self.pending_answer.clear();
                    self.phase = Phase::Finished;
                }
                Transition::Stay
            }
            Phase::Finished => Transition::ToSetup(self.config),
            _ => Transition::Stay,
        }
    }

    pub fn request_reset(&mut self) {
        if matches!(self.phase, Phase::ConfirmingReset(_)) {
            return;
        }
        let previous = mem::replace(&mut self.phase, Phase::AwaitingInput);
        self.phase = Phase::ConfirmingReset(Box::new(previous));
    }

    pub fn confirm_reset(&mut self) -> Transition {
        if !matches!(self.phase, Phase::ConfirmingReset(_)) {
            return Transition::Stay;
        }
        info!(score = self.score, "game reset");
        self.score = 0;
        self.pending_answer.clear();
        self.phase = Phase::AwaitingInput;
        Transition::ToSetup(Configuration::default())
    }

    pub fn cancel_reset(&mut self) {
        if let Phase::ConfirmingReset(_) = self.phase {
            if let Phase::ConfirmingReset(previous) =
                mem::replace(&mut self.phase, Phase::AwaitingInput)
            {
                self.phase = *previous;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::ScriptedQuestions;
    use crate::setup::{QuestionCount, TablesMax};
    use assert_matches::assert_matches;

    fn config(tables: u8, count: QuestionCount) -> Configuration {
        Configuration {
            tables_max: TablesMax::clamped(tables),
            question_count: count,
        }
    }

    fn game_with(questions: &[(u8, u8)], count: QuestionCount) -> (Game, ScriptedQuestions) {
        let mut source = ScriptedQuestions::new(questions.iter().copied());
        let game = Game::new(config(5, count), &mut source);
        (game, source)
    }

    #[test]
    fn new_game_awaits_first_answer() {
        let (game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        assert_eq!(game.current_question(), 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.question(), Question::new(3, 4));
        assert_eq!(game.phase(), &Phase::AwaitingInput);
        assert_eq!(game.focus(), Focus::Answer);
        assert!(game.feedback().is_none());
    }

    #[test]
    fn answer_truncated_to_three_chars() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("12345");
        assert_eq!(game.pending_answer(), "123");
    }

    #[test]
    fn answer_keeps_non_numeric_text() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("a1");
        assert_eq!(game.pending_answer(), "a1");
    }

    #[test]
    fn invalid_submit_changes_nothing() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        for text in ["", "abc", "1a", " "] {
            game.update_answer(text);
            assert_matches!(
                game.submit_answer(),
                Err(AnswerError::InvalidNumericInput(_))
            );
            assert_eq!(game.score(), 0);
            assert_eq!(game.current_question(), 1);
            assert!(game.feedback().is_none());
            assert_eq!(game.phase(), &Phase::AwaitingInput);
        }
    }

    #[test]
    fn correct_answer_scores_once() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("12");
        let fb = game.submit_answer().unwrap();
        assert_eq!(fb, Feedback::Correct { score: 1 });
        assert_eq!(fb.title(), "Correct!");
        assert_eq!(fb.message(), "Well done! Your score is now 1");
        assert_eq!(game.score(), 1);
        assert_eq!(game.focus(), Focus::Released);
    }

    #[test]
    fn wrong_answer_reports_product() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("13");
        let fb = game.submit_answer().unwrap();
        assert!(!fb.is_correct());
        assert_eq!(fb.title(), "Sorry!");
        assert!(fb.message().contains("12"));
        assert_eq!(fb.message(), "3 x 4 is 12... Keep trying!");
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn input_blocked_while_feedback_shown() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("12");
        game.submit_answer().unwrap();
        game.update_answer("99");
        assert_eq!(game.pending_answer(), "12");
        assert_matches!(game.submit_answer(), Err(AnswerError::NotAwaitingInput));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn acknowledge_advances_and_draws_new_round() {
        let (mut game, mut source) = game_with(&[(3, 4), (2, 2)], QuestionCount::Five);
        game.update_answer("12");
        game.submit_answer().unwrap();
        assert_eq!(game.acknowledge_feedback(&mut source), Transition::Stay);
        assert_eq!(game.current_question(), 2);
        assert_eq!(game.question(), Question::new(2, 2));
        assert_eq!(game.pending_answer(), "");
        assert!(game.feedback().is_none());
        assert_eq!(game.phase(), &Phase::AwaitingInput);
    }

    #[test]
    fn acknowledge_without_feedback_is_noop() {
        let (mut game, mut source) = game_with(&[(3, 4)], QuestionCount::Five);
        assert_eq!(game.acknowledge_feedback(&mut source), Transition::Stay);
        assert_eq!(game.current_question(), 1);
        assert_eq!(game.question(), Question::new(3, 4));
    }

    #[test]
    fn last_round_finishes_then_returns_to_setup() {
        let (mut game, mut source) = game_with(&[], QuestionCount::Five);
        for _ in 0..5 {
            let answer = game.question().product().to_string();
            game.update_answer(&answer);
            game.submit_answer().unwrap();
            game.acknowledge_feedback(&mut source);
        }
        assert!(game.is_finished());
        assert_eq!(game.current_question(), 5);
        assert_eq!(game.score(), 5);
        assert_eq!(game.summary(), "You scored 5 out of 5");

        let cfg = game.config();
        assert_eq!(
            game.acknowledge_feedback(&mut source),
            Transition::ToSetup(cfg)
        );
    }

    #[test]
    fn score_never_exceeds_index() {
        let (mut game, mut source) = game_with(&[], QuestionCount::Twenty);
        for round in 0..20u32 {
            let answer = if round % 3 == 0 {
                "999".to_string()
            } else {
                game.question().product().to_string()
            };
            game.update_answer(&answer);
            game.submit_answer().unwrap();
            assert!(game.score() <= game.current_question());
            game.acknowledge_feedback(&mut source);
            assert!(game.current_question() <= game.question_count());
        }
        assert!(game.is_finished());
        assert!(game.score() <= game.question_count());
    }

    #[test]
    fn cancel_reset_restores_previous_phase() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("13");
        game.submit_answer().unwrap();
        let before = game.phase().clone();

        game.request_reset();
        assert_matches!(game.phase(), Phase::ConfirmingReset(_));
        assert!(game.feedback().is_some());

        game.cancel_reset();
        assert_eq!(game.phase(), &before);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn confirm_reset_restores_defaults() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Twenty);
        game.update_answer("12");
        game.submit_answer().unwrap();
        game.request_reset();
        assert_eq!(game.confirm_reset(), Transition::ToSetup(Configuration::default()));
        assert_eq!(game.score(), 0);
        assert_eq!(game.pending_answer(), "");
    }

    #[test]
    fn confirm_without_request_is_noop() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        assert_eq!(game.confirm_reset(), Transition::Stay);
        assert_eq!(game.phase(), &Phase::AwaitingInput);
    }

    #[test]
    fn request_reset_twice_keeps_original_phase() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.request_reset();
        game.request_reset();
        game.cancel_reset();
        assert_eq!(game.phase(), &Phase::AwaitingInput);
    }

    #[test]
    fn negative_answer_is_judged_wrong() {
        let (mut game, _) = game_with(&[(3, 4)], QuestionCount::Five);
        game.update_answer("-5");
        assert_eq!(
            game.submit_answer(),
            Ok(Feedback::Incorrect {
                question: Question::new(3, 4)
            })
        );
        assert_matches!(game.phase(), Phase::ShowingFeedback(_));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn negative_zero_matches_zero_product() {
        let (mut game, _) = game_with(&[(0, 3)], QuestionCount::Five);
        game.update_answer("-0");
        assert_eq!(game.submit_answer(), Ok(Feedback::Correct { score: 1 }));
        assert_eq!(game.score(), 1);
    }
}
