use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::{info, trace};

use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::game::leaderboard::{LeaderboardStore, StoragePort};
use crate::game::puzzle_library::PuzzleLibrary;
use crate::game::session::GameSession;
use crate::helpers::FormatClock;
use crate::model::{
    CompletionState, GameStatus, GuessOutcome, MessageKind, SessionCommand, SessionEvent,
};

/// Owns the active session, the puzzle rotation and the leaderboard, and
/// translates `SessionCommand`s from the rendering surface into state
/// changes broadcast as `SessionEvent`s. One controller per UI surface, one
/// logical thread of control.
pub struct SessionController<S: StoragePort> {
    library: PuzzleLibrary,
    puzzle_index: usize,
    session: GameSession,
    leaderboard: LeaderboardStore<S>,
    event_emitter: EventEmitter<SessionEvent>,
    subscription_id: Option<Unsubscriber<SessionCommand>>,
}

impl<S: StoragePort> Destroyable for SessionController<S> {
    fn destroy(&mut self) {
        if let Some(subscription_id) = self.subscription_id.take() {
            subscription_id.unsubscribe();
        }
    }
}

impl<S: StoragePort + 'static> SessionController<S> {
    pub fn new(
        library: PuzzleLibrary,
        start_index: usize,
        leaderboard: LeaderboardStore<S>,
        command_observer: EventObserver<SessionCommand>,
        event_emitter: EventEmitter<SessionEvent>,
    ) -> Rc<RefCell<Self>> {
        let puzzle_index = start_index % library.len();
        let puzzle = library
            .get(puzzle_index)
            .expect("puzzle library is never empty");
        let session = GameSession::new(puzzle, puzzle_index, None);
        let controller = Self {
            library,
            puzzle_index,
            session,
            leaderboard,
            event_emitter,
            subscription_id: None,
        };
        let refcell = Rc::new(RefCell::new(controller));
        SessionController::wire_subscription(refcell.clone(), command_observer);
        refcell
    }

    fn wire_subscription(
        controller: Rc<RefCell<Self>>,
        command_observer: EventObserver<SessionCommand>,
    ) {
        let handler = controller.clone();
        let subscription_id = command_observer.subscribe(move |command| {
            let mut controller = handler.borrow_mut();
            controller.handle_command(command.clone());
        });
        controller.borrow_mut().subscription_id = Some(subscription_id);
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn leaderboard(&self) -> &LeaderboardStore<S> {
        &self.leaderboard
    }

    pub fn handle_command(&mut self, command: SessionCommand) {
        trace!(target: "session_controller", "Handling command: {:?}", command);
        match command {
            SessionCommand::SelectWord(word) => self.handle_select(&word),
            SessionCommand::ClearSelection => {
                self.session.clear_selection();
                self.emit_selection();
            }
            SessionCommand::Shuffle => {
                self.session.shuffle_pool();
                self.event_emitter
                    .emit(&SessionEvent::PoolUpdated(self.session.pool().to_vec()));
            }
            SessionCommand::Submit => self.handle_submit(),
            SessionCommand::Tick(delta) => self.handle_tick(delta),
            SessionCommand::Restart => self.load_puzzle(self.puzzle_index),
            SessionCommand::AdvancePuzzle => {
                self.load_puzzle((self.puzzle_index + 1) % self.library.len())
            }
            SessionCommand::LoadPuzzle(index) => self.load_puzzle(index % self.library.len()),
            SessionCommand::Share => {
                self.event_emitter
                    .emit(&SessionEvent::ShareReady(self.session.share_text()));
            }
            SessionCommand::InitDisplay => self.sync_display(),
            SessionCommand::Quit => (),
        }
    }

    fn emit_selection(&self) {
        self.event_emitter.emit(&SessionEvent::SelectionChanged(
            self.session.selection().to_vec(),
        ));
    }

    fn emit_timer(&self) {
        self.event_emitter
            .emit(&SessionEvent::TimerStateChanged(self.session.timer().clone()));
    }

    fn emit_message(&self, text: impl Into<String>, kind: MessageKind) {
        self.event_emitter.emit(&SessionEvent::StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn handle_select(&mut self, word: &str) {
        let was_running = self.session.timer().is_running();
        self.session.select_word(word);
        self.emit_selection();
        // first selection starts the clock; tell the embedding to schedule ticks
        if !was_running && self.session.timer().is_running() {
            self.emit_timer();
        }
    }

    fn handle_tick(&mut self, delta: Duration) {
        if !self.session.timer().is_running() {
            return;
        }
        self.session.tick(delta);
        self.emit_timer();
    }

    fn handle_submit(&mut self) {
        let outcome = self.session.submit();
        if outcome == GuessOutcome::NotReady {
            trace!(target: "session_controller", "Submit ignored; not ready");
            return;
        }
        self.event_emitter
            .emit(&SessionEvent::GuessResolved(outcome.clone()));
        self.emit_selection();
        match &outcome {
            GuessOutcome::Correct(category) => {
                self.event_emitter
                    .emit(&SessionEvent::SolvedChanged(self.session.solved().to_vec()));
                self.event_emitter
                    .emit(&SessionEvent::PoolUpdated(self.session.pool().to_vec()));
                self.emit_message(
                    format!("정답! {} 카테고리를 찾았습니다!", category.name),
                    MessageKind::Success,
                );
            }
            GuessOutcome::NearMiss => {
                self.event_emitter
                    .emit(&SessionEvent::MistakesChanged(self.session.mistakes()));
                self.emit_message("아깝네요! 하나만 틀렸어요", MessageKind::Warning);
            }
            GuessOutcome::Incorrect => {
                self.event_emitter
                    .emit(&SessionEvent::MistakesChanged(self.session.mistakes()));
                self.emit_message("틀렸습니다! 다시 시도해보세요", MessageKind::Error);
            }
            GuessOutcome::NotReady => (),
        }
        match self.session.status() {
            GameStatus::Won => self.complete_session(true),
            GameStatus::Lost => self.complete_session(false),
            GameStatus::InProgress => (),
        }
    }

    fn complete_session(&mut self, won: bool) {
        let stats = self.session.attempt_stats();
        info!(
            target: "session_controller",
            "Session over; won: {}; time: {}; mistakes: {}",
            won,
            stats.elapsed.format_clock(),
            stats.mistakes
        );
        let entries = self.leaderboard.record(&stats).to_vec();

        // the embedding cancels its tick source off this event
        self.emit_timer();
        if won {
            self.emit_message("축하합니다! 모든 카테고리를 찾았습니다!", MessageKind::Success);
            self.event_emitter
                .emit(&SessionEvent::SessionCompleted(CompletionState::Won(stats)));
        } else {
            self.emit_message("게임 오버! 내일 다시 도전해보세요", MessageKind::Error);
            self.event_emitter
                .emit(&SessionEvent::SessionCompleted(CompletionState::Lost(stats)));
        }
        self.event_emitter
            .emit(&SessionEvent::LeaderboardUpdated(entries));
    }

    fn load_puzzle(&mut self, index: usize) {
        let puzzle = self
            .library
            .get(index)
            .expect("puzzle library is never empty");
        self.puzzle_index = index;
        self.session = GameSession::new(puzzle, index, None);
        self.sync_display();
    }

    fn sync_display(&self) {
        self.event_emitter.emit(&SessionEvent::PuzzleChanged {
            puzzle_number: self.session.puzzle_number(),
        });
        self.event_emitter
            .emit(&SessionEvent::PoolUpdated(self.session.pool().to_vec()));
        self.emit_selection();
        self.event_emitter
            .emit(&SessionEvent::SolvedChanged(self.session.solved().to_vec()));
        self.event_emitter
            .emit(&SessionEvent::MistakesChanged(self.session.mistakes()));
        self.emit_timer();
        self.event_emitter.emit(&SessionEvent::LeaderboardUpdated(
            self.leaderboard.entries().to_vec(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use test_context::test_context;

    use crate::events::Channel;
    use crate::game::leaderboard::MemoryStore;
    use crate::tests::UsingLogger;

    use super::*;

    struct Harness {
        controller: Rc<RefCell<SessionController<MemoryStore>>>,
        commands: EventEmitter<SessionCommand>,
        events: Rc<RefCell<Vec<SessionEvent>>>,
        _event_subscription: Unsubscriber<SessionEvent>,
    }

    impl Harness {
        fn new() -> Self {
            let (command_emitter, command_observer) = Channel::<SessionCommand>::new();
            let (event_emitter, event_observer) = Channel::<SessionEvent>::new();
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = events.clone();
            let event_subscription = event_observer.subscribe(move |event: &SessionEvent| {
                sink.borrow_mut().push(event.clone());
            });
            let controller = SessionController::new(
                PuzzleLibrary::bundled(),
                0,
                LeaderboardStore::new(MemoryStore::default()),
                command_observer,
                event_emitter,
            );
            Self {
                controller,
                commands: command_emitter,
                events,
                _event_subscription: event_subscription,
            }
        }

        fn send(&self, command: SessionCommand) {
            self.commands.emit(&command);
        }

        fn select(&self, words: &[&str]) {
            for word in words {
                self.send(SessionCommand::SelectWord(word.to_string()));
            }
        }

        fn guess(&self, words: &[&str]) {
            self.select(words);
            self.send(SessionCommand::Submit);
        }

        fn drain_events(&self) -> Vec<SessionEvent> {
            self.events.borrow_mut().drain(..).collect()
        }
    }

    // groups of puzzle 0 in data/puzzles.json
    const FRUIT: [&str; 4] = ["사과", "포도", "복숭아", "수박"];
    const ANIMALS: [&str; 4] = ["호랑이", "토끼", "다람쥐", "고래"];
    const COLORS: [&str; 4] = ["빨강", "파랑", "노랑", "보라"];
    const WEATHER: [&str; 4] = ["맑음", "흐림", "소나기", "안개"];
    const WRONG: [&str; 4] = ["사과", "호랑이", "빨강", "맑음"];

    #[test]
    fn test_select_emits_selection_and_starts_timer() {
        let harness = Harness::new();
        harness.drain_events();
        harness.send(SessionCommand::SelectWord("사과".to_string()));

        let events = harness.drain_events();
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::SelectionChanged(words) if words == &["사과".to_string()])
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::TimerStateChanged(timer) if timer.is_running())));
    }

    #[test]
    fn test_tick_before_first_selection_is_silent() {
        let harness = Harness::new();
        harness.drain_events();
        harness.send(SessionCommand::Tick(Duration::from_millis(10)));
        assert!(harness.drain_events().is_empty());
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_correct_guess_event_flow(_: &mut UsingLogger) {
        let harness = Harness::new();
        harness.drain_events();
        harness.guess(&FRUIT);

        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::GuessResolved(GuessOutcome::Correct(cat)) if cat.name == "과일"
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::SolvedChanged(solved) if solved.len() == 1)));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::PoolUpdated(pool) if pool.len() == 12)));
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::StatusMessage { kind: MessageKind::Success, text } if text.contains("과일")
        )));
    }

    #[test]
    fn test_near_miss_message_differs_from_generic() {
        let harness = Harness::new();
        harness.guess(&["사과", "포도", "복숭아", "호랑이"]);
        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::StatusMessage { kind: MessageKind::Warning, .. }
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::GuessResolved(GuessOutcome::NearMiss))));

        harness.guess(&["사과", "포도", "호랑이", "토끼"]);
        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::StatusMessage { kind: MessageKind::Error, .. }
        )));
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_losing_records_to_leaderboard(_: &mut UsingLogger) {
        let harness = Harness::new();
        for _ in 0..4 {
            harness.guess(&WRONG);
        }

        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::SessionCompleted(CompletionState::Lost(stats)) if stats.mistakes == 4
        )));
        assert!(events.iter().any(
            |e| matches!(e, SessionEvent::LeaderboardUpdated(entries) if entries.len() == 1)
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::TimerStateChanged(timer) if !timer.is_running())));

        let controller = harness.controller.borrow();
        assert_eq!(controller.leaderboard().entries().len(), 1);
        assert!(!controller.leaderboard().entries()[0].won);
    }

    #[test]
    fn test_winning_records_a_won_entry() {
        let harness = Harness::new();
        for group in [&FRUIT, &ANIMALS, &COLORS, &WEATHER] {
            harness.guess(group);
        }

        let events = harness.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::SessionCompleted(CompletionState::Won(_)))));

        let controller = harness.controller.borrow();
        assert_eq!(controller.session().status(), GameStatus::Won);
        assert!(controller.leaderboard().entries()[0].won);
    }

    #[test]
    fn test_terminal_session_ignores_further_guesses() {
        let harness = Harness::new();
        for _ in 0..4 {
            harness.guess(&WRONG);
        }
        harness.drain_events();

        harness.guess(&FRUIT);
        let controller = harness.controller.borrow();
        assert!(controller.session().solved().is_empty());
        assert_eq!(controller.leaderboard().entries().len(), 1);
    }

    #[test]
    fn test_restart_gives_a_fresh_session_on_the_same_puzzle() {
        let harness = Harness::new();
        for _ in 0..4 {
            harness.guess(&WRONG);
        }
        harness.drain_events();
        harness.send(SessionCommand::Restart);

        let events = harness.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, SessionEvent::PuzzleChanged { puzzle_number: 0 })));

        let controller = harness.controller.borrow();
        assert_eq!(controller.session().status(), GameStatus::InProgress);
        assert_eq!(controller.session().mistakes(), 0);
        assert_eq!(controller.session().puzzle_number(), 0);
        // the leaderboard carries over across attempts
        assert_eq!(controller.leaderboard().entries().len(), 1);
    }

    #[test]
    fn test_advance_puzzle_wraps_around() {
        let harness = Harness::new();
        let library_len = PuzzleLibrary::bundled().len();
        for expected in (1..library_len).chain([0]) {
            harness.send(SessionCommand::AdvancePuzzle);
            assert_eq!(
                harness.controller.borrow().session().puzzle_number(),
                expected
            );
        }
    }

    #[test]
    fn test_share_emits_result_text() {
        let harness = Harness::new();
        harness.guess(&FRUIT);
        harness.drain_events();
        harness.send(SessionCommand::Share);

        let events = harness.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SessionEvent::ShareReady(text) if text == "한국어 커넥션 0번\n🟩⬜⬜⬜\n실수: 0/4"
        )));
    }

    #[test]
    fn test_destroy_stops_command_handling() {
        let harness = Harness::new();
        harness.controller.borrow_mut().destroy();
        harness.drain_events();
        harness.send(SessionCommand::SelectWord("사과".to_string()));
        assert!(harness.drain_events().is_empty());
        assert!(harness.controller.borrow().session().selection().is_empty());
    }
}
