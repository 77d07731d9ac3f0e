//! Tests for the session stepper and the UI adapter hand-off.

use roundabouts::{
    DelayedAnimator, GameSession, LoopResume, Phase, SessionConfig, SessionError, UiAdapter,
};
use roundabouts_rules::{BoardChangeEvent, Coord, LongMoveEnd, PlayerId};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(500);

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).expect("coordinate on the board")
}

/// A starter piece alone on (1,0), player 1 to move.
fn lone_piece_session() -> GameSession {
    let mut game = roundabouts_rules::Game::double_user_game();
    let piece = game.starter_player().unwrap().piece(0).unwrap();
    assert!(game.board_mut().place_piece(piece, at(1, 0)));
    GameSession::new(game, TICK).unwrap()
}

/// Resumes every loop immediately and remembers where it was asked.
#[derive(Default)]
struct InstantAdapter {
    calls: Mutex<Vec<Coord>>,
}

impl UiAdapter for InstantAdapter {
    fn request_loop_animation(&self, resume: LoopResume) {
        self.calls.lock().unwrap().push(resume.at());
        assert_eq!(resume.complete(), Ok(true));
    }
}

/// Keeps the resume token until the test decides to complete it.
#[derive(Default)]
struct HoldingAdapter {
    pending: Mutex<Option<LoopResume>>,
}

impl HoldingAdapter {
    fn take(&self) -> LoopResume {
        self.pending.lock().unwrap().take().expect("a pending loop")
    }
}

impl UiAdapter for HoldingAdapter {
    fn request_loop_animation(&self, resume: LoopResume) {
        *self.pending.lock().unwrap() = Some(resume);
    }
}

async fn wait_for_phase(session: &GameSession, phase: Phase) {
    let mut rx = session.subscribe();
    rx.wait_for(|current| *current == phase).await.unwrap();
}

#[test]
fn test_session_requires_runtime() {
    let game = roundabouts_rules::Game::double_user_game();
    assert_eq!(
        GameSession::new(game, TICK).unwrap_err(),
        SessionError::NoRuntime
    );
}

#[tokio::test(start_paused = true)]
async fn test_full_tour_through_all_inner_loops() {
    let session = lone_piece_session();
    let adapter = Arc::new(InstantAdapter::default());
    session.set_ui_adapter(adapter.clone());

    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    assert!(session.is_move_locked());
    assert_eq!(session.phase(), Phase::Stepping);

    session.settled().await;

    assert_eq!(
        *adapter.calls.lock().unwrap(),
        vec![at(5, 1), at(4, 5), at(0, 4), at(1, 0)]
    );
    assert_eq!(
        session.piece_at(at(0, 1)).map(|piece| piece.owner()),
        Some(PlayerId(1))
    );
    assert!(!session.is_move_locked());
    assert_eq!(session.active_player(), Some(PlayerId(2)));
    assert!(session.take_stepper_error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_stepper_advances_once_per_tick() {
    let session = lone_piece_session();
    session.set_ui_adapter(Arc::new(HoldingAdapter::default()));
    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    assert_eq!(session.piece_at(at(0, 1)).map(|p| p.owner()), Some(PlayerId(1)));

    // The first step happens right away, the next one a tick later.
    tokio::time::sleep(TICK / 2).await;
    assert!(session.piece_at(at(1, 1)).is_some());
    assert!(session.piece_at(at(2, 1)).is_none());

    tokio::time::sleep(TICK).await;
    assert!(session.piece_at(at(2, 1)).is_some());
    assert!(session.piece_at(at(1, 1)).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_input_refused_while_stepping() {
    let mut game = roundabouts_rules::Game::double_user_game();
    let mover = game.starter_player().unwrap().piece(0).unwrap();
    let other = game.other_player().unwrap().piece(0).unwrap();
    assert!(game.board_mut().place_piece(mover, at(1, 0)));
    assert!(game.board_mut().place_piece(other, at(3, 4)));
    let session = GameSession::new(game, TICK).unwrap();
    session.set_ui_adapter(Arc::new(HoldingAdapter::default()));

    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    assert!(!session.notify_input(at(3, 4), at(2, 4)));
    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(false));
    assert_eq!(session.active_player(), Some(PlayerId(1)));
}

#[tokio::test(start_paused = true)]
async fn test_paused_long_move_resumes_through_token() {
    let session = lone_piece_session();
    let adapter = Arc::new(HoldingAdapter::default());
    session.set_ui_adapter(adapter.clone());

    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    wait_for_phase(&session, Phase::AwaitingAnimation).await;

    assert!(session.is_move_locked());
    assert!(session.is_move_repeating());
    let paused = session.long_move().unwrap();
    assert_eq!(*paused.current(), at(5, 1));
    assert_eq!(*paused.start(), at(0, 1));

    let resume = adapter.take();
    assert_eq!(resume.at(), at(5, 1));
    assert_eq!(resume.complete(), Ok(true));
    assert_eq!(session.piece_at(at(4, 0)).map(|p| p.owner()), Some(PlayerId(1)));

    wait_for_phase(&session, Phase::AwaitingAnimation).await;
    assert!(session.piece_at(at(4, 5)).is_some());
    // The long move keeps its origin across loops.
    assert_eq!(*session.long_move().unwrap().start(), at(0, 1));

    assert_eq!(session.cancel_long_move(), Some(LongMoveEnd::Aborted));
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.is_move_locked());
    assert_eq!(session.active_player(), Some(PlayerId(2)));
}

#[tokio::test(start_paused = true)]
async fn test_missing_adapter_abandons_long_move() {
    let session = lone_piece_session();

    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    session.settled().await;

    assert_eq!(
        session.take_stepper_error(),
        Some(SessionError::AdapterMissing { at: at(5, 1) })
    );
    assert!(session.take_stepper_error().is_none());
    assert!(session.piece_at(at(5, 1)).is_some());
    assert!(!session.is_move_locked());
    assert!(!session.is_move_repeating());
    assert_eq!(session.active_player(), Some(PlayerId(2)));
}

#[tokio::test(start_paused = true)]
async fn test_resume_after_session_dropped() {
    let session = lone_piece_session();
    let adapter = Arc::new(HoldingAdapter::default());
    session.set_ui_adapter(adapter.clone());

    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    wait_for_phase(&session, Phase::AwaitingAnimation).await;
    let resume = adapter.take();
    drop(session);

    assert_eq!(resume.complete(), Err(SessionError::SessionClosed));
}

#[tokio::test(start_paused = true)]
async fn test_delayed_animator_completes_capture_chain() {
    let mut game = roundabouts_rules::Game::double_user_game();
    let mover = game.starter_player().unwrap().piece(0).unwrap();
    let victim = game.other_player().unwrap().piece(0).unwrap();
    assert!(game.board_mut().place_piece(mover, at(1, 0)));
    assert!(game.board_mut().place_piece(victim, at(4, 2)));
    let session = GameSession::new(game, TICK).unwrap();
    session.set_ui_adapter(Arc::new(DelayedAnimator::new(Duration::from_millis(300))));

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.add_board_change_listener(move |event: &BoardChangeEvent| {
        sink.lock().unwrap().push(*event);
    });

    assert_eq!(session.notify_loop_input(at(1, 0)), Ok(true));
    session.settled().await;

    // Down column 1, through the (5,1) loop, capture on (4,2), then the empty
    // (4,3) after a capture ends the chain.
    let events = events.lock().unwrap();
    assert!(matches!(events[0], BoardChangeEvent::Move { .. }));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, BoardChangeEvent::Capture { victim: v, .. } if *v == victim))
    );
    assert_eq!(session.piece_at(at(4, 2)), Some(mover));
    assert!(session.piece_at(at(4, 0)).is_none());
    assert_eq!(session.active_player(), Some(PlayerId(2)));
    assert_eq!(session.phase(), Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_session_from_config_places_pieces() {
    let config = SessionConfig::default();
    let session = GameSession::from_config(&config).unwrap();

    assert_eq!(session.active_player(), Some(PlayerId(1)));
    let (ones, twos) = session.with_game(|game| {
        (
            game.board().piece_count(PlayerId(1)),
            game.board().piece_count(PlayerId(2)),
        )
    });
    assert_eq!((ones, twos), (12, 12));
    assert!(session.notify_input(at(1, 2), at(2, 2)));
    assert_eq!(session.active_player(), Some(PlayerId(2)));
}
