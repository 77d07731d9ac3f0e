//! Tests for the terminal command parser and event printer.

use roundabouts::{CommandError, EventFormat, EventPrinter, PlayCommand};
use roundabouts_rules::{BoardChangeEvent, Coord, Player, PlayerId};

fn at(row: usize, col: usize) -> Coord {
    Coord::new(row, col).unwrap()
}

#[test]
fn test_parse_commands() {
    assert_eq!(
        "move 1 2 2 2".parse::<PlayCommand>(),
        Ok(PlayCommand::Move {
            source: at(1, 2),
            target: at(2, 2)
        })
    );
    assert_eq!(
        "  LOOP 1 0 ".parse::<PlayCommand>(),
        Ok(PlayCommand::Loop { source: at(1, 0) })
    );
    assert_eq!("b".parse::<PlayCommand>(), Ok(PlayCommand::Board));
    assert_eq!("turn".parse::<PlayCommand>(), Ok(PlayCommand::Turn));
    assert_eq!("exit".parse::<PlayCommand>(), Ok(PlayCommand::Quit));
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<PlayCommand>(), Err(CommandError::Empty));
    assert_eq!(
        "jump 1 1".parse::<PlayCommand>(),
        Err(CommandError::Unknown("jump".to_string()))
    );
    assert_eq!(
        "move 1 2".parse::<PlayCommand>(),
        Err(CommandError::Arity {
            command: "move",
            expected: 4
        })
    );
    assert_eq!(
        "loop 6 0".parse::<PlayCommand>(),
        Err(CommandError::BadCoordinate("6 0".to_string()))
    );
    assert_eq!(
        "loop x 0".parse::<PlayCommand>(),
        Err(CommandError::BadCoordinate("x".to_string()))
    );
}

#[test]
fn test_event_printer_formats() {
    let piece = Player::new(PlayerId(1)).piece(3).unwrap();
    let event = BoardChangeEvent::Move {
        source: at(1, 2),
        target: at(2, 2),
        piece,
    };

    let text = EventPrinter::new(EventFormat::Text)
        .format_event(&event)
        .unwrap();
    assert_eq!(text, event.to_string());

    let json = EventPrinter::new(EventFormat::Json)
        .format_event(&event)
        .unwrap();
    let parsed: BoardChangeEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, event);
    assert!(json.contains("\"kind\":\"move\""));
}
