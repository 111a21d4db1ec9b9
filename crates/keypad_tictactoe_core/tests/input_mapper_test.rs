//! Tests for the keypad-to-action mapping.

use keypad_tictactoe_core::{Action, Coord, KeyCoord, map_key};

#[test]
fn test_board_keys_place_marks() {
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(
                map_key(row, col),
                Action::PlaceMark(Coord::new(row, col).unwrap())
            );
        }
    }
}

#[test]
fn test_meta_keys() {
    assert_eq!(map_key(3, 0), Action::Reset);
    assert_eq!(map_key(3, 2), Action::RandomMove);
    assert_eq!(map_key(3, 3), Action::Quit);
}

#[test]
fn test_unassigned_keys_are_ignored() {
    assert_eq!(map_key(3, 1), Action::Ignored);
    assert_eq!(map_key(4, 0), Action::Ignored);
    assert_eq!(map_key(0, 4), Action::Ignored);
    assert_eq!(map_key(usize::MAX, usize::MAX), Action::Ignored);
}

#[test]
fn test_legend_keys_map_to_expected_actions() {
    let action = |label| KeyCoord::from_label(label).map(KeyCoord::action);

    assert_eq!(action('1'), Some(Action::PlaceMark(Coord::new(0, 0).unwrap())));
    assert_eq!(action('9'), Some(Action::PlaceMark(Coord::new(2, 2).unwrap())));
    assert_eq!(action('*'), Some(Action::Reset));
    assert_eq!(action('0'), Some(Action::Ignored));
    assert_eq!(action('#'), Some(Action::RandomMove));
    assert_eq!(action('D'), Some(Action::Quit));
}
