//! Note arithmetic across the whole keyboard.

use std::cmp::Ordering;

use organum_core::{Note, NoteRange, PitchClass};
use organum_tests::note;

fn every_note() -> impl Iterator<Item = Note> {
    (-1..=9).flat_map(|octave| PitchClass::ALL.iter().map(move |pc| Note::new(*pc, octave)))
}

#[test]
fn successor_and_predecessor_are_inverse() {
    for n in every_note() {
        assert_eq!(n.successor().predecessor(), n, "{}", n);
        assert_eq!(n.predecessor().successor(), n, "{}", n);
        assert_eq!(n.successor().semitone_index(), n.semitone_index() + 1);
    }
}

#[test]
fn text_round_trip() {
    for n in every_note() {
        assert_eq!(Note::parse(&n.to_text()).unwrap(), n);
        assert_eq!(Note::parse(&n.to_text().to_lowercase()).unwrap(), n);
    }
}

#[test]
fn ordering_follows_semitone_index() {
    let all: Vec<Note> = every_note().collect();
    for a in &all {
        for b in all.iter().step_by(7) {
            let expected = a.semitone_index().cmp(&b.semitone_index());
            assert_eq!(a.compare(b), expected, "{} vs {}", a, b);
            assert_eq!(a.compare(b) == Ordering::Equal, a == b);
        }
    }
}

#[test]
fn octave_boundaries() {
    assert_eq!(note("B1").successor(), note("C2"));
    assert_eq!(note("C0").predecessor(), note("B-1"));
    assert_eq!(note("A3").semitone_offset_from(note("C1")), 33);
    assert_eq!(note("C1").last_of(56), note("G5"));
    assert_eq!(note("C1").last_of(61), note("C6"));
}

#[test]
fn invalid_notes() {
    for text in ["", "H2", "C", "Cb2", "C##2", "2C", "C 2", "C200000000"] {
        let err = Note::parse(text).unwrap_err();
        assert_eq!(err.code(), "ORGAN_001", "{:?}", text);
    }
}

#[test]
fn ranges_count_inclusively() {
    let range = NoteRange::new(note("C2"), note("C6")).unwrap();
    assert_eq!(range.len(), 49);
    assert_eq!(range.iter().next(), Some(note("C2")));
    assert_eq!(range.iter().last(), Some(note("C6")));
    assert!(range.contains(&note("F#4")));
    assert!(!range.contains(&note("B1")));
    assert_eq!(range.position(&note("D2")), Some(2));
    assert!(NoteRange::new(note("C3"), note("C2")).is_err());
}
