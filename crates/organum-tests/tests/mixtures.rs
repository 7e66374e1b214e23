//! Mixtures and cornets: multi-row ranks with break notes.

use organum_core::{CompositeRank, Rank, RankKind, RankTable, RowId};
use organum_tests::{grand_orgue, mantes_project, note, notes, recit, row};
use pretty_assertions::assert_eq;

fn plein_jeu() -> CompositeRank {
    let rows = vec![
        row(&[Some("2"), Some("2 2/3"), Some("4"), Some("4")]),
        row(&[Some("1 1/3"), Some("2"), Some("2 2/3"), Some("4")]),
        row(&[Some("1"), Some("1 1/3"), Some("2"), Some("2 2/3")]),
        row(&[None, Some("1"), Some("1 1/3"), Some("2")]),
    ];
    CompositeRank::builder(
        "plein-jeu",
        rows,
        notes(&["C1", "C2", "C3", "F#4"]),
        80.0,
        5.0,
    )
    .build(&mantes_project(), &grand_orgue())
    .unwrap()
}

fn id(n: usize) -> RowId {
    RowId::new(n).unwrap()
}

#[test]
fn plein_jeu_segments_cover_the_windchest() {
    let rank = plein_jeu();
    let segments = rank.break_segments();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0].first(), note("C1"));
    assert_eq!(segments[3].last(), note("G5"));
    for pair in segments.windows(2) {
        assert_eq!(pair[0].last().successor(), pair[1].first());
    }
    let total: usize = segments.iter().map(|s| s.len()).sum();
    assert_eq!(total, rank.range().len());
}

#[test]
fn plein_jeu_first_row() {
    let rank = plein_jeu();
    let freqs = &rank.frequencies()[&id(1)];
    let lengths = &rank.lengths()[&id(1)];
    let sizes = &rank.sizes()[&id(1)];

    assert_eq!(freqs[0], Some(261.63));
    assert_eq!(freqs[12], Some(392.44));
    assert_eq!(freqs[55], Some(3135.96));
    assert_eq!(&lengths[..2], &[Some(654.0), Some(618.0)]);

    let leading: Vec<u32> = sizes[..13].iter().flatten().copied().collect();
    assert_eq!(leading, vec![53, 52, 50, 48, 47, 45, 44, 42, 41, 40, 38, 37, 42]);
    assert_eq!(sizes[55], Some(13));
}

#[test]
fn plein_jeu_upper_rows() {
    let rank = plein_jeu();
    let sizes = rank.sizes();
    let lengths = rank.lengths();

    assert_eq!(sizes[&id(2)][0], Some(42));
    assert_eq!(lengths[&id(2)][0], Some(436.0));
    assert_eq!(sizes[&id(3)][0], Some(36));

    let row_4 = &rank.frequencies()[&id(4)];
    assert_eq!(row_4.iter().filter(|f| f.is_none()).count(), 12);
    assert_eq!(row_4[12], Some(1046.5));
    assert_eq!(lengths[&id(4)][12], Some(164.0));
    assert_eq!(lengths[&id(4)][55], Some(27.0));
    assert_eq!(sizes[&id(4)][12], Some(24));
    assert_eq!(sizes[&id(4)][55], Some(8));
    assert_eq!(sizes[&id(3)][55], Some(10));
}

#[test]
fn plein_jeu_names() {
    let rank = plein_jeu();
    assert_eq!(rank.full_name(), "Plein-Jeu III-IV");
    assert_eq!(rank.tallest_height().suffix(), "4'");

    let rank = Rank::from(rank);
    assert_eq!(rank.kind(), RankKind::Composite);
    assert_eq!(rank.format_suffix(), "III-IV");
}

#[test]
fn plein_jeu_table() {
    let rank = Rank::from(plein_jeu());
    let table = RankTable::from_rank(&rank, &grand_orgue());

    assert_eq!(table.full_name, "Plein-Jeu III-IV");
    assert_eq!(table.len(), 56);
    assert_eq!(table.rows.len(), 4);
    let row_4 = &table.rows[&id(4)];
    assert_eq!(row_4.external_diameters[0], None);
    assert_eq!(row_4.external_diameters[12], Some(24.9));
    assert_eq!(table.rows[&id(1)].external_diameters[0], Some(54.5));
}

#[test]
fn cornet_v_from_middle_c() {
    let rows = ["8", "4", "2 2/3", "2", "1 3/5"]
        .iter()
        .map(|h| row(&[Some(*h)]))
        .collect();
    let cornet = CompositeRank::builder("cornet", rows, notes(&["C1"]), 100.0, 3.0)
        .cornet()
        .first_note(note("C3"))
        .build(&mantes_project(), &recit())
        .unwrap();

    assert_eq!(cornet.full_name(), "Cornet V");
    assert_eq!(cornet.notes().len(), 37);
    assert_eq!(cornet.notes().last(), Some(&note("C6")));

    let first_sizes: Vec<Option<u32>> = cornet.sizes().values().map(|s| s[0]).collect();
    assert_eq!(
        first_sizes,
        vec![Some(100), Some(76), Some(65), Some(58), Some(53)]
    );
    let first_lengths: Vec<Option<f64>> = cornet.lengths().values().map(|s| s[0]).collect();
    assert_eq!(
        first_lengths,
        vec![Some(327.0), Some(163.0), Some(109.0), Some(82.0), Some(65.0)]
    );
}

#[test]
fn break_beyond_the_windchest_is_rejected() {
    let rows = vec![row(&[Some("2"), Some("4")])];
    let err = CompositeRank::builder("fourniture", rows, notes(&["C1", "G#5"]), 80.0, 5.0)
        .build(&mantes_project(), &grand_orgue())
        .unwrap_err();
    assert_eq!(err.code(), "ORGAN_003");
}
