use super::*;
use pretty_assertions::assert_eq;

fn note(text: &str) -> Note {
    Note::parse(text).unwrap()
}

fn notes(texts: &[&str]) -> Vec<Note> {
    texts.iter().map(|t| note(t)).collect()
}

fn row(heights: &[Option<&str>]) -> Vec<Option<FootHeight>> {
    heights
        .iter()
        .map(|h| h.map(|h| FootHeight::parse(h).unwrap()))
        .collect()
}

fn grand_orgue() -> (Project, Windchest) {
    (
        Project::with_defaults("test"),
        Windchest::new("grand-orgue", note("C1"), 56).unwrap(),
    )
}

fn plein_jeu_rows() -> Vec<Vec<Option<FootHeight>>> {
    vec![
        row(&[Some("2"), Some("2 2/3"), Some("4"), Some("4")]),
        row(&[Some("1 1/3"), Some("2"), Some("2 2/3"), Some("4")]),
        row(&[Some("1"), Some("1 1/3"), Some("2"), Some("2 2/3")]),
        row(&[None, Some("1"), Some("1 1/3"), Some("2")]),
    ]
}

fn plein_jeu_builder() -> CompositeRankBuilder {
    CompositeRank::builder(
        "plein-jeu",
        plein_jeu_rows(),
        notes(&["C1", "C2", "C3", "F#4"]),
        80.0,
        5.0,
    )
}

fn plein_jeu() -> CompositeRank {
    let (project, chest) = grand_orgue();
    plein_jeu_builder().build(&project, &chest).unwrap()
}

fn row_id(n: usize) -> RowId {
    RowId::new(n).unwrap()
}

#[test]
fn test_row_id_text() {
    assert_eq!(row_id(1).to_string(), "row_1");
    assert_eq!("row_12".parse::<RowId>().unwrap(), row_id(12));
    assert!("row_0".parse::<RowId>().is_err());
    assert!("rank_1".parse::<RowId>().is_err());
    assert_eq!(RowId::new(0), None);
    assert_eq!(row_id(3).index(), 2);
}

#[test]
fn test_break_segments_partition_compass() {
    let rank = plein_jeu();
    let segments = rank.break_segments();
    let bounds: Vec<(String, String)> = segments
        .iter()
        .map(|s| (s.first().to_string(), s.last().to_string()))
        .collect();
    assert_eq!(
        bounds,
        vec![
            ("C1".to_string(), "B1".to_string()),
            ("C2".to_string(), "B2".to_string()),
            ("C3".to_string(), "F4".to_string()),
            ("F#4".to_string(), "G5".to_string()),
        ]
    );

    let covered: Vec<Note> = segments.iter().flat_map(|s| s.iter()).collect();
    assert_eq!(covered, rank.notes());
}

#[test]
fn test_first_segment_starts_at_first_note() {
    let (project, chest) = grand_orgue();
    let rank = CompositeRank::builder(
        "fourniture",
        vec![row(&[Some("2"), Some("4")])],
        notes(&["C1", "C3"]),
        80.0,
        5.0,
    )
    .first_note(note("C2"))
    .build(&project, &chest)
    .unwrap();

    let segments = rank.break_segments();
    assert_eq!(segments[0].first(), note("C2"));
    assert_eq!(segments[0].last(), note("B2"));
    assert_eq!(rank.frequencies()[&row_id(1)].len(), 44);
}

#[test]
fn test_full_name_row_span() {
    assert_eq!(plein_jeu().full_name(), "Plein-Jeu III-IV");
    assert_eq!(plein_jeu().sounding_rows_per_segment(), vec![3, 4, 4, 4]);

    let (project, chest) = grand_orgue();
    let rank = CompositeRank::builder(
        "plein-jeu",
        plein_jeu_rows()[..3].to_vec(),
        notes(&["C1", "C2", "C3", "F#4"]),
        80.0,
        5.0,
    )
    .build(&project, &chest)
    .unwrap();
    assert_eq!(rank.full_name(), "Plein-Jeu III");
}

#[test]
fn test_frequencies_mark_silent_segments() {
    let freqs = plein_jeu().frequencies();
    assert_eq!(freqs.len(), 4);
    for series in freqs.values() {
        assert_eq!(series.len(), 56);
    }

    let row_1 = &freqs[&row_id(1)];
    assert_eq!(row_1[0], Some(261.63));
    assert_eq!(row_1[1], Some(277.18));
    assert_eq!(row_1[12], Some(392.44));
    assert_eq!(row_1[55], Some(3135.96));

    let row_4 = &freqs[&row_id(4)];
    assert!(row_4[..12].iter().all(Option::is_none));
    assert!(row_4[12..].iter().all(Option::is_some));
    assert_eq!(row_4[12], Some(1046.5));
}

#[test]
fn test_lengths() {
    let lengths = plein_jeu().lengths();
    assert_eq!(&lengths[&row_id(1)][..2], &[Some(654.0), Some(618.0)]);
    assert_eq!(lengths[&row_id(2)][0], Some(436.0));
    assert_eq!(lengths[&row_id(4)][11], None);
    assert_eq!(lengths[&row_id(4)][12], Some(164.0));
    assert_eq!(lengths[&row_id(4)][55], Some(27.0));
}

#[test]
fn test_sizes_follow_reference_rank() {
    let rank = plein_jeu();
    assert_eq!(rank.tallest_height().value(), 4.0);

    let sizes = rank.sizes();
    let row_1: Vec<u32> = sizes[&row_id(1)][..13].iter().map(|s| s.unwrap()).collect();
    assert_eq!(row_1, vec![53, 52, 50, 48, 47, 45, 44, 42, 41, 40, 38, 37, 42]);
    assert_eq!(sizes[&row_id(2)][0], Some(42));
    assert_eq!(sizes[&row_id(3)][0], Some(36));
    assert_eq!(sizes[&row_id(4)][0], None);
    assert_eq!(sizes[&row_id(4)][12], Some(24));
    assert_eq!(sizes[&row_id(1)][55], Some(13));

    let reference = rank.reference_rank();
    assert_eq!(reference.len(), 80);
    assert_eq!(reference.notes().last(), Some(&note("G7")));
    assert_eq!(reference.sizes()[12], 53);
    assert_eq!(reference.sizes()[79], 6);
}

#[test]
fn test_high_rows_keep_tapering_past_the_compass() {
    let sizes = plein_jeu().sizes();
    let top: Vec<u32> = sizes[&row_id(4)][42..].iter().map(|s| s.unwrap()).collect();
    assert_eq!(top, vec![13, 13, 12, 12, 11, 11, 11, 10, 10, 10, 9, 9, 9, 8]);
    for (id, series) in &sizes {
        assert!(series[55] < series[42], "{} stops shrinking", id);
    }
}

#[test]
fn test_sizes_match_unrounded_lengths() {
    let (project, chest) = grand_orgue();
    let rows = vec![row(&[Some("4")]), row(&[Some("1 3/5")])];
    let rank = CompositeRank::builder("sesquialtera", rows, notes(&["C1"]), 80.0, 5.0)
        .build(&project, &chest)
        .unwrap();

    // 32.72 mm sits between reference pipes of 34.39 and 32.46 mm, which
    // tie at 1 mm once rounded.
    assert_eq!(rank.lengths()[&row_id(2)][48], Some(33.0));
    assert_eq!(rank.sizes()[&row_id(2)][48], Some(9));
    assert_eq!(rank.sizes()[&row_id(2)][51], Some(8));
}

#[test]
fn test_external_diameters_skip_silent() {
    let ext = plein_jeu().external_diameters();
    assert_eq!(ext[&row_id(4)][0], None);
    assert_eq!(ext[&row_id(4)][12], Some(24.9));
    assert_eq!(ext[&row_id(1)][0], Some(54.5));
}

#[test]
fn test_cornet_halves_lengths() {
    let (project, chest) = grand_orgue();
    let mixture = plein_jeu();
    let cornet = plein_jeu_builder().cornet().build(&project, &chest).unwrap();

    assert_eq!(cornet.closure(), PipeClosure::Closed);
    assert_eq!(cornet.frequencies(), mixture.frequencies());
    let (open, closed) = (mixture.lengths(), cornet.lengths());
    for (id, series) in &open {
        for (o, c) in series.iter().zip(&closed[id]) {
            assert_eq!(o.map(|o| (o / 2.0).floor()), *c);
        }
    }
    assert_eq!(cornet.sizes(), mixture.sizes());
}

#[test]
fn test_cornet_from_middle_c() {
    let project = Project::with_defaults("test");
    let chest = Windchest::new("recit", note("C1"), 61).unwrap();
    let rows = ["8", "4", "2 2/3", "2", "1 3/5"]
        .iter()
        .map(|h| row(&[Some(*h)]))
        .collect();
    let cornet = CompositeRank::builder("cornet", rows, notes(&["C1"]), 100.0, 3.0)
        .cornet()
        .first_note(note("C3"))
        .build(&project, &chest)
        .unwrap();

    assert_eq!(cornet.full_name(), "Cornet V");
    assert_eq!(cornet.range().len(), 37);
    let firsts: Vec<Option<u32>> = cornet.sizes().values().map(|s| s[0]).collect();
    assert_eq!(firsts, vec![Some(100), Some(76), Some(65), Some(58), Some(53)]);
    let lengths: Vec<Option<f64>> = cornet.lengths().values().map(|s| s[0]).collect();
    assert_eq!(
        lengths,
        vec![Some(327.0), Some(163.0), Some(109.0), Some(82.0), Some(65.0)]
    );
}

#[test]
fn test_row_length_mismatch() {
    let (project, chest) = grand_orgue();
    let mut rows = plein_jeu_rows();
    rows[2].pop();
    let err = CompositeRank::builder("plein-jeu", rows, notes(&["C1", "C2", "C3", "F#4"]), 80.0, 5.0)
        .build(&project, &chest)
        .unwrap_err();
    assert_eq!(err.code(), "ORGAN_003");
    assert!(err.to_string().contains("row_3"));
}

#[test]
fn test_break_note_validation() {
    let (project, chest) = grand_orgue();
    let cases = [
        vec![],
        notes(&["C2", "C3", "C4", "C5"]),
        notes(&["C1", "C3", "C2", "C4"]),
        notes(&["C1", "C2", "C2", "C4"]),
        notes(&["C1", "C2", "C3", "G#5"]),
    ];
    for breaks in cases {
        let err = CompositeRank::builder("plein-jeu", plein_jeu_rows(), breaks, 80.0, 5.0)
            .build(&project, &chest)
            .unwrap_err();
        assert_eq!(err.code(), "ORGAN_003");
    }
}

#[test]
fn test_silent_rows_and_segments() {
    let (project, chest) = grand_orgue();
    let breaks = notes(&["C1", "C3"]);

    let silent_row = vec![row(&[Some("2"), Some("4")]), row(&[None, None])];
    let err = CompositeRank::builder("fourniture", silent_row, breaks.clone(), 80.0, 5.0)
        .build(&project, &chest)
        .unwrap_err();
    assert_eq!(err.code(), "ORGAN_003");

    let silent_segment = vec![row(&[None, Some("4")]), row(&[None, Some("2")])];
    let err = CompositeRank::builder("fourniture", silent_segment, breaks.clone(), 80.0, 5.0)
        .build(&project, &chest)
        .unwrap_err();
    assert_eq!(err.code(), "ORGAN_003");

    let err = CompositeRank::builder("fourniture", vec![], breaks, 80.0, 5.0)
        .build(&project, &chest)
        .unwrap_err();
    assert_eq!(err.code(), "ORGAN_003");
}

#[test]
fn test_non_positive_parameters() {
    let (project, chest) = grand_orgue();
    let err = CompositeRank::builder("plein-jeu", plein_jeu_rows(), notes(&["C1", "C2", "C3", "F#4"]), 80.0, 0.0)
        .build(&project, &chest)
        .unwrap_err();
    assert_eq!(err.code(), "ORGAN_004");
}

#[test]
fn test_row_map_serializes_with_row_keys() {
    let (project, chest) = grand_orgue();
    let rank = CompositeRank::builder(
        "fourniture",
        vec![row(&[None, Some("2")])],
        notes(&["C1", "G5"]),
        80.0,
        5.0,
    )
    .build(&project, &chest)
    .unwrap();
    let json = serde_json::to_value(rank.frequencies()).unwrap();
    let row_1 = json["row_1"].as_array().unwrap();
    assert_eq!(row_1.len(), 56);
    assert!(row_1[0].is_null());
    assert!(row_1[55].is_number());
}
