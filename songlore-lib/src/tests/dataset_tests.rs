use super::*;

const CSV: &str = "\
title,tag,artist,year,views,features,lyrics,id
Love Song,pop,Artist A,1999,10,{},\"I love you, baby\nforever\",1
,rap,Artist B,2001,5,{},some words,2
Peace Train,rock,Artist C,1971,7,{},,3
War,rock,Artist D,1970,9,{},what is it good for,4
";

fn records(n: usize) -> Vec<SongRecord> {
    (0..n)
        .map(|i| SongRecord::new(i.to_string(), format!("Title {i}"), "Artist", "la la"))
        .collect()
}

#[test]
fn test_read_maps_columns_by_name() {
    let summary = read_records_from(CSV.as_bytes(), DEFAULT_MAX_ROWS).unwrap();
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.records.len(), 4);

    let first = &summary.records[0];
    assert_eq!(first.id, "1");
    assert_eq!(first.title, "Love Song");
    assert_eq!(first.tag, "pop");
    assert_eq!(first.artist, "Artist A");
    assert_eq!(first.lyrics.as_deref(), Some("I love you, baby\nforever"));
}

#[test]
fn test_read_blank_title_and_missing_lyrics() {
    let summary = read_records_from(CSV.as_bytes(), DEFAULT_MAX_ROWS).unwrap();
    assert_eq!(summary.records[1].title, "");
    assert!(!summary.records[1].has_valid_title());
    assert_eq!(summary.records[2].lyrics, None);
}

#[test]
fn test_read_respects_max_rows() {
    let summary = read_records_from(CSV.as_bytes(), 2).unwrap();
    assert_eq!(summary.records.len(), 2);
    assert_eq!(summary.records[1].id, "2");
}

#[test]
fn test_read_requires_columns() {
    let err = read_records_from("id,title,artist\n1,a,b\n".as_bytes(), 10).unwrap_err();
    assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "tag"));
}

#[test]
fn test_sample_is_deterministic_for_seed() {
    let a = sample(records(1000), 100, 1);
    let b = sample(records(1000), 100, 1);
    assert_eq!(a, b);
    assert_eq!(a.len(), 100);

    let c = sample(records(1000), 100, 2);
    assert_ne!(a, c);
}

#[test]
fn test_sample_has_no_duplicates_and_keeps_order() {
    let picked = sample(records(500), 250, 7);
    let ids: Vec<usize> = picked.iter().map(|r| r.id.parse().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_sample_larger_than_input_returns_all() {
    let all = sample(records(10), 150_000, DEFAULT_SEED);
    assert_eq!(all.len(), 10);
}

#[test]
fn test_write_includes_about_and_topic() {
    let enriched = vec![EnrichedRecord {
        record: SongRecord::new("1", "Love Song", "Artist A", "I love you  baby").with_tag("pop"),
        about_text: Some("A song about love and heart".to_string()),
        about_source: Some(songlore_core::SourceKind::Genius),
        topic: "love".to_string(),
    }];
    let mut buf = Vec::new();
    let written = write_enriched_to(&mut buf, &enriched).unwrap();
    assert_eq!(written, 1);

    let out = String::from_utf8(buf).unwrap();
    let mut lines = out.lines();
    assert_eq!(
        lines.next(),
        Some("id,title,tag,artist,lyrics,about_section,topic")
    );
    assert_eq!(
        lines.next(),
        Some("1,Love Song,pop,Artist A,I love you  baby,A song about love and heart,love")
    );
}

#[test]
fn test_write_empty_still_has_header() {
    let mut buf = Vec::new();
    write_enriched_to(&mut buf, &[]).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap().trim_end(),
        "id,title,tag,artist,lyrics,about_section,topic"
    );
}

#[test]
fn test_write_to_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("matched.csv");
    write_enriched(&path, &[]).unwrap();
    assert!(path.exists());
}
