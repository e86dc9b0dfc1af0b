use super::*;

#[test]
fn test_replaces_each_separator_with_one_space() {
    assert_eq!(normalize_str("a,b\nc\rd"), "a b c d");
    assert_eq!(normalize_str("line\r\nbreak"), "line  break");
}

#[test]
fn test_leaves_other_characters_alone() {
    let text = "Tabs\tand ünïcödé; semicolons | pipes \"quotes\"";
    assert_eq!(normalize_str(text), text);
}

#[test]
fn test_output_has_no_separators() {
    let inputs = [
        "",
        ",,,",
        "\n\r\n",
        "A song about love, and heart\nwritten in 1999\r",
        "no separators at all",
    ];
    for input in inputs {
        let out = normalize_str(input);
        assert!(!out.contains([',', '\n', '\r']), "separator left in {:?}", out);
        assert_eq!(out.chars().count(), input.chars().count());
    }
}

#[test]
fn test_idempotent() {
    let inputs = ["a,b", "x\ny\rz", "plain", "", ", \n ,"];
    for input in inputs {
        let once = normalize_str(input);
        assert_eq!(normalize_str(&once), once);
    }
}

#[test]
fn test_none_is_identity() {
    assert_eq!(normalize(None), None);
    assert_eq!(normalize(Some("a,b")), Some("a b".to_string()));
}
