use super::model::RefinedQuery;
use super::{extract_first_number, parse_dialogues, parse_string_list};

#[test]
fn test_extract_first_number() {
    assert_eq!(extract_first_number("3"), Some(3));
    assert_eq!(extract_first_number("The best match is Movie 2."), Some(2));
    assert_eq!(extract_first_number("Movie 10, definitely"), Some(10));
    assert_eq!(extract_first_number("no digits here"), None);
    assert_eq!(extract_first_number(""), None);
}

#[test]
fn test_parse_dialogues_bare_array() {
    let dialogues = parse_dialogues(
        r#"[{"character": "Neo", "quote": "Whoa.", "context": "Dojo fight"}]"#,
    )
    .expect("parses");

    assert_eq!(dialogues.len(), 1);
    assert_eq!(dialogues[0].character, "Neo");
    assert_eq!(dialogues[0].context.as_deref(), Some("Dojo fight"));
}

#[test]
fn test_parse_dialogues_wrapped_object() {
    let dialogues = parse_dialogues(
        r#"{"dialogues": [{"character": "Trinity", "quote": "Dodge this."}]}"#,
    )
    .expect("parses");

    assert_eq!(dialogues.len(), 1);
    assert_eq!(dialogues[0].quote, "Dodge this.");
    assert_eq!(dialogues[0].context, None);
}

#[test]
fn test_parse_dialogues_rejects_garbage() {
    assert!(parse_dialogues("not json at all").is_none());
    assert!(parse_dialogues(r#"{"no_array": 1}"#).is_none());
    assert!(parse_dialogues(r#""just a string""#).is_none());
}

#[test]
fn test_parse_string_list_shapes() {
    assert_eq!(
        parse_string_list(r#"["Blade Runner", "Dark City"]"#),
        Some(vec!["Blade Runner".to_string(), "Dark City".to_string()])
    );
    assert_eq!(
        parse_string_list(r#"{"movies": ["Inception"]}"#),
        Some(vec!["Inception".to_string()])
    );
    assert!(parse_string_list("42").is_none());
}

#[test]
fn test_refined_query_defaults() {
    let refined: RefinedQuery =
        serde_json::from_str(r#"{"refined_query": "the matrix"}"#).expect("parses");

    assert_eq!(refined.refined_query, "the matrix");
    assert_eq!(refined.intent_type, "title");
    assert_eq!(refined.likely_year, None);
}

#[test]
fn test_refined_query_sanitized() {
    let refined: RefinedQuery = serde_json::from_str(
        r#"{"refined_query": "", "intent_type": "plot", "likely_year": "null"}"#,
    )
    .expect("parses");

    let sanitized = refined.sanitized("hacker movie");
    assert_eq!(sanitized.refined_query, "hacker movie");
    assert_eq!(sanitized.likely_year, None);

    let refined: RefinedQuery = serde_json::from_str(
        r#"{"refined_query": "The Matrix", "likely_year": "1999"}"#,
    )
    .expect("parses");
    let sanitized = refined.sanitized("matrix");
    assert_eq!(sanitized.refined_query, "The Matrix");
    assert_eq!(sanitized.likely_year.as_deref(), Some("1999"));
}

#[test]
fn test_refined_query_passthrough() {
    let refined = RefinedQuery::passthrough("space movie");
    assert_eq!(refined.refined_query, "space movie");
    assert_eq!(refined.intent_type, "title");
    assert_eq!(refined.likely_year, None);
    assert_eq!(refined.additional_info, "");
}
