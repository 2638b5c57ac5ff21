//! Tests for link header parsing.

use super::*;

#[test]
fn test_parse_link_header_with_next() {
    let header = r#"<https://gitlab.com/api/v4/projects?page=2>; rel="next""#;

    let pagination = parse_link_header(Some(header));

    assert!(pagination.has_next());
    assert_eq!(
        pagination.next.as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=2")
    );
    assert_eq!(pagination.prev, None);
}

#[test]
fn test_parse_link_header_with_all_relations() {
    let header = concat!(
        r#"<https://gitlab.com/api/v4/projects?page=1>; rel="first", "#,
        r#"<https://gitlab.com/api/v4/projects?page=2>; rel="prev", "#,
        r#"<https://gitlab.com/api/v4/projects?page=4>; rel="next", "#,
        r#"<https://gitlab.com/api/v4/projects?page=9>; rel="last""#,
    );

    let pagination = parse_link_header(Some(header));

    assert_eq!(
        pagination.first.as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=1")
    );
    assert_eq!(
        pagination.prev.as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=2")
    );
    assert_eq!(
        pagination.next.as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=4")
    );
    assert_eq!(
        pagination.last.as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=9")
    );
}

#[test]
fn test_parse_link_header_none() {
    let pagination = parse_link_header(None);

    assert_eq!(pagination, Pagination::default());
    assert!(!pagination.has_next());
}

#[test]
fn test_parse_link_header_unrelated_relation() {
    let header = r#"<http://example.com>; rel="unimportant""#;

    let pagination = parse_link_header(Some(header));

    assert!(!pagination.has_next());
}

#[test]
fn test_parse_link_header_malformed_segment_is_ignored() {
    // Pagination is advisory; a broken segment never fails the parse.
    let header = r#"garbage, <https://gitlab.com/api/v4/users?page=3>; rel="next""#;

    let pagination = parse_link_header(Some(header));

    assert_eq!(
        pagination.next.as_deref(),
        Some("https://gitlab.com/api/v4/users?page=3")
    );
}

#[test]
fn test_next_page_url() {
    let header = r#"<https://gitlab.com/api/v4/projects?page=2>; rel="next""#;

    assert_eq!(
        next_page_url(Some(header)).as_deref(),
        Some("https://gitlab.com/api/v4/projects?page=2")
    );
    assert_eq!(next_page_url(None), None);
}
