use crate::{
    CoreError, LINK_TOKEN_LEN, LinkRequest, build_link, format_created_date, generate_token,
    interview_id_from_link, validate_email,
};

use chrono::NaiveDate;

fn complete_request() -> LinkRequest {
    LinkRequest {
        position: "Product Manager".to_string(),
        candidate_name: "Emma Thompson".to_string(),
        candidate_email: None,
        question_ids: vec!["l1".to_string()],
    }
}

/// WHAT: Requests missing any required field are rejected
/// WHY: A link without position, candidate or questions is useless
#[test]
fn given_incomplete_requests_when_validating_then_missing_information() {
    // Given: Requests each missing one required field
    let cases = [
        (
            LinkRequest {
                position: "  ".to_string(),
                ..complete_request()
            },
            "position",
        ),
        (
            LinkRequest {
                candidate_name: String::new(),
                ..complete_request()
            },
            "candidate name",
        ),
        (
            LinkRequest {
                question_ids: Vec::new(),
                ..complete_request()
            },
            "questions",
        ),
    ];

    for (request, expected) in cases {
        // When: Validating
        let result = request.validate();

        // Then: The first missing field is named
        assert!(
            matches!(result, Err(CoreError::MissingInformation { field, .. }) if field == expected),
            "expected missing {}",
            expected
        );
    }
    assert!(complete_request().validate().is_ok());
}

/// WHAT: Tokens are 8 lowercase base-36 characters
/// WHY: Links must be short and URL-safe
#[test]
fn given_generator_when_creating_tokens_then_base36_and_fixed_length() {
    // Given/When: A batch of tokens
    let tokens: Vec<String> = (0..50).map(|_| generate_token()).collect();

    // Then: Each is 8 chars of [0-9a-z] and they are not all identical
    for token in &tokens {
        assert_eq!(token.len(), LINK_TOKEN_LEN);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
        );
    }
    assert!(tokens.iter().any(|token| token != &tokens[0]));
}

/// WHAT: Link building tolerates a trailing slash
/// WHY: Base URLs come from user configuration
#[test]
fn given_base_url_with_trailing_slash_when_building_link_then_single_separator() {
    // Given/When/Then
    assert_eq!(
        build_link("https://interview.example.com/", "abc12345"),
        "https://interview.example.com/abc12345"
    );
    assert_eq!(
        build_link("https://interview.example.com", "abc12345"),
        "https://interview.example.com/abc12345"
    );
}

/// WHAT: Interview id is the last path segment
/// WHY: Previewing a link opens the session for that id
#[test]
#[allow(clippy::unwrap_used)]
fn given_link_when_extracting_interview_id_then_last_segment() {
    // Given: A generated link and a malformed one
    let link = "https://interview.example.com/k3x9ab2q";
    let malformed = "https://interview.example.com/";

    // When: Extracting ids
    let id = interview_id_from_link(link).unwrap();
    let error = interview_id_from_link(malformed);

    // Then: Last segment, or InvalidInterviewLink for an empty one
    assert_eq!(id, "k3x9ab2q");
    assert!(matches!(error, Err(CoreError::InvalidInterviewLink { .. })));
}

/// WHAT: Blank email addresses are rejected
/// WHY: "Send by email" needs somewhere to send to
#[test]
#[allow(clippy::unwrap_used)]
fn given_email_inputs_when_validating_then_blank_rejected() {
    // Given/When/Then
    assert!(matches!(validate_email(None), Err(CoreError::MissingEmail { .. })));
    assert!(matches!(
        validate_email(Some("   ")),
        Err(CoreError::MissingEmail { .. })
    ));
    assert_eq!(
        validate_email(Some(" emma@example.com ")).unwrap(),
        "emma@example.com"
    );
}

/// WHAT: Creation dates read like "May 15, 2023"
/// WHY: Matches the dashboard date column
#[test]
#[allow(clippy::unwrap_used)]
fn given_date_when_formatting_then_short_month_day_year() {
    // Given: Two dates
    let single_digit = NaiveDate::from_ymd_opt(2023, 5, 5).unwrap();
    let double_digit = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    // When/Then: Formatted without zero padding on the day
    assert_eq!(format_created_date(single_digit), "May 5, 2023");
    assert_eq!(format_created_date(double_digit), "Dec 31, 2024");
}
