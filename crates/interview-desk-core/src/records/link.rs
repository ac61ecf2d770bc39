use crate::{CoreError, CoreResult};

use std::panic::Location;

use chrono::NaiveDate;
use error_location::ErrorLocation;
use uuid::Uuid;

/// Length of the random token appended to the base URL.
pub const LINK_TOKEN_LEN: usize = 8;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A generated interview link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewLinkRecord {
    /// Shareable URL.
    pub link: String,
    /// Position the interview is for.
    pub position: String,
    /// Candidate the link was generated for.
    pub candidate_name: String,
    /// Address entered with the request, used when sending the link.
    pub candidate_email: Option<String>,
    /// Creation date, display formatted.
    pub created_date: String,
}

impl InterviewLinkRecord {
    /// Interview id embedded in the link.
    ///
    /// # Errors
    ///
    /// See [`interview_id_from_link`].
    #[track_caller]
    pub fn interview_id(&self) -> CoreResult<&str> {
        interview_id_from_link(&self.link)
    }
}

/// Form input for generating a link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRequest {
    /// Position the interview is for.
    pub position: String,
    /// Candidate name.
    pub candidate_name: String,
    /// Optional address to send the link to.
    pub candidate_email: Option<String>,
    /// Question ids to include.
    pub question_ids: Vec<String>,
}

impl LinkRequest {
    /// Check that position, candidate name and at least one question are set.
    ///
    /// # Errors
    ///
    /// `MissingInformation` naming the first missing field.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        let missing = if self.position.trim().is_empty() {
            Some("position")
        } else if self.candidate_name.trim().is_empty() {
            Some("candidate name")
        } else if self.question_ids.is_empty() {
            Some("questions")
        } else {
            None
        };

        match missing {
            Some(field) => Err(CoreError::MissingInformation {
                field,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }
}

/// Random lowercase base-36 token of [`LINK_TOKEN_LEN`] characters.
pub fn generate_token() -> String {
    let mut value = Uuid::new_v4().as_u128();
    let mut token = String::with_capacity(LINK_TOKEN_LEN);
    for _ in 0..LINK_TOKEN_LEN {
        token.push(char::from(BASE36[(value % 36) as usize]));
        value /= 36;
    }
    token
}

/// Join a base URL and a token, tolerating a trailing slash on the base.
pub fn build_link(base_url: &str, token: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), token)
}

/// Extract the interview id: everything after the last `/`.
///
/// # Errors
///
/// `InvalidInterviewLink` if that segment is empty.
#[track_caller]
pub fn interview_id_from_link(link: &str) -> CoreResult<&str> {
    let id = link.rsplit('/').next().unwrap_or_default();
    if id.is_empty() {
        return Err(CoreError::InvalidInterviewLink {
            link: link.to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    Ok(id)
}

/// Check an address before "sending" a link to it.
///
/// # Errors
///
/// `MissingEmail` for a blank address.
#[track_caller]
pub fn validate_email(email: Option<&str>) -> CoreResult<&str> {
    match email.map(str::trim) {
        Some(address) if !address.is_empty() => Ok(address),
        _ => Err(CoreError::MissingEmail {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Format a date like `May 15, 2023`.
pub fn format_created_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
