//! Error types for formwork-core

use thiserror::Error;

/// Reasons a draft cannot be saved.
///
/// The `Display` text is what the editor shows inline, so the wording is
/// part of the contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters.")]
    NameTooShort,

    #[error("Role is required.")]
    RoleRequired,

    #[error("Location is required.")]
    LocationRequired,

    #[error("Bio must be 300 characters or less.")]
    BioTooLong,

    #[error("Avatar URL is invalid.")]
    AvatarUrlInvalid,

    #[error("Avatar URL must start with http:// or https://")]
    AvatarUrlScheme,

    #[error("Please add at least 1 tag.")]
    NoTags,

    #[error("Tags cannot exceed 8.")]
    TooManyTags,

    #[error("Each tag must be 20 characters or less.")]
    TagTooLong,

    /// A save command reached an editor its owner marked read-only.
    #[error("This profile is not editable.")]
    NotEditable,
}

/// Errors from the submission collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Submission rejected by the remote end")]
    Rejected,

    #[error("Submission channel closed before an outcome arrived")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_inline_copy() {
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Name must be at least 2 characters."
        );
        assert_eq!(ValidationError::RoleRequired.to_string(), "Role is required.");
        assert_eq!(
            ValidationError::AvatarUrlScheme.to_string(),
            "Avatar URL must start with http:// or https://"
        );
        assert_eq!(ValidationError::TooManyTags.to_string(), "Tags cannot exceed 8.");
    }

    #[test]
    fn submission_error_displays_cause() {
        assert!(SubmissionError::Rejected.to_string().contains("rejected"));
        assert!(SubmissionError::ChannelClosed.to_string().contains("closed"));
    }
}
