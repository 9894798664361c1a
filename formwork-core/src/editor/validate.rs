//! Draft validation. Rules run in a fixed order and the first failure wins.

use url::Url;

use super::draft::Draft;
use crate::error::ValidationError;

pub const NAME_MIN_CHARS: usize = 2;
pub const BIO_MAX_CHARS: usize = 300;
pub const TAGS_MAX: usize = 8;
pub const TAG_MAX_CHARS: usize = 20;

/// Checks a draft and returns the tags it would commit.
pub fn validate(draft: &Draft) -> Result<Vec<String>, ValidationError> {
    if draft.name.trim().chars().count() < NAME_MIN_CHARS {
        return Err(ValidationError::NameTooShort);
    }
    if draft.role.trim().is_empty() {
        return Err(ValidationError::RoleRequired);
    }
    if draft.location.trim().is_empty() {
        return Err(ValidationError::LocationRequired);
    }
    if draft.bio.trim().chars().count() > BIO_MAX_CHARS {
        return Err(ValidationError::BioTooLong);
    }

    let avatar = draft.avatar_url.trim();
    if !avatar.is_empty() {
        let url = Url::parse(avatar).map_err(|_| ValidationError::AvatarUrlInvalid)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::AvatarUrlScheme);
        }
    }

    let tags = draft.tags();
    if tags.is_empty() {
        return Err(ValidationError::NoTags);
    }
    if tags.len() > TAGS_MAX {
        return Err(ValidationError::TooManyTags);
    }
    if tags.iter().any(|t| t.chars().count() > TAG_MAX_CHARS) {
        return Err(ValidationError::TagTooLong);
    }

    Ok(tags)
}
