//! Record editing: draft state, validation and the save handshake.

mod controller;
mod draft;
mod validate;

pub use controller::{
    DraftEditor, EditorMode, EditorOptions, RecordOwner, SaveMode, SaveRequest, SaveToken,
};
pub use draft::{Draft, DraftField, parse_tags};
pub use validate::{BIO_MAX_CHARS, NAME_MIN_CHARS, TAG_MAX_CHARS, TAGS_MAX, validate};
