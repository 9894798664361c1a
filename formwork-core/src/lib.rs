//! formwork-core: state machines behind the formwork panels
//!
//! This crate holds everything the panels do that is not drawing:
//!
//! - **Permission matrix** - [`permissions::evaluate`] turns a [`RuleTable`], a role and
//!   the user's optional selections into [`EffectivePermissions`]
//! - **Draft/commit editing** - [`DraftEditor`] keeps a private draft of one [`Record`]
//!   and only reports values to its [`RecordOwner`] after validation passes
//! - **Save handshake** - an owner that does not hold the editor can still command a save
//!   by handing it a new [`SaveToken`] and reading the answer from
//!   [`RecordOwner::on_save_result`]
//! - **Workflow** - [`Workflow`] sequences edit, permission assignment and submission
//! - **Roster** - [`Roster`] is the filterable member collection behind the team panel
//!
//! # Quick Start
//!
//! ```
//! use formwork_core::{Workflow, Step, default_rules};
//!
//! let mut workflow = Workflow::new(default_rules());
//! // Blank profile: the embedded editor refuses to save, so Next stays put.
//! workflow.next();
//! assert_eq!(workflow.step(), Step::EditProfile);
//! assert!(workflow.editor().error().is_some());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Workflow (owner: record, role, selections)    │
//! │   │ SaveToken ──────────▶ DraftEditor         │
//! │   │ ◀── on_save_result ── (draft, validation) │
//! │   └── evaluate(rules, role, selections)       │
//! └──────────────────────────────────────────────┘
//! ```

pub mod editor;
pub mod error;
pub mod permissions;
pub mod profile;
pub mod record;
pub mod roster;
pub mod submit;
pub mod workflow;

pub use editor::{
    DraftEditor, DraftField, EditorMode, EditorOptions, RecordOwner, SaveMode, SaveRequest,
    SaveToken, parse_tags, validate,
};
pub use error::{SubmissionError, ValidationError};
pub use permissions::{
    EffectiveEntry, EffectivePermissions, OptionalSelections, PermissionDef, PermissionKey,
    PermissionMode, RoleModes, RuleTable, default_rules, evaluate,
};
pub use profile::ProfileDesk;
pub use record::{Member, MemberId, Record, Role, RoleOption, role_options};
pub use roster::{Roster, initials};
pub use submit::{SimulatedSubmitter, SubmissionPayload, Submitter};
pub use workflow::{SubmissionState, SubmitMessage, Step, Workflow};
