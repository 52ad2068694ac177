//! Browser-independent client core: the list mirror and its reducer, the
//! transport trait the UI implements, the operations built on it, and the
//! filtered/sorted view.

pub mod api;
pub mod ops;
pub mod store;
pub mod view;

pub use api::{ClientError, TodoApi};
pub use ops::{commit_draft, normalized_input, DraftCommit};
pub use store::{Action, ListsState, Notice, NoticeKind};
pub use view::{derive_view, SortDirection, ViewOptions};
