//! cmus-status core
//!
//! Parses the output of `cmus-remote -Q` and renders it as a single,
//! width-bounded status line for status bars.

pub mod format;
pub mod query;
pub mod status;

pub use format::{ format_status, DisplayOptions };
pub use query::{ query_status, QueryError, CMUS_REMOTE };
pub use status::{ PlaybackState, StatusRecord };
