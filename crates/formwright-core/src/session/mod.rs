//! Session engine: per-pattern values and errors, submission decoding and
//! aggregation, and completion checks.

pub mod aggregate;
pub mod state;
pub mod wire;

pub use aggregate::{aggregate_pattern_session_values, apply_submission};
pub use state::{
    get_form_session_error, get_form_session_value, prune_session, session_is_complete,
    update_session,
};
pub use wire::decode_submission;
