use formwright_types::error::SubmissionError;

use super::{HandlerOutcome, SUBMIT, SubmissionContext, SubmissionHandler};
use crate::session::apply_submission;

/// Validate and store the submitted fields under the target pattern.
pub struct SubmitHandler;

impl SubmissionHandler for SubmitHandler {
    fn id(&self) -> &str {
        SUBMIT
    }

    async fn handle(&self, ctx: SubmissionContext<'_>) -> Result<HandlerOutcome, SubmissionError> {
        let next = apply_submission(ctx.registry, ctx.session, &ctx.pattern.id, ctx.data)?;
        if next.data == ctx.session.data {
            return Ok(HandlerOutcome::unchanged(ctx.session));
        }
        Ok(HandlerOutcome::changed(next))
    }
}
