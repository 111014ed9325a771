use std::{panic::AssertUnwindSafe, sync::Arc};

use {
    futures::FutureExt,
    minilla_common::task::panic_message,
    tracing::{error, info},
};

use crate::{context::DispatchContext, definition::CommandDefinition, params::ParsedParams};

/// How a handler invocation ended. Never propagated past the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Completed,
    Failed { error: String },
    Panicked { message: String },
}

impl ExecutionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Run the command's handler once, containing both returned errors and
/// panics.
pub async fn execute(
    command: &CommandDefinition,
    ctx: DispatchContext,
    params: ParsedParams,
) -> ExecutionOutcome {
    let keyword = command.keyword();
    let message_id = ctx.message.id;
    let handler = Arc::clone(command.handler());

    match AssertUnwindSafe(handler.execute(ctx, params))
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            info!(keyword, %message_id, "command executed");
            ExecutionOutcome::Completed
        },
        Ok(Err(e)) => {
            error!(keyword, %message_id, error = %e, "command handler failed");
            ExecutionOutcome::Failed {
                error: format!("{e:#}"),
            }
        },
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            error!(keyword, %message_id, panic = %message, "command handler panicked");
            ExecutionOutcome::Panicked { message }
        },
    }
}
