//! Session management and the tool-calling orchestration loop.

use crate::model::{Backend, Message, ModelRequest, Reply, ToolCall, ToolResult};
use crate::tools::ToolHost;
use crate::{Error, Result};
use std::collections::HashSet;
use storage::{Event, EventKind, EventLog, SessionId};
use tracing::{debug, warn};

/// Default cap on gateway round trips per user turn.
pub const DEFAULT_MAX_ROUNDS: usize = 8;

/// A conversation session.
///
/// One session serializes all gateway and executor calls for its
/// transcript; there is never more than one batch in flight. Dropping
/// an in-progress [`ask`](Session::ask) future cancels the outstanding
/// call cooperatively and nothing is resubmitted.
pub struct Session<B, H> {
    pub id: SessionId,
    log: EventLog,
    backend: B,
    host: H,
    transcript: Vec<Message>,
    system: Option<String>,
    max_rounds: usize,
}

impl<B: Backend, H: ToolHost> Session<B, H> {
    /// Create a new session with the given log, backend, and tool host.
    pub fn new(log: EventLog, backend: B, host: H) -> Result<Self> {
        let id = SessionId::new();
        log.append(&Event::new(id, EventKind::SessionStart))?;

        Ok(Self {
            id,
            log,
            backend,
            host,
            transcript: Vec::new(),
            system: None,
            max_rounds: DEFAULT_MAX_ROUNDS,
        })
    }

    /// Set the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Override the round budget.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// The transcript so far. Grows monotonically; never truncated.
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Run one orchestrated turn: send the prompt, dispatch any tool
    /// invocations the model requests, and repeat until it answers.
    pub async fn ask(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(Message::user(prompt));
        self.log
            .append(&Event::message(self.id, storage::Role::User, prompt))?;

        for round in 0..self.max_rounds {
            let request = ModelRequest {
                messages: &self.transcript,
                tools: self.host.specs(),
                system: self.system.as_deref(),
            };
            let response = self.backend.call(request).await?;

            match response.reply() {
                Reply::Answer(text) => {
                    debug!(round, "model answered");
                    self.log
                        .append(&Event::message(self.id, storage::Role::Assistant, &text))?;
                    self.transcript.push(response.message);
                    return Ok(text);
                }
                Reply::ToolUse(calls) => {
                    debug!(round, requested = calls.len(), "model requested tools");
                    ensure_unique_ids(&calls)?;
                    self.transcript.push(response.message);
                    let results = self.dispatch_batch(&calls).await?;
                    self.transcript.push(Message::tool_results(results));
                }
            }
        }

        warn!(rounds = self.max_rounds, "round budget exhausted");
        Err(Error::LoopBudgetExceeded {
            rounds: self.max_rounds,
        })
    }

    /// Dispatch a batch of tool calls in the order received.
    ///
    /// Dispatch is serial: the model may have intended later calls to
    /// observe the effects of earlier ones.
    async fn dispatch_batch(&mut self, calls: &[ToolCall]) -> Result<Vec<ToolResult>> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            self.log.append(&Event::tool_call(
                self.id,
                &call.id,
                &call.name,
                call.input.clone(),
            ))?;

            let result = match self.host.execute(call).await {
                Ok(output) => ToolResult::success(&call.id, output),
                Err(err) if err.is_fatal() => {
                    return Err(Error::BackingService(err.to_string()));
                }
                Err(err) => {
                    warn!(tool = %call.name, id = %call.id, error = %err, "tool dispatch failed");
                    ToolResult::error(&call.id, err.to_string())
                }
            };

            self.log.append(&Event::tool_result(
                self.id,
                &result.tool_call_id,
                &result.output,
                result.is_error,
            ))?;
            results.push(result);
        }
        Ok(results)
    }

    /// End the session.
    pub fn end(self) -> Result<()> {
        self.log
            .append(&Event::new(self.id, EventKind::SessionEnd))?;
        Ok(())
    }
}

fn ensure_unique_ids(calls: &[ToolCall]) -> Result<()> {
    let mut seen = HashSet::new();
    for call in calls {
        if !seen.insert(call.id.as_str()) {
            return Err(Error::MalformedModelResponse(format!(
                "duplicate tool call id '{}' in one batch",
                call.id
            )));
        }
    }
    Ok(())
}
