//! # Handler chain
//!
//! Every message goes through all `before` hooks in order (any `false` stops it), then through
//! `handle` until a handler answers Stop, then through all `after` hooks in reverse.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::core::{Handler, HandlerResponse, Message, Result};

#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

fn handler_name(handler: &Arc<dyn Handler>) -> &'static str {
    let full = std::any::type_name_of_val(handler.as_ref());
    full.rsplit("::").next().unwrap_or(full)
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(message_id = %message.id, "step: handler_chain started");

        for h in &self.handlers {
            if !h.before(message).await? {
                info!(handler = handler_name(h), "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut outcome = HandlerResponse::Continue;
        for h in &self.handlers {
            let response = h.handle(message).await?;
            debug!(handler = handler_name(h), response = ?response, "step: handler handle done");
            if response == HandlerResponse::Stop {
                info!(handler = handler_name(h), "step: handled");
                outcome = response;
                break;
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &outcome).await?;
        }

        info!(message_id = %message.id, "step: handler_chain finished");
        Ok(outcome)
    }
}
