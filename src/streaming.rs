use crate::error::{ModelError, ModelResult};
use crate::models::StreamingChatResponse;
use futures::{future, Stream, StreamExt};
use reqwest_eventsource::{retry, Error as EventError, Event, EventSource};
use std::pin::Pin;

/// A streaming response from the gateway
pub type StreamingResponse = Pin<Box<dyn Stream<Item = ModelResult<StreamingChatResponse>> + Send>>;

/// Sentinel the gateway sends after the last chunk
const DONE: &str = "[DONE]";

/// Wait for the event source to open, then decode chunks until `[DONE]`.
///
/// Connection failures (bad status, wrong content type) are returned here
/// rather than as the first stream item. The source never reconnects.
pub async fn open(mut source: EventSource) -> ModelResult<StreamingResponse> {
    source.set_retry_policy(Box::new(retry::Never));

    match source.next().await {
        Some(Ok(Event::Open)) => {}
        Some(Ok(Event::Message(message))) => {
            source.close();
            return Err(ModelError::Stream(format!(
                "received event `{}` before the stream opened",
                message.event
            )));
        }
        Some(Err(error)) => {
            source.close();
            return Err(connect_error(error).await);
        }
        None => return Err(ModelError::Stream("event source closed before opening".to_string())),
    }

    let stream = source
        .take_while(|event| future::ready(!is_end(event)))
        .filter_map(|event| future::ready(decode(event)));
    Ok(Box::pin(stream))
}

fn is_end(event: &Result<Event, EventError>) -> bool {
    match event {
        Ok(Event::Message(message)) => message.data.trim() == DONE,
        Err(EventError::StreamEnded) => true,
        _ => false,
    }
}

fn decode(event: Result<Event, EventError>) -> Option<ModelResult<StreamingChatResponse>> {
    match event {
        Ok(Event::Open) => None,
        Ok(Event::Message(message)) => Some(serde_json::from_str(&message.data).map_err(ModelError::from)),
        Err(EventError::Transport(e)) => Some(Err(ModelError::Transport(e))),
        Err(e) => Some(Err(ModelError::Stream(e.to_string()))),
    }
}

async fn connect_error(error: EventError) -> ModelError {
    match error {
        EventError::InvalidStatusCode(status, response) => {
            ModelError::from_status(status, response.text().await.unwrap_or_default())
        }
        EventError::Transport(e) => ModelError::Transport(e),
        other => ModelError::Stream(other.to_string()),
    }
}
