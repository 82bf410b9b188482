//! Storage-event consumer
//!
//! Polls the notification queue and runs one pipeline invocation per
//! received event. The pipeline itself never retries: a failed
//! invocation leaves the message on the queue and the queue's
//! redelivery policy decides whether it runs again. Only successful
//! invocations and poison messages (bodies that can never parse) are
//! deleted.

use anyhow::Context;
use aws_config::BehaviorVersion;
use aws_sdk_sqs::types::Message;
use photomark_core::{AppConfig, StorageEvent};
use photomark_processing::TransformPipeline;
use std::time::Duration;

const RECEIVE_ERROR_BACKOFF: Duration = Duration::from_secs(5);

pub async fn run(config: &AppConfig, pipeline: TransformPipeline) -> Result<(), anyhow::Error> {
    let queue_url = config
        .event_queue_url
        .clone()
        .context("EVENT_QUEUE_URL must be set")?;

    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = aws_sdk_sqs::Client::new(&aws_config);

    tracing::info!(queue_url = %queue_url, "worker started, waiting for storage events");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown signal received, stopping worker");
                return Ok(());
            }
            received = client
                .receive_message()
                .queue_url(&queue_url)
                .max_number_of_messages(1)
                .wait_time_seconds(config.receive_wait_secs)
                .send() =>
            {
                let output = match received {
                    Ok(output) => output,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to receive from event queue");
                        tokio::time::sleep(RECEIVE_ERROR_BACKOFF).await;
                        continue;
                    }
                };

                for message in output.messages.unwrap_or_default() {
                    handle_message(&client, &queue_url, &pipeline, message).await;
                }
            }
        }
    }
}

async fn handle_message(
    client: &aws_sdk_sqs::Client,
    queue_url: &str,
    pipeline: &TransformPipeline,
    message: Message,
) {
    let Some(body) = message.body() else {
        tracing::warn!("event message without body, dropping");
        delete_message(client, queue_url, &message).await;
        return;
    };

    let event = match StorageEvent::parse(body) {
        Ok(event) => event,
        Err(e) => {
            // A malformed body will never parse on redelivery either.
            tracing::warn!(error = %e, "unparseable storage event, dropping");
            delete_message(client, queue_url, &message).await;
            return;
        }
    };

    let Some(record) = event.first_record() else {
        tracing::warn!("storage event with no records, dropping");
        delete_message(client, queue_url, &message).await;
        return;
    };
    if event.records.len() > 1 {
        tracing::warn!(
            records = event.records.len(),
            "multiple records in one event, processing only the first"
        );
    }

    let key = match record.decoded_key() {
        Ok(key) => key,
        Err(e) => {
            tracing::warn!(error = %e, "invalid object key encoding, dropping event");
            delete_message(client, queue_url, &message).await;
            return;
        }
    };

    match pipeline.process(record.bucket(), &key).await {
        Ok(processed) => {
            tracing::info!(
                bucket = %record.bucket(),
                key = %processed.key,
                content_type = %processed.content_type,
                size_bytes = processed.size_bytes,
                "object transformed"
            );
            delete_message(client, queue_url, &message).await;
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                error_code = e.error_code(),
                stage = %e.stage(),
                bucket = %record.bucket(),
                key = %key,
                "transform pipeline failed"
            );
        }
    }
}

async fn delete_message(client: &aws_sdk_sqs::Client, queue_url: &str, message: &Message) {
    let Some(receipt) = message.receipt_handle() else {
        return;
    };
    if let Err(e) = client
        .delete_message()
        .queue_url(queue_url)
        .receipt_handle(receipt)
        .send()
        .await
    {
        tracing::error!(error = %e, "failed to delete event message");
    }
}
