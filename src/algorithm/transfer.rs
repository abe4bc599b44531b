//! Transfer classification
//!
//! Derives a `Transfer` from a parsed conversation. Status precedence is
//! integrated, then failed, then pending.

use chrono::TimeDelta;
use rayon::prelude::*;

use crate::models::{ERROR_SUPPRESSED, Message, ParsedConversation, Transfer, TransferStatus};

fn calculate_sla(conversation: &ParsedConversation) -> Option<TimeDelta> {
    match (&conversation.request_completed, &conversation.request_completed_ack) {
        (Some(completed), Some(completed_ack)) => Some(completed_ack.time - completed.time),
        _ => None,
    }
}

fn extract_intermediate_error_codes(intermediate_messages: &[Message]) -> Vec<u32> {
    intermediate_messages
        .iter()
        .filter_map(|message| message.error_code)
        .collect()
}

fn is_integrated(conversation: &ParsedConversation) -> bool {
    conversation
        .request_completed_ack
        .as_ref()
        .is_some_and(|ack| ack.error_code.is_none_or(|code| code == ERROR_SUPPRESSED))
}

fn has_final_ack_error(conversation: &ParsedConversation) -> bool {
    conversation
        .request_completed_ack
        .as_ref()
        .and_then(|ack| ack.error_code)
        .is_some_and(|code| code != ERROR_SUPPRESSED)
}

fn has_intermediate_message_error(conversation: &ParsedConversation) -> bool {
    conversation.request_completed_ack.is_none()
        && conversation
            .intermediate_messages
            .iter()
            .any(|message| message.error_code.is_some())
}

fn has_sender_error(conversation: &ParsedConversation) -> bool {
    conversation
        .request_started_ack
        .as_ref()
        .is_some_and(|ack| ack.error_code.is_some())
}

fn assign_status(conversation: &ParsedConversation) -> TransferStatus {
    if is_integrated(conversation) {
        TransferStatus::Integrated
    } else if has_final_ack_error(conversation) || has_intermediate_message_error(conversation) {
        TransferStatus::Failed
    } else if has_sender_error(conversation) {
        TransferStatus::PendingWithError
    } else {
        TransferStatus::Pending
    }
}

/// Classify a parsed conversation into a transfer
///
/// Never fails: every parsed conversation yields exactly one transfer.
#[must_use]
pub fn classify(conversation: &ParsedConversation) -> Transfer {
    let request_started = &conversation.request_started;
    let final_ack = conversation.request_completed_ack.as_ref();

    let transfer = Transfer {
        conversation_id: conversation.id.clone(),
        sla_duration: calculate_sla(conversation),
        requesting_practice_asid: request_started.from_party_asid.clone(),
        sending_practice_asid: request_started.to_party_asid.clone(),
        requesting_supplier: request_started.from_system.clone(),
        sending_supplier: request_started.to_system.clone(),
        status: assign_status(conversation),
        date_requested: request_started.time,
        date_completed: final_ack.map(|ack| ack.time),
        sender_error_code: conversation
            .request_started_ack
            .as_ref()
            .and_then(|ack| ack.error_code),
        final_error_code: final_ack.and_then(|ack| ack.error_code),
        intermediate_error_codes: extract_intermediate_error_codes(
            &conversation.intermediate_messages,
        ),
    };

    debug_assert!(
        transfer.status != TransferStatus::Failed
            || transfer.final_error_code.is_some()
            || !transfer.intermediate_error_codes.is_empty(),
        "failed transfer {} carries no error code",
        transfer.conversation_id
    );

    transfer
}

/// Classify every conversation, preserving order
#[must_use]
pub fn derive_transfers(conversations: &[ParsedConversation], parallel: bool) -> Vec<Transfer> {
    if parallel {
        conversations.par_iter().map(classify).collect()
    } else {
        conversations.iter().map(classify).collect()
    }
}

/// Transfers that integrated with a measurable SLA duration
pub fn filter_for_successful_transfers<'a>(
    transfers: impl IntoIterator<Item = &'a Transfer>,
) -> impl Iterator<Item = &'a Transfer> {
    transfers.into_iter().filter(|transfer| transfer.is_successful())
}
