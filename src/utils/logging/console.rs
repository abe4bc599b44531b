//! Console output utilities

use crate::pipeline::RunSummary;

/// Print a short summary of a completed run
pub fn print_run_summary(summary: &RunSummary) {
    println!("Reporting month: {}", summary.month);
    println!("Messages read: {}", summary.message_count);
    println!("Transfers in month: {}", summary.transfer_count);
    println!(
        "Conversations dropped (no EHR request at start): {}",
        summary.dropped_conversations
    );
    println!("Unresolved requesting ASIDs: {}", summary.unresolved_asid_count);
}
