//! Transfer table output
//!
//! Transfers are written as a single Arrow record batch to a Parquet file,
//! one row per transfer. SLA durations are stored in whole seconds and
//! timestamps as UTC microseconds.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{
    ArrayRef, Int64Array, Int64Builder, ListBuilder, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::error::Result;
use crate::error::util::safe_create_file;
use crate::models::Transfer;
use crate::utils::logging::log_operation_complete;

fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
}

/// Arrow schema of the transfers table
#[must_use]
pub fn transfer_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("conversation_id", DataType::Utf8, false),
        Field::new("sla_duration", DataType::Int64, true),
        Field::new("requesting_practice_asid", DataType::Utf8, false),
        Field::new("sending_practice_asid", DataType::Utf8, false),
        Field::new("requesting_supplier", DataType::Utf8, true),
        Field::new("sending_supplier", DataType::Utf8, true),
        Field::new("sender_error_code", DataType::Int64, true),
        Field::new("final_error_code", DataType::Int64, true),
        Field::new(
            "intermediate_error_codes",
            DataType::List(Arc::new(Field::new_list_field(DataType::Int64, true))),
            false,
        ),
        Field::new("status", DataType::Utf8, false),
        Field::new("date_requested", timestamp_type(), false),
        Field::new("date_completed", timestamp_type(), true),
    ]))
}

/// Convert transfers to a record batch matching `transfer_schema`
pub fn convert_transfers_to_record_batch(transfers: &[Transfer]) -> Result<RecordBatch> {
    let conversation_ids: StringArray = transfers
        .iter()
        .map(|t| Some(t.conversation_id.as_str()))
        .collect();
    let sla_durations: Int64Array = transfers
        .iter()
        .map(|t| t.sla_duration.map(|d| d.num_seconds()))
        .collect();
    let requesting_asids: StringArray = transfers
        .iter()
        .map(|t| Some(t.requesting_practice_asid.as_str()))
        .collect();
    let sending_asids: StringArray = transfers
        .iter()
        .map(|t| Some(t.sending_practice_asid.as_str()))
        .collect();
    let requesting_suppliers: StringArray = transfers
        .iter()
        .map(|t| t.requesting_supplier.as_deref())
        .collect();
    let sending_suppliers: StringArray = transfers
        .iter()
        .map(|t| t.sending_supplier.as_deref())
        .collect();
    let sender_errors: Int64Array = transfers
        .iter()
        .map(|t| t.sender_error_code.map(i64::from))
        .collect();
    let final_errors: Int64Array = transfers
        .iter()
        .map(|t| t.final_error_code.map(i64::from))
        .collect();

    let mut intermediate_errors = ListBuilder::new(Int64Builder::new());
    for transfer in transfers {
        for code in &transfer.intermediate_error_codes {
            intermediate_errors.values().append_value(i64::from(*code));
        }
        intermediate_errors.append(true);
    }

    let statuses: StringArray = transfers.iter().map(|t| Some(t.status.as_str())).collect();
    let dates_requested = TimestampMicrosecondArray::from(
        transfers
            .iter()
            .map(|t| t.date_requested.timestamp_micros())
            .collect::<Vec<_>>(),
    )
    .with_timezone("UTC");
    let dates_completed = TimestampMicrosecondArray::from(
        transfers
            .iter()
            .map(|t| t.date_completed.map(|d| d.timestamp_micros()))
            .collect::<Vec<_>>(),
    )
    .with_timezone("UTC");

    let columns: Vec<ArrayRef> = vec![
        Arc::new(conversation_ids),
        Arc::new(sla_durations),
        Arc::new(requesting_asids),
        Arc::new(sending_asids),
        Arc::new(requesting_suppliers),
        Arc::new(sending_suppliers),
        Arc::new(sender_errors),
        Arc::new(final_errors),
        Arc::new(intermediate_errors.finish()),
        Arc::new(statuses),
        Arc::new(dates_requested),
        Arc::new(dates_completed),
    ];

    Ok(RecordBatch::try_new(transfer_schema(), columns)?)
}

/// Write transfers to a Parquet file
pub fn write_transfers_parquet(transfers: &[Transfer], path: &Path) -> Result<()> {
    let start = Instant::now();
    let batch = convert_transfers_to_record_batch(transfers)?;

    let file = safe_create_file(path, "transfers table")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, transfers.len(), Some(start.elapsed()));
    Ok(())
}
