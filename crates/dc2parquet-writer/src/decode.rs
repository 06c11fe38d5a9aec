//! CSV decoding with schema inference

use crate::error::{Result, WriterError};
use arrow::array::RecordBatch;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::io::Cursor;
use std::sync::Arc;

/// Decoded CSV content
#[derive(Debug)]
pub struct DecodedCsv {
    pub schema: SchemaRef,
    pub batches: Vec<RecordBatch>,
    pub rows: usize,
}

/// Infer a schema from the first `sample_rows` records and decode every row
///
/// The first line is the header. Columns with no values in the sample are
/// typed `Utf8`; a source with no columns at all is a schema error.
pub fn decode_csv(bytes: &[u8], sample_rows: usize, batch_size: usize) -> Result<DecodedCsv> {
    let format = Format::default().with_header(true);

    let (inferred, sampled) = format
        .infer_schema(Cursor::new(bytes), Some(sample_rows))
        .map_err(|e| WriterError::data_access(format!("malformed CSV: {}", e)))?;

    if inferred.fields().is_empty() {
        return Err(WriterError::schema("source CSV has no header columns"));
    }

    let schema = Arc::new(widen_null_columns(&inferred));
    tracing::debug!(
        columns = schema.fields().len(),
        sampled_rows = sampled,
        "Inferred CSV schema"
    );

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(batch_size)
        .build(Cursor::new(bytes))
        .map_err(|e| WriterError::data_access(format!("cannot open CSV reader: {}", e)))?;

    let mut batches = Vec::new();
    let mut rows = 0usize;
    for batch in reader {
        let batch = batch.map_err(|e| WriterError::data_access(format!("malformed CSV: {}", e)))?;
        rows += batch.num_rows();
        batches.push(batch);
    }

    Ok(DecodedCsv {
        schema,
        batches,
        rows,
    })
}

fn widen_null_columns(schema: &Schema) -> Schema {
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|field| match field.data_type() {
            DataType::Null => Field::new(field.name(), DataType::Utf8, true),
            _ => field.as_ref().clone(),
        })
        .collect();
    Schema::new(fields)
}
