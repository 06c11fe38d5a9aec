//! Parquet encoding into an in-memory buffer
//!
//! The whole file is encoded before anything touches storage, so the upload
//! is a single PUT of a complete object.

use crate::error::{Result, WriterError};
use arrow::array::RecordBatch;
use arrow::datatypes::SchemaRef;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use std::io::{self, Write};

struct HashingBuffer {
    buffer: Vec<u8>,
    hasher: blake3::Hasher,
}

impl HashingBuffer {
    fn new() -> Self {
        Self {
            buffer: Vec::new(),
            hasher: blake3::Hasher::new(),
        }
    }

    fn finish(self) -> EncodedParquet {
        let hash = self.hasher.finalize();
        EncodedParquet {
            bytes: self.buffer,
            content_hash: hash.to_hex().to_string(),
        }
    }
}

impl Write for HashingBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.hasher.update(buf);
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Encoded Parquet file plus the Blake3 hash of its bytes
#[derive(Debug)]
pub struct EncodedParquet {
    pub bytes: Vec<u8>,
    pub content_hash: String,
}

/// Writer properties for converted files
///
/// - ZSTD level 2
/// - Dictionary encoding enabled
/// - Page-level statistics
/// - Caller-chosen rows per group
pub(crate) fn writer_properties(row_group_size: usize) -> WriterProperties {
    let metadata = vec![
        KeyValue {
            key: "dc2parquet.version".to_string(),
            value: Some(env!("CARGO_PKG_VERSION").to_string()),
        },
        KeyValue {
            key: "source.format".to_string(),
            value: Some("csv".to_string()),
        },
    ];

    WriterProperties::builder()
        .set_dictionary_enabled(true)
        .set_statistics_enabled(EnabledStatistics::Page)
        .set_compression(Compression::ZSTD(ZstdLevel::try_new(2).unwrap_or_default()))
        .set_data_page_size_limit(256 * 1024)
        .set_max_row_group_size(row_group_size)
        .set_dictionary_page_size_limit(128 * 1024)
        .set_key_value_metadata(Some(metadata))
        .build()
}

/// Encode batches into one Parquet file
///
/// An empty batch list still produces a valid file carrying `schema` and
/// zero rows.
pub fn encode_parquet(
    schema: SchemaRef,
    batches: &[RecordBatch],
    row_group_size: usize,
) -> Result<EncodedParquet> {
    let mut sink = HashingBuffer::new();
    {
        let mut writer = ArrowWriter::try_new(&mut sink, schema, Some(writer_properties(row_group_size)))
            .map_err(|e| WriterError::schema(format!("unsupported column types: {}", e)))?;

        for batch in batches {
            writer
                .write(batch)
                .map_err(|e| WriterError::schema(format!("failed to encode batch: {}", e)))?;
        }
        writer
            .close()
            .map_err(|e| WriterError::schema(format!("failed to finish Parquet file: {}", e)))?;
    }

    Ok(sink.finish())
}
