//! CSV to Parquet conversion with object storage upload
//!
//! Downloads a CSV from a signed URL, infers its schema with the Arrow CSV
//! reader, encodes a Parquet file in memory, and uploads it through a
//! per-invocation OpenDAL operator.

// Error variants carry the destination and source context
#![allow(clippy::result_large_err)]

mod convert;
mod decode;
mod encoding;
mod error;
mod job;
mod source;
mod storage;

pub use convert::{success_message, ConversionOutcome, Converter};
pub use decode::{decode_csv, DecodedCsv};
pub use encoding::{encode_parquet, EncodedParquet};
pub use error::{ErrorCode, Result, WriterError};
pub use job::{ConversionJob, Destination};
pub use source::strip_query;
pub use storage::StorageSession;
