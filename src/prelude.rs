pub use crate::config::Config;
pub use crate::error::{LoadError, ParseError};
pub use crate::parser::{parse_line, RecordReader};
pub use crate::query::{count_by, customers_above, run_queries, GroupCount};
pub use crate::schema::{FieldType, RecordKind, Schema};
pub use crate::{collection, connect, DocumentSink, LoadSummary, MongoLoader, WriteMode};
