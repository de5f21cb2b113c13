#![deny(clippy::all)]

mod buffer;
pub mod config;
pub mod conversion;
pub mod error;
pub mod parser;
pub mod prelude;
pub mod query;
pub mod schema;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::buffer::*;
pub use crate::buffer::DEFAULT_BATCH_SIZE;
use crate::error::{LoadError, Result};
use crate::parser::RecordReader;
use crate::schema::RecordKind;

use log::{debug, info};
use mongodb::{
    bson::Document,
    options::InsertManyOptions,
    sync::{Client, Collection, Database},
};

/// Whether documents of one bulk insert must be applied in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// A failed insert does not stop its siblings; no ordering between them.
    #[default]
    Unordered,
    /// Stop the batch at the first failed insert.
    Ordered,
}

impl WriteMode {
    pub fn is_ordered(self) -> bool {
        matches!(self, WriteMode::Ordered)
    }
}

/// Destination of a full-replace load.
pub trait DocumentSink {
    /// Destroy everything previously written.
    fn reset(&mut self) -> Result<()>;

    /// Submit one bulk insert, returning the number of documents accepted.
    fn insert_batch(&mut self, batch: &[Document], mode: WriteMode) -> Result<u64>;
}

impl DocumentSink for Collection<Document> {
    fn reset(&mut self) -> Result<()> {
        Collection::drop(self, None)?;
        Ok(())
    }

    fn insert_batch(&mut self, batch: &[Document], mode: WriteMode) -> Result<u64> {
        let mut options = InsertManyOptions::default();
        options.ordered = Some(mode.is_ordered());
        let res = self.insert_many(batch, Some(options))?;
        Ok(res.inserted_ids.len() as u64)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records parsed and submitted.
    pub records: usize,
    /// Bulk inserts issued.
    pub batches: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct MongoLoader {
    pub batch_size: usize,
    pub write_mode: WriteMode,
}

impl Default for MongoLoader {
    fn default() -> Self {
        MongoLoader {
            batch_size: DEFAULT_BATCH_SIZE,
            write_mode: WriteMode::default(),
        }
    }
}

impl MongoLoader {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Replace the sink's contents with the records read from `reader`.
    ///
    /// The sink is reset before the first line is read. Any parse or write
    /// failure aborts the load; batches submitted before it stay visible.
    pub fn load<R, S>(&self, kind: RecordKind, reader: R, sink: &mut S) -> Result<LoadSummary>
    where
        R: BufRead,
        S: DocumentSink + ?Sized,
    {
        sink.reset()?;

        let mut buffer = Buffer::new(self.batch_size);
        let mut summary = LoadSummary::default();

        for doc in RecordReader::new(kind, reader) {
            if buffer.add(doc?) {
                self.flush(kind, &mut buffer, sink, &mut summary)?;
            }
        }
        if !buffer.is_empty() {
            self.flush(kind, &mut buffer, sink, &mut summary)?;
        }

        info!(
            "loaded {} {} records in {} batches",
            summary.records, kind, summary.batches
        );
        Ok(summary)
    }

    pub fn load_file<S>(&self, kind: RecordKind, path: &Path, sink: &mut S) -> Result<LoadSummary>
    where
        S: DocumentSink + ?Sized,
    {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loading {} from {}", kind, path.display());
        self.load(kind, BufReader::new(file), sink)
    }

    fn flush<S>(
        &self,
        kind: RecordKind,
        buffer: &mut Buffer,
        sink: &mut S,
        summary: &mut LoadSummary,
    ) -> Result<()>
    where
        S: DocumentSink + ?Sized,
    {
        let accepted = sink.insert_batch(buffer.as_slice(), self.write_mode)?;
        summary.records += buffer.len();
        summary.batches += 1;
        debug!(
            "{}: batch {} inserted {} documents ({} total)",
            kind, summary.batches, accepted, summary.records
        );
        buffer.clear();
        Ok(())
    }
}

/// Open a client for `connection_str`. The handle is released when dropped.
pub fn connect(connection_str: &str) -> Result<Client> {
    Ok(Client::with_uri_str(connection_str)?)
}

pub fn collection(db: &Database, kind: RecordKind) -> Collection<Document> {
    db.collection::<Document>(kind.collection_name())
}
