use mongodb::bson::Document;

/// Records per bulk insert unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Accumulates documents until the flush threshold is reached.
#[derive(Debug)]
pub(crate) struct Buffer {
    docs: Vec<Document>,
    capacity: usize,
}

impl Buffer {
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Buffer {
            docs: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a document, returning `true` once the buffer should be flushed.
    pub(crate) fn add(&mut self, doc: Document) -> bool {
        self.docs.push(doc);
        self.is_full()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.docs.len() >= self.capacity
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.docs.len()
    }

    pub(crate) fn as_slice(&self) -> &[Document] {
        &self.docs
    }

    pub(crate) fn clear(&mut self) {
        self.docs.clear();
    }
}
