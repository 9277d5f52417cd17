// src/memory/mod.rs

use tracing::debug;

const EXECUTION_HEADER: &str = "--- Previous attempt ---";
const REFLECTION_HEADER: &str = "--- Reviewer feedback ---";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Execution,
    Reflection,
}

/// One immutable trajectory entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    kind: RecordKind,
    content: String,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A trait for agent memory holding the ordered trajectory of a run.
pub trait Memory {
    fn add_record(&mut self, kind: RecordKind, content: &str);
    fn records(&self) -> &[Record];

    /// Renders every record, oldest first, as a labeled block. Blocks are
    /// separated by one blank line.
    fn serialize(&self) -> String {
        self.records()
            .iter()
            .map(|record| {
                let header = match record.kind {
                    RecordKind::Execution => EXECUTION_HEADER,
                    RecordKind::Reflection => REFLECTION_HEADER,
                };
                format!("{}\n{}", header, record.content)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Content of the most recent execution record.
    fn last_execution(&self) -> Option<&str> {
        self.records()
            .iter()
            .rev()
            .find(|record| record.kind == RecordKind::Execution)
            .map(Record::content)
    }
}

/// In-memory trajectory, owned by a single run.
#[derive(Default, Debug, Clone)]
pub struct Trajectory {
    records: Vec<Record>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Memory for Trajectory {
    fn add_record(&mut self, kind: RecordKind, content: &str) {
        self.records.push(Record {
            kind,
            content: content.to_string(),
        });
        debug!(?kind, len = self.records.len(), "memory updated");
    }

    fn records(&self) -> &[Record] {
        &self.records
    }
}
