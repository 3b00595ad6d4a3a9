//! Schema-less record used by the CLI.

use pocketbase_core::{FieldSpec, Record, RecordMeta};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Any record: the shared metadata plus whatever fields the server sends.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnyRecord {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record for AnyRecord {
    fn fields() -> &'static [FieldSpec] {
        &[]
    }

    fn meta(&self) -> &RecordMeta {
        &self.meta
    }
}
