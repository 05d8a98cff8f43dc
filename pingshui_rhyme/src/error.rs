// Load-time errors for the phonological resource.
//
// Building the rhyme table and tone sets is the only fallible step in the
// system; every lookup after that is total.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read rhyme resource {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON, or a document that is not nested exactly
    /// tone -> subgroup -> category -> character groups.
    #[error("malformed rhyme resource: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rhyme resource contains no characters")]
    Empty,
    #[error("{count} characters are listed under both ping and ze (e.g. {examples})")]
    Overlap { count: usize, examples: String },
}
