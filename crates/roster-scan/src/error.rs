use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The end-of-run persist failed; results since the last good
    /// checkpoint exist only in memory.
    #[error("final checkpoint failed after {processed} resolved rows")]
    FinalCheckpoint {
        processed: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
