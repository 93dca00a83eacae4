/// The pipeline's final output: the untouched recognition text next to
/// the rewritten, term-substituted version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    pub raw: String,
    pub improved: String,
}
