// Resume-to-job matching: PDF text extraction → naive Bayes category classifier →
// probability of the job's title category.
// Extraction and inference are blocking; async callers go through SimilarityScorer,
// which runs both under tokio::task::spawn_blocking.

pub mod classifier;
pub mod extractor;
pub mod handlers;
pub mod records;
pub mod scorer;

pub use classifier::NaiveBayesClassifier;
pub use extractor::PdfTextExtractor;
pub use records::PgRecordStore;
pub use scorer::SimilarityScorer;

#[cfg(test)]
pub mod testing;
