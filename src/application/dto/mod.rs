/// Data Transfer Objects for the application layer
///
/// Requests carry the file paths and column names a use case needs;
/// summaries carry the counters each stage returns instead of keeping
/// global state.
mod extract_request;
mod fetch_request;
mod merge_request;
mod summaries;

pub use extract_request::ExtractRequest;
pub use fetch_request::FetchRequest;
pub use merge_request::MergeRequest;
pub use summaries::{ExtractSummary, FetchSummary, MergeSummary};
