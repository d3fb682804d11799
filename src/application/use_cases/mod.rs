/// Use cases orchestrating the pipeline stages
///
/// Each stage is an independent, restartable operation; the extraction
/// and merge stages communicate only through the intermediate lookup
/// file, never in process.
mod extract_attribute;
mod fetch_report;
mod merge_report;

pub use extract_attribute::ExtractAttributeUseCase;
pub use fetch_report::FetchReportUseCase;
pub use merge_report::MergeReportUseCase;
