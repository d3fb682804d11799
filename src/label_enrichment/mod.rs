/// Label enrichment - core domain of the report pipeline
///
/// This module contains the pure business logic for extracting a
/// per-image label attribute from a scan report and joining it back
/// onto the report:
///
/// - **Domain** (`domain`): label blobs, dedup entries, the lookup table
/// - **Services** (`services`): the streaming extraction and merge passes
pub mod domain;
pub mod services;
