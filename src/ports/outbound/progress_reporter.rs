/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts operator diagnostics (e.g. to stderr) so the
/// extraction and merge passes stay testable without capturing console
/// output. Data output (CSV) never goes through this interface.
pub trait ProgressReporter {
    /// Reports a progress message
    ///
    /// # Arguments
    /// * `message` - The progress message to report
    fn report(&self, message: &str);

    /// Reports row-streaming progress at a periodic cadence
    ///
    /// The total row count is unknown while streaming, so this reports
    /// an absolute position rather than a percentage.
    ///
    /// # Arguments
    /// * `rows` - Number of rows processed so far
    /// * `message` - Detail line (counts, elapsed time)
    fn report_rows(&self, rows: u64, message: &str);

    /// Reports an error or warning message
    ///
    /// # Arguments
    /// * `message` - The error/warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
