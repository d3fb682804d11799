mod reporting_client;

pub use reporting_client::HttpReportingClient;
