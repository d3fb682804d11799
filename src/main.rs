use std::error::Error as _;
use std::path::Path;
use std::process;
use std::time::Duration;

use scan_enrich::cli::{Args, Command, ExtractArgs, FetchAction, FetchReportArgs, MergeArgs};
use scan_enrich::config::{self, ColumnSettings, ConfigFile, DEFAULT_JOB_NAME};
use scan_enrich::prelude::*;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .downcast_ref::<EnrichError>()
        .map(EnrichError::exit_code)
        .unwrap_or(ExitCode::ApplicationError)
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Extract(extract_args) => run_extract(extract_args),
        Command::Merge(merge_args) => run_merge(merge_args),
        Command::Fetch { action } => match action {
            FetchAction::List => run_fetch_list(),
            FetchAction::Report(fetch_args) => run_fetch_report(fetch_args),
        },
    }
}

/// Loads the column config file: an explicit --config path must exist,
/// while auto-discovery in the working directory is best-effort.
fn load_column_config(explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
    match explicit {
        Some(path) => config::load_config_from_path(path).map(Some),
        None => config::discover_config(Path::new(".")),
    }
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let file_config = load_column_config(args.config.as_deref())?;
    let columns = ColumnSettings::resolve(
        args.key_column,
        args.label_column,
        args.label_key,
        args.attribute_column,
        file_config.as_ref(),
    );

    let use_case =
        ExtractAttributeUseCase::new(CsvLookupStore::new(), StderrProgressReporter::new());
    let request = ExtractRequest::new(
        args.source,
        args.output,
        columns.key_column,
        columns.label_column,
        columns.label_key,
        columns.attribute_column,
        args.max_rows,
    );
    use_case.execute(request)?;
    Ok(())
}

fn run_merge(args: MergeArgs) -> Result<()> {
    let file_config = load_column_config(args.config.as_deref())?;
    let columns = ColumnSettings::resolve(
        args.key_column,
        None,
        None,
        args.attribute_column,
        file_config.as_ref(),
    );

    let use_case = MergeReportUseCase::new(CsvLookupStore::new(), StderrProgressReporter::new());
    let request = MergeRequest::new(
        args.source,
        args.lookup,
        args.output,
        columns.key_column,
        columns.attribute_column,
    );
    use_case.execute(request)?;
    Ok(())
}

fn build_fetch_use_case(
    api_config: &ApiConfig,
) -> Result<FetchReportUseCase<HttpReportingClient, StderrProgressReporter>> {
    let api = HttpReportingClient::new(&api_config.tenant, &api_config.api_key)?;
    Ok(FetchReportUseCase::new(
        api,
        GzipArtifactWriter::new(),
        StderrProgressReporter::new(),
        api_config.poll_interval,
        api_config.poll_timeout,
        api_config.timezone.clone(),
    ))
}

fn run_fetch_list() -> Result<()> {
    let api_config = ApiConfig::from_env()?;
    let use_case = build_fetch_use_case(&api_config)?;
    for definition in use_case.list()? {
        println!("ID: {}, Name: {}", definition.id, definition.name);
    }
    Ok(())
}

fn run_fetch_report(args: FetchReportArgs) -> Result<()> {
    let mut api_config = ApiConfig::from_env()?;
    if let Some(secs) = args.poll_interval_secs {
        api_config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = args.timeout_secs {
        api_config.poll_timeout = Duration::from_secs(secs);
    }

    let use_case = build_fetch_use_case(&api_config)?;
    let request = FetchRequest::new(
        args.id,
        args.window_hours,
        args.output,
        args.job_name.unwrap_or_else(|| DEFAULT_JOB_NAME.to_string()),
    );
    use_case.execute(request)?;
    Ok(())
}
