//! # extract-runner
//!
//! Command-line front end for the extraction runner: loads the job from a
//! YAML/JSON file and/or flags, then prints run events until the job finishes
//! or Ctrl-C stops it.

use clap::Parser;
use extract_runner::application::events::{EventSink, RunEvent};
use extract_runner::application::job_runner::{JobRunner, JobState};
use extract_runner::config::{AppConfig, CliArgs};
use extract_runner::domain::endpoint::ResolvedEndpoint;
use extract_runner::infrastructure::firebird::firebird_data_source::FirebirdDataSource;
use extract_runner::infrastructure::local_storage::local_result_writer::LocalResultWriter;
use extract_runner::ports::data_source_port::DataSourcePort;
use log::{error, info};
use std::process;
use std::sync::Arc;

fn main() {
    // 1. Initialize Logging
    env_logger::init();

    // 2. Parse Arguments
    let args = CliArgs::parse();

    // 3. Load Config (file first, CLI overrides on top)
    let config = match AppConfig::load(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {}", e);
            process::exit(1);
        }
    };

    let data_source_config = config.data_source();
    if let Err(e) = data_source_config.validate() {
        error!("Invalid configuration: {}", e);
        process::exit(1);
    }

    let data_source = Arc::new(FirebirdDataSource::new());

    // 4. Connection check only
    if args.test_connection {
        let endpoint = ResolvedEndpoint::resolve(&data_source_config.address, &data_source_config.port);
        match data_source.test_connection(&endpoint, &data_source_config.credentials()) {
            Ok(_) => {
                println!("Connection to {} succeeded.", endpoint);
                return;
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    let job = match config.extraction_job() {
        Ok(j) => j,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    // 5. Build the runner
    let (events, rx) = EventSink::channel();
    let runner = match JobRunner::new(
        data_source_config,
        job,
        data_source,
        Arc::new(LocalResultWriter::new()),
        events,
    ) {
        Ok(r) => Arc::new(r),
        // Already reported through the event sink.
        Err(_) => process::exit(1),
    };

    let stopper = Arc::clone(&runner);
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, stopping job...");
        stopper.stop();
    }) {
        error!("Failed to install Ctrl+C handler: {}", e);
    }

    // 6. Run and render events until the worker reports completion
    if let Err(e) = runner.start() {
        error!("Failed to start job: {}", e);
        process::exit(1);
    }

    for event in rx.iter() {
        match event {
            RunEvent::Finished(_) => break,
            line => println!("{}", line),
        }
    }
    runner.join();

    match runner.state() {
        JobState::Failed => process::exit(1),
        state => info!("Job ended in state {}", state),
    }
}
