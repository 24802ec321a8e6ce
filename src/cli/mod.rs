//! CLI command handling
//!
//! Resolves configuration, builds the transport and hands scenarios to the
//! runner. Every command returns the process exit code.

use std::path::Path;

use colored::Colorize;

use crate::commands::{Commands, OutputArgs};
use crate::common::config::Config;
use crate::common::Result;
use crate::testing::{
    builtin, run_scenario, scenario_from_commands, RunOptions, TestResult, TestScenario, TestStep,
};
use crate::transport::{self, TransportSettings};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config_file: Option<&Path>) -> Result<i32> {
    match command {
        Commands::Run {
            scenario,
            endpoint,
            transport,
            client,
            timeout,
            output,
        } => {
            let config = load_config(config_file)?;
            let scenario = load_scenario(scenario.as_deref())?;

            let endpoint = endpoint
                .or_else(|| scenario.endpoint.clone())
                .unwrap_or_else(|| config.endpoint.url.clone());

            let mut settings = TransportSettings::from_config(&config, endpoint);
            if let Some(kind) = transport {
                settings.kind = kind;
            }
            if let Some(client) = client {
                settings.client = client;
            }
            if timeout.is_some() {
                settings.timeout_secs = timeout;
            }

            let transport = transport::build(&settings)?;
            let result =
                run_scenario(&scenario, Some(transport.as_ref()), &run_options(output)).await?;
            report(&result);
            Ok(result.exit_code())
        }

        Commands::Exec { commands, output } => {
            // Command lines name their own client and endpoint, so no config or transport
            let scenario = scenario_from_commands(&commands);
            let result = run_scenario(&scenario, None, &run_options(output)).await?;
            report(&result);
            Ok(result.exit_code())
        }

        Commands::List { scenario, json } => {
            let scenario = load_scenario(scenario.as_deref())?;
            print_scenario(&scenario, json)?;
            Ok(0)
        }
    }
}

fn load_config(config_file: Option<&Path>) -> Result<Config> {
    match config_file {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Load a scenario file, or the built-in list when none is given
fn load_scenario(path: Option<&Path>) -> Result<TestScenario> {
    match path {
        Some(path) => TestScenario::load(path),
        None => Ok(builtin::eth_smoke()),
    }
}

fn run_options(output: OutputArgs) -> RunOptions {
    RunOptions {
        verbose: output.verbose,
        quiet: output.quiet,
    }
}

/// Print the closing line for a failed run
fn report(result: &TestResult) {
    if result.passed() {
        return;
    }

    println!(
        "\n{} {} (step {}/{} {}, exit code {})\n",
        "✗".red().bold(),
        format!("Test Failed: {}", result.name).red().bold(),
        result.steps_run,
        result.steps_total,
        result.failed_step.as_deref().unwrap_or("?"),
        result.exit_code()
    );
}

fn print_scenario(scenario: &TestScenario, json: bool) -> Result<()> {
    if json {
        for step in &scenario.steps {
            match step.request() {
                Some(request) => println!("{}", request.to_body()?),
                None => println!("{}", serde_json::json!({ "command": step.label() })),
            }
        }
        return Ok(());
    }

    println!("{}", scenario.name);
    if let Some(desc) = &scenario.description {
        println!("  {}", desc);
    }
    for (i, step) in scenario.steps.iter().enumerate() {
        match step {
            TestStep::Call { method, params, id } => {
                println!("  {:>2}. {} {} (id {})", i + 1, method, params, id);
            }
            TestStep::Shell { command } => {
                println!("  {:>2}. $ {}", i + 1, command);
            }
        }
    }

    Ok(())
}
