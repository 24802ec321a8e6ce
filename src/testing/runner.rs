//! Test runner implementation
//!
//! Executes the steps of a scenario one at a time and stops at the first
//! step that does not pass. Later steps are never sent.

use colored::Colorize;

use crate::common::{Error, Result};
use crate::rpc::Request;
use crate::transport::{Delivery, Transport};

use super::command;
use super::config::{TestScenario, TestStep};
use super::outcome::{StepOutcome, TestResult};

/// Output options for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print request bodies and raw responses
    pub verbose: bool,
    /// Print nothing but failures
    pub quiet: bool,
}

/// Run a scenario to completion or to its first failure
///
/// `transport` may be `None` when every step is a shell step.
pub async fn run_scenario(
    scenario: &TestScenario,
    transport: Option<&dyn Transport>,
    opts: &RunOptions,
) -> Result<TestResult> {
    let steps_total = scenario.steps.len();
    let target = transport.map(|transport| transport.describe());

    tracing::info!(
        scenario = %scenario.name,
        steps = steps_total,
        target = target.as_deref().unwrap_or("-"),
        "starting run"
    );

    if !opts.quiet {
        println!(
            "\n{} {}",
            "Running Test:".blue().bold(),
            scenario.name.white().bold()
        );
        if let Some(desc) = &scenario.description {
            println!("  {}", desc.dimmed());
        }
        if let Some(target) = &target {
            println!("  {} {}", "Target:".cyan(), target.dimmed());
        }
        println!("\n{}", "Steps:".cyan());
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        let step_num = i + 1;
        let outcome = execute_step(transport, step, opts).await?;

        if !outcome.is_passed() {
            tracing::warn!(step = step_num, label = step.label(), %outcome, "step failed");
            println!(
                "  {} Step {}: {}: {}",
                "✗".red(),
                step_num,
                step.label(),
                outcome
            );

            return Ok(TestResult {
                name: scenario.name.clone(),
                steps_run: step_num,
                steps_total,
                outcome,
                failed_step: Some(step.label().to_string()),
            });
        }

        if !opts.quiet {
            println!(
                "  {} Step {}: {}",
                "✓".green(),
                step_num,
                step.label().dimmed()
            );
        }
    }

    if !opts.quiet {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            "Test Passed".green().bold()
        );
    }

    Ok(TestResult {
        name: scenario.name.clone(),
        steps_run: steps_total,
        steps_total,
        outcome: StepOutcome::Passed,
        failed_step: None,
    })
}

/// Execute a single test step
async fn execute_step(
    transport: Option<&dyn Transport>,
    step: &TestStep,
    opts: &RunOptions,
) -> Result<StepOutcome> {
    let delivery = match step {
        TestStep::Call { method, params, id } => {
            let transport = transport.ok_or_else(|| {
                Error::Config(format!("Step '{}' needs a transport", method))
            })?;
            let request = Request::new(method.clone(), params.clone(), *id);
            if opts.verbose {
                println!("    {} {}", "→".dimmed(), request.to_body()?.dimmed());
            }
            transport.call(&request).await?
        }
        TestStep::Shell { command: line } => {
            if opts.verbose {
                println!("    {} {}", "$".dimmed(), line.dimmed());
            }
            command::execute(line).await?
        }
    };

    if opts.verbose {
        if let Delivery::Body(body) = &delivery {
            println!("    {} {}", "←".dimmed(), body.trim_end().dimmed());
        }
    }

    Ok(StepOutcome::from_delivery(delivery))
}

/// Scenario made of raw command lines, run in the order given
pub fn scenario_from_commands(commands: &[String]) -> TestScenario {
    TestScenario {
        name: "exec".to_string(),
        description: None,
        endpoint: None,
        steps: commands
            .iter()
            .map(|command| TestStep::Shell {
                command: command.clone(),
            })
            .collect(),
    }
}
