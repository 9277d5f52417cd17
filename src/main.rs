use colored::Colorize;
use react_runtime::agent::{ReactAgent, RunOutcome};
use react_runtime::config::{LlmConfig, ReactConfig, load_dotenv};
use react_runtime::model::OpenAiClient;
use react_runtime::tools::search::SEARCH_DESCRIPTION;
use react_runtime::tools::{SearchTool, ToolRegistry};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if question.trim().is_empty() {
        eprintln!("usage: react-runtime <question>");
        return ExitCode::FAILURE;
    }

    load_dotenv();

    let agent = match build_agent() {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };

    let report = agent.run_detailed(&question);
    println!("--- STEPS ---\n{:#?}", report.steps);

    match report.outcome {
        RunOutcome::Done { answer } => {
            println!("{} {}", "Final answer:".green().bold(), answer);
            ExitCode::SUCCESS
        }
        RunOutcome::Aborted(reason) => {
            println!("{} {}", "No answer produced:".red().bold(), reason);
            ExitCode::FAILURE
        }
        RunOutcome::Exhausted => {
            println!(
                "{} reached the step limit of {}",
                "No answer produced:".yellow().bold(),
                agent.config().max_steps
            );
            ExitCode::FAILURE
        }
    }
}

fn build_agent() -> Result<ReactAgent<OpenAiClient>, Box<dyn std::error::Error>> {
    let llm = OpenAiClient::new(LlmConfig::from_env()?)?;
    let tools = ToolRegistry::new().with_tool("Search", SEARCH_DESCRIPTION, SearchTool::from_env()?);
    Ok(ReactAgent::new(llm, tools, ReactConfig::default())?)
}
