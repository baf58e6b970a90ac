#![forbid(unsafe_code)]

mod prompt;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lpstudio_api::{Limits, LpSolver, Session};
use lpstudio_core::form::ProblemForm;
use lpstudio_core::format::{Locale, NumberFormat, PREFERRED_LOCALE};
use lpstudio_io::{read_json_form, write_json, write_result, EXAMPLE_FORM_JSON};
use prompt::{InputClosed, Prompter};
use render::{render_history, render_result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lpstudio")]
#[command(version, about = "Linear programming workbench with sensitivity analysis")]
struct Cli {
    #[arg(long)]
    log_json: bool,
    /// Locale for currency output; falls back to the environment when unavailable.
    #[arg(long, env = "LPSTUDIO_LOCALE", default_value = PREFERRED_LOCALE)]
    locale: String,
    #[command(flatten)]
    limits: LimitArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct LimitArgs {
    #[arg(long, default_value_t = 2)]
    min_variables: usize,
    #[arg(long, default_value_t = 4)]
    max_variables: usize,
    #[arg(long, default_value_t = 1)]
    min_constraints: usize,
    #[arg(long, default_value_t = 10)]
    max_constraints: usize,
    /// Number of history entries shown after each solve.
    #[arg(long = "history", default_value_t = 5)]
    history_display: usize,
}

impl LimitArgs {
    fn to_limits(&self) -> Result<Limits> {
        let limits = Limits {
            min_variables: self.min_variables,
            max_variables: self.max_variables,
            min_constraints: self.min_constraints,
            max_constraints: self.max_constraints,
            history_display: self.history_display,
        };
        limits.validate().context("invalid limits")?;
        Ok(limits)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem form stored as JSON.
    Solve {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    Check {
        #[arg(long)]
        problem: PathBuf,
    },
    /// Fill in the form on the terminal; this is the default.
    Interactive,
    /// Print a sample problem form.
    Example,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_json);
    let limits = cli.limits.to_limits()?;
    let format = NumberFormat::new(Locale::resolve(Some(cli.locale.as_str())));
    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Solve {
            problem,
            output,
            json,
        } => solve_command(problem, output, json, limits, &format),
        Commands::Check { problem } => check_command(problem, limits),
        Commands::Interactive => {
            let stdin = io::stdin();
            let prompter = Prompter::new(stdin.lock(), io::stdout());
            interactive_command(prompter, Session::new().limits(limits), &format)
        }
        Commands::Example => {
            println!("{}", EXAMPLE_FORM_JSON.trim());
            Ok(())
        }
    }
}

/// Installs the stderr subscriber; a second call keeps the first one.
fn initialize_tracing(log_json: bool) {
    if log_json {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .json()
            .try_init()
            .ok();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .try_init()
            .ok();
    }
}

fn solve_command(
    path: PathBuf,
    output: Option<PathBuf>,
    output_json: bool,
    limits: Limits,
    format: &NumberFormat,
) -> Result<()> {
    let form = read_json_form(&path)?;
    let mut session = Session::new().limits(limits);
    let entry = session.resolve(&form)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if output_json {
        write_json(&mut handle, entry.result())?;
    } else {
        render_result(&mut handle, entry.result(), format)?;
    }
    if let Some(path) = output {
        write_result(path, entry.result())?;
    }
    Ok(())
}

fn check_command(path: PathBuf, limits: Limits) -> Result<()> {
    let form = read_json_form(&path)?;
    limits.check(&form).context("problem is outside the limits")?;
    let program = lpstudio_api::from_form(&form)?;
    println!(
        "Problem validation succeeded: {} variables, {} constraints.",
        program.nvars(),
        program.nconstraints()
    );
    Ok(())
}

fn interactive_command<R, W, S>(
    mut prompter: Prompter<R, W>,
    mut session: Session<S>,
    format: &NumberFormat,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: LpSolver,
{
    match interactive_loop(&mut prompter, &mut session, format) {
        Err(err) if err.is::<InputClosed>() => {
            tracing::debug!(solves = session.history().len(), "input closed, leaving");
            writeln!(prompter.output())?;
            Ok(())
        }
        other => other,
    }
}

fn interactive_loop<R, W, S>(
    prompter: &mut Prompter<R, W>,
    session: &mut Session<S>,
    format: &NumberFormat,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: LpSolver,
{
    writeln!(
        prompter.output(),
        "Modelagem de Problemas de Programação Linear com Análise de Sensibilidade"
    )?;
    let mut form = ProblemForm::default();
    loop {
        form = prompter.ask_form(session.current_limits(), &form)?;
        let out = prompter.output();
        writeln!(out)?;
        match session.resolve(&form) {
            Ok(entry) => render_result(out, entry.result(), format)?,
            Err(err) => writeln!(out, "Problema inválido: {err}")?,
        }
        writeln!(out)?;
        render_history(out, &session.recent(), format)?;

        loop {
            let choice = prompter.ask_choice(
                "\n[r] resolver outro problema  [l] limpar histórico  [s] sair: ",
                &['r', 'l', 's'],
            )?;
            match choice {
                'l' => {
                    session.clear_history();
                    writeln!(prompter.output(), "Histórico limpo com sucesso!")?;
                }
                's' => return Ok(()),
                _ => break,
            }
        }
    }
}
