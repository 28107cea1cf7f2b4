//! PressBook command-line entry point.
//!
//! # Responsibility
//! - Parse process flags and start core logging when a directory is given.
//! - Run a line-oriented loop over the core command layer.
//! - Print command results and the displayed person list; nothing else.

use clap::Parser;
use log::info;
use pressbook_core::{
    default_log_level, execute_line, init_logging, load_seed_file, parse_command, Command,
    Model, ModelManager, Person,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_WORDS: &[&str] = &["exit", "quit"];

#[derive(Debug, Parser)]
#[command(name = "pressbook", version, about = "Track contacts and the articles they appear in")]
struct Cli {
    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "PRESSBOOK_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "PRESSBOOK_LOG_DIR")]
    log_dir: Option<String>,

    /// JSON seed file with persons and articles.
    #[arg(long, env = "PRESSBOOK_SEED")]
    seed: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(&cli.log_level, log_dir) {
            eprintln!("pressbook: {err}");
            return ExitCode::FAILURE;
        }
    }

    let model = match cli.seed.as_ref() {
        Some(path) => match load_seed_file(path).and_then(ModelManager::from_seed) {
            Ok(model) => model,
            Err(err) => {
                eprintln!("pressbook: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => ModelManager::in_memory(),
    };

    match run(model, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pressbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut model: ModelManager, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
    info!("event=cli_start module=cli status=ok");
    writeln!(output, "pressbook {} (type `help`)", pressbook_core::core_version())?;
    render_person_list(&mut output, &model.filtered_person_list())?;

    write!(output, "> ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if EXIT_WORDS.contains(&trimmed) {
            break;
        }
        if !trimmed.is_empty() {
            let result = execute_line(&mut model, trimmed);
            writeln!(output, "{}", result.message)?;
            if result.success && changes_person_view(trimmed) {
                render_person_list(&mut output, &model.filtered_person_list())?;
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn changes_person_view(line: &str) -> bool {
    matches!(
        parse_command(line),
        Ok(Command::ListPersons
            | Command::FindPersons(_)
            | Command::LookupArticle(_)
            | Command::SetArticlePersons { .. })
    )
}

fn render_person_list(output: &mut impl Write, persons: &[Person]) -> io::Result<()> {
    if persons.is_empty() {
        return writeln!(output, "  (no persons shown)");
    }
    for (position, person) in persons.iter().enumerate() {
        writeln!(output, "  {}. {person}", position + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;
    use pressbook_core::{
        Address, Email, ModelManager, Name, Person, Phone,
    };
    use std::collections::BTreeSet;

    fn model() -> ModelManager {
        let mut model = ModelManager::in_memory();
        for (name, phone) in [("Alice", "111"), ("Bob", "222")] {
            model
                .add_person(Person::new(
                    Name::parse(name).unwrap(),
                    Phone::parse(phone).unwrap(),
                    Email::parse("someone@example.com").unwrap(),
                    Address::parse("1 Main St").unwrap(),
                    BTreeSet::new(),
                ))
                .unwrap();
        }
        model
    }

    #[test]
    fn loop_prints_results_and_stops_on_exit() {
        let input = "lookup 2\nlookup 3\nexit\nlookup 1\n";
        let mut output = Vec::new();
        run(model(), input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Lookup Person: Bob; Phone: 222"));
        assert!(text.contains("The person index provided is invalid"));
        assert!(!text.contains("Lookup Person: Alice"));
    }

    #[test]
    fn find_reprints_displayed_list() {
        let mut output = Vec::new();
        run(model(), "find bob\n".as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1 persons listed!\n  1. Bob; Phone: 222"));
    }
}
