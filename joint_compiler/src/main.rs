use joint_compiler::config::runtime::RuntimeConfig;
use joint_compiler::file_processor::{FileProcessingResult, FileProcessor};
use joint_compiler::logging::{self, codes};
use joint_compiler::output::{self, OutputFormat};
use joint_compiler::{lexical, pipeline, PipelineError};
use std::env;
use std::path::Path;
use std::process::ExitCode;

const VERSION: &str = "0.1";
const USAGE: &str = "Usage: joint [OPTIONS] SOURCE_FILE";

/// Exit status for usage errors
const EXIT_USAGE: u8 = 2;
/// Exit status for file, lexical and syntax failures
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    Tokens,
    #[default]
    Ast,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    mode: Mode,
    format: OutputFormat,
    source_file: String,
    config_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum UsageError {
    #[error("missing SOURCE_FILE")]
    MissingSource,

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("unexpected argument '{0}'")]
    ExtraArgument(String),

    #[error("option '--config' requires a file path")]
    MissingConfigPath,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("joint {}", VERSION);
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            eprintln!("joint: {}", error);
            eprintln!("{}", USAGE);
            eprintln!("Try 'joint --help' for more information.");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&options) {
        Ok(rendered) => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(diagnostic) => {
            eprint!("{}", diagnostic);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut mode = Mode::default();
    let mut format = OutputFormat::default();
    let mut source_file = None;
    let mut config_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-t" | "--tokens" => mode = Mode::Tokens,
            "-a" | "--ast" => mode = Mode::Ast,
            "-j" | "--json" => format = OutputFormat::Json,
            "-c" | "--config" => {
                let path = iter.next().ok_or(UsageError::MissingConfigPath)?;
                config_path = Some(path.clone());
            }
            // A lone dash names standard input
            "-" => set_source(&mut source_file, arg)?,
            option if option.starts_with('-') => {
                return Err(UsageError::UnknownOption(option.to_string()))
            }
            _ => set_source(&mut source_file, arg)?,
        }
    }

    let source_file = source_file.ok_or(UsageError::MissingSource)?;
    Ok(Command::Run(Options {
        mode,
        format,
        source_file,
        config_path,
    }))
}

fn set_source(source_file: &mut Option<String>, arg: &str) -> Result<(), UsageError> {
    if source_file.is_some() {
        return Err(UsageError::ExtraArgument(arg.to_string()));
    }
    *source_file = Some(arg.to_string());
    Ok(())
}

fn print_help() {
    println!("joint {}", VERSION);
    println!("Tokenizer and parser front end for the Joint language");
    println!();
    println!("USAGE:");
    println!("    joint [OPTIONS] SOURCE_FILE");
    println!();
    println!("ARGUMENTS:");
    println!("    SOURCE_FILE    Joint source file to read, or '-' for standard input");
    println!();
    println!("OPTIONS:");
    println!("    -t, --tokens         Print the token stream and exit");
    println!("    -a, --ast            Print the syntax tree and exit (default)");
    println!("    -j, --json           Print JSON instead of the text format");
    println!("    -c, --config FILE    Load runtime preferences from a TOML file");
    println!("    -h, --help           Show this help message");
    println!("    -V, --version        Show version information");
    println!();
    println!("EXIT STATUS:");
    println!("    0    Success");
    println!("    1    The file could not be read, tokenized or parsed");
    println!("    2    Invalid command line");
}

/// Render the requested output, or the diagnostic to print on failure
fn run(options: &Options) -> Result<String, String> {
    let config = load_config(options.config_path.as_deref())?;

    if let Err(message) = logging::init_global_logging() {
        return Err(system_error(codes::system::INITIALIZATION_FAILURE, &message));
    }
    if let Err(message) = pipeline::validate_pipeline() {
        return Err(system_error(codes::system::INITIALIZATION_FAILURE, &message));
    }

    let file_result = FileProcessor::from_preferences(&config.file_processor)
        .process_file(&options.source_file)
        .map_err(|error| PipelineError::from(error).render(None))?;

    let rendered = match options.mode {
        Mode::Tokens => print_tokens(&file_result, &config, options.format),
        Mode::Ast => print_tree(&file_result, &config, options.format),
    };

    // The rendered diagnostic already covers the default quiet mode
    if logging::config::use_console_logging() && logging::get_processing_summary().has_errors() {
        logging::print_cargo_style_summary();
    }

    rendered
}

fn load_config(path: Option<&str>) -> Result<RuntimeConfig, String> {
    let Some(path) = path else {
        return Ok(RuntimeConfig::default());
    };

    let config = RuntimeConfig::load(Path::new(path))
        .map_err(|error| system_error(codes::system::CONFIGURATION_ERROR, &error.to_string()))?;

    logging::config::init_runtime_preferences(config.logging.clone())
        .map_err(|message| system_error(codes::system::CONFIGURATION_ERROR, &message))?;

    Ok(config)
}

fn print_tokens(
    file_result: &FileProcessingResult,
    config: &RuntimeConfig,
    format: OutputFormat,
) -> Result<String, String> {
    let tokens =
        lexical::tokenize_file_result_with_preferences(file_result, config.lexical.clone())
            .map_err(|error| PipelineError::from(error).render(Some(&file_result.source)))?;

    output::render_tokens(&tokens, format)
        .map_err(|error| system_error(codes::system::INTERNAL_ERROR, &error.to_string()))
}

fn print_tree(
    file_result: &FileProcessingResult,
    config: &RuntimeConfig,
    format: OutputFormat,
) -> Result<String, String> {
    let result = pipeline::process_file_result(file_result, config)
        .map_err(|error| error.render(Some(&file_result.source)))?;

    output::render_tree(&result.ast, format)
        .map_err(|error| system_error(codes::system::INTERNAL_ERROR, &error.to_string()))
}

fn system_error(code: codes::Code, message: &str) -> String {
    format!("error[{}]: {}\n", code.as_str(), message)
}
