//! File to tokens to syntax tree, with per-file logging context

mod error;
mod result;
mod validation;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileProcessingResult, FileProcessor};
use crate::grammar::ast::nodes::Node;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::syntax::JointParser;
use std::path::PathBuf;
use std::time::Instant;

/// Process a single file through the complete pipeline (file -> lexical -> syntax)
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting Joint file processing pipeline", "file" => file_path);

        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;
        run_stages(&file_result, config)
    })
}

/// Lex and parse source that has already been loaded
pub fn process_file_result(
    file_result: &FileProcessingResult,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let file_path = file_result.display_path();
    logging::with_file_context(PathBuf::from(&file_path), 0, || {
        run_stages(file_result, config)
    })
}

/// Lex and parse in-memory source labelled with `path`
pub fn process_source(source: &str, path: &str) -> Result<PipelineResult, PipelineError> {
    let file_result = FileProcessingResult::from_source(path, source);
    process_file_result(&file_result, &RuntimeConfig::default())
}

/// Tokenize and parse in-memory source without file context or metrics
pub fn parse_source(source: &str, path: &str) -> Result<Node, PipelineError> {
    let tokens = crate::lexical::tokenize(source, path)?;
    Ok(crate::syntax::parse_program(tokens)?)
}

fn run_stages(
    file_result: &FileProcessingResult,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();
    let file_path = file_result.display_path();

    // Stage 1: Lexical analysis
    let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
    let tokens = analyzer.tokenize_file_result(file_result)?;
    let lexical_metrics = analyzer.metrics().clone();

    // Stage 2: Syntax analysis
    let ast = JointParser::with_preferences(tokens.clone(), config.syntax.clone()).parse_program()?;

    let result = PipelineResult::new(
        tokens,
        ast,
        file_result.metadata.clone(),
        lexical_metrics,
        file_result.processing_duration + start_time.elapsed(),
    );
    result.log_success(&file_path);

    Ok(result)
}
