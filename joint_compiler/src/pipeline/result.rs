use crate::file_processor::FileMetadata;
use crate::grammar::ast::nodes::Node;
use crate::lexical::LexicalMetrics;
use crate::tokens::TokenStream;
use std::time::Duration;

/// Everything one file produced on its way through the pipeline
#[derive(Debug)]
pub struct PipelineResult {
    pub tokens: TokenStream,
    pub ast: Node,
    pub file_metadata: FileMetadata,
    pub lexical_metrics: LexicalMetrics,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        tokens: TokenStream,
        ast: Node,
        file_metadata: FileMetadata,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            tokens,
            ast,
            file_metadata,
            lexical_metrics,
            processing_duration,
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn statement_count(&self) -> usize {
        self.ast.children_named("body").count()
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64().max(f64::EPSILON);
        crate::log_success!(
            crate::logging::codes::success::AST_CONSTRUCTION_COMPLETE,
            "Joint file processing pipeline succeeded",
            "file" => file_path,
            "statements" => self.statement_count(),
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "processing_rate_bytes_per_sec" => format!("{:.0}",
                self.file_metadata.size as f64 / seconds),
            "processing_rate_tokens_per_sec" => format!("{:.0}",
                self.token_count() as f64 / seconds)
        );
    }
}
