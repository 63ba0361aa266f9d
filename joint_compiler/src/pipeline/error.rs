use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::syntax::SyntaxError;
use crate::utils::{SourceMap, SourcePosition};

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Syntax analysis failed: {0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::LexicalAnalysis(error) => error.error_code(),
            Self::SyntaxAnalysis(error) => error.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Source position of the failure, for lexical and syntax errors
    pub fn position(&self) -> Option<&SourcePosition> {
        match self {
            Self::LexicalAnalysis(error) => error.position(),
            Self::SyntaxAnalysis(error) => error.position(),
            Self::FileProcessing(_) | Self::Pipeline { .. } => None,
        }
    }

    /// The stage error's own message, without the stage prefix
    pub fn stage_message(&self) -> String {
        match self {
            Self::FileProcessing(error) => error.to_string(),
            Self::LexicalAnalysis(error) => error.to_string(),
            Self::SyntaxAnalysis(error) => error.to_string(),
            Self::Pipeline { message } => message.clone(),
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// `error[CODE]: message`, followed by a caret excerpt when both a
    /// position and the source text are available
    pub fn render(&self, source: Option<&str>) -> String {
        let label = format!("error[{}]", self.error_code().as_str());
        let message = self.stage_message();

        match (self.position(), source) {
            (Some(position), Some(source)) => {
                SourceMap::new(source).format_diagnostic(&label, position, &message)
            }
            (Some(position), None) => format!("{}: {}\n  --> {}\n", label, message, position),
            (None, _) => format!("{}: {}\n", label, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::parse_source;
    use assert_matches::assert_matches;

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert_eq!(error.error_code().as_str(), "ERR001");
        assert!(error.position().is_none());
    }

    #[test]
    fn test_stage_codes_pass_through() {
        let error = parse_source("let x = 5;", "t.jnt").unwrap_err();
        assert_eq!(error.error_code().as_str(), "E040");
        assert_eq!(error.category(), "Syntax");
        assert_eq!(error.position().map(|p| p.offset), Some(5));

        let error = parse_source("\"open", "t.jnt").unwrap_err();
        assert_eq!(error.error_code().as_str(), "E021");
    }

    #[test]
    fn test_render_with_source() {
        let source = "f();\nfrom";
        let error = parse_source(source, "t.jnt").unwrap_err();
        let rendered = error.render(Some(source));

        assert!(rendered.starts_with("error[E042]: Unexpected keyword 'from'"));
        assert!(rendered.contains("--> t.jnt:2:1"));
        assert!(rendered.contains("2 | from"));
    }

    #[test]
    fn test_render_without_position() {
        let error = PipelineError::from(FileProcessorError::FileNotFound {
            path: "missing.jnt".to_string(),
        });
        assert!(error.render(None).starts_with("error[E005]: "));
    }
}
