//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const TOO_MANY_LINES: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_CHARACTER_LITERAL: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const COMMENT_TOO_LONG: Code = Code::new("E025");
    pub const TOO_MANY_TOKENS: Code = Code::new("E026");
    pub const INVALID_TOKEN_STREAM: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E040");
    pub const EXPECTED_PRIMARY_EXPRESSION: Code = Code::new("E041");
    pub const UNEXPECTED_KEYWORD: Code = Code::new("E042");
    pub const INVALID_LITERAL: Code = Code::new("E043");
    pub const CALL_CHAIN_TOO_DEEP: Code = Code::new("E044");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E045");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");

    // Lexical success codes
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Syntax success codes
    pub const AST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTERED_CODES: &[ErrorMetadata] = &[
    // System errors
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal system error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging or runtime initialization failed",
        "Check the logging configuration and environment variables",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix the configuration file named in the message",
    ),
    // File processing errors
    ErrorMetadata::new(
        "E005",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "Source file not found",
        "Check the path and that the file exists",
    ),
    ErrorMetadata::new(
        "E006",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Source file does not have the .jnt extension",
        "Rename the file or unset JOINT_REQUIRE_JNT_EXTENSION",
    ),
    ErrorMetadata::new(
        "E007",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "Source file exceeds the maximum allowed size",
        "Split the source or rebuild with a larger max_file_size",
    ),
    ErrorMetadata::new(
        "E008",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "Source file exceeds the maximum line count",
        "Split the source or rebuild with a larger max_line_count",
    ),
    ErrorMetadata::new(
        "E009",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "Permission denied reading source file",
        "Check file permissions",
    ),
    ErrorMetadata::new(
        "E010",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "Source file is not valid UTF-8",
        "Re-encode the file as UTF-8",
    ),
    ErrorMetadata::new(
        "E011",
        "FileProcessing",
        Severity::High,
        false,
        false,
        "I/O error reading source file",
        "Check disk health and retry",
    ),
    ErrorMetadata::new(
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        false,
        "Source path is empty or not a regular file",
        "Pass the path of a regular file or '-' for standard input",
    ),
    // Lexical errors
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::High,
        false,
        false,
        "No token starts with this character",
        "Remove the character or replace it with valid punctuation",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        false,
        "String literal is not terminated",
        "Add the closing double quote",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::High,
        false,
        false,
        "Character literal must hold exactly one character",
        "Write character literals as 'c'",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::Medium,
        false,
        false,
        "Identifier exceeds the maximum length",
        "Shorten the identifier",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::Medium,
        false,
        false,
        "String literal exceeds the maximum size",
        "Shorten the string literal",
    ),
    ErrorMetadata::new(
        "E025",
        "Lexical",
        Severity::Low,
        false,
        false,
        "Comment exceeds the maximum length",
        "Split the comment over several lines",
    ),
    ErrorMetadata::new(
        "E026",
        "Lexical",
        Severity::High,
        false,
        true,
        "Source produces more tokens than allowed",
        "Split the source into smaller files",
    ),
    ErrorMetadata::new(
        "E027",
        "Lexical",
        Severity::Critical,
        false,
        true,
        "Token stream violates the end-of-input invariant",
        "File a bug report; the tokenizer produced an invalid stream",
    ),
    // Syntax errors
    ErrorMetadata::new(
        "E040",
        "Syntax",
        Severity::High,
        false,
        false,
        "Unexpected token",
        "Check the statement against the grammar near the reported position",
    ),
    ErrorMetadata::new(
        "E041",
        "Syntax",
        Severity::High,
        false,
        false,
        "Expected an identifier or literal",
        "Supply an identifier, number, boolean, character, string or null",
    ),
    ErrorMetadata::new(
        "E042",
        "Syntax",
        Severity::High,
        false,
        false,
        "Keyword cannot start a statement",
        "Start statements with 'let', 'import' or an expression",
    ),
    ErrorMetadata::new(
        "E043",
        "Syntax",
        Severity::High,
        false,
        false,
        "Literal value could not be decoded",
        "Check the literal's spelling",
    ),
    ErrorMetadata::new(
        "E044",
        "Syntax",
        Severity::Medium,
        false,
        false,
        "Call chain exceeds the maximum depth",
        "Break the chained calls into separate statements",
    ),
    ErrorMetadata::new(
        "E045",
        "Syntax",
        Severity::Critical,
        false,
        true,
        "Internal parser error",
        "File a bug report with the input that triggered it",
    ),
    // Success codes
    ErrorMetadata::new(
        "I001",
        "Success",
        Severity::Low,
        true,
        false,
        "Operation completed successfully",
        "No action required",
    ),
    ErrorMetadata::new(
        "I004",
        "Success",
        Severity::Low,
        true,
        false,
        "System initialization completed",
        "No action required",
    ),
    ErrorMetadata::new(
        "I006",
        "Success",
        Severity::Low,
        true,
        false,
        "Source file read successfully",
        "Continue to tokenization",
    ),
    ErrorMetadata::new(
        "I007",
        "Success",
        Severity::Low,
        true,
        false,
        "Source file validation passed",
        "Continue to reading",
    ),
    ErrorMetadata::new(
        "I020",
        "Success",
        Severity::Low,
        true,
        false,
        "Tokenization completed",
        "Continue to parsing",
    ),
    ErrorMetadata::new(
        "I040",
        "Success",
        Severity::Low,
        true,
        false,
        "AST construction completed",
        "Tree is ready for consumers",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::with_capacity(REGISTERED_CODES.len());
        for metadata in REGISTERED_CODES {
            registry.insert(metadata.code, metadata.clone());
        }
        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_no_duplicate_codes() {
        let mut seen = std::collections::HashSet::new();
        for metadata in REGISTERED_CODES {
            assert!(seen.insert(metadata.code), "duplicate {}", metadata.code);
        }
    }

    #[test]
    fn test_every_constant_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::CONFIGURATION_ERROR,
            file_processing::FILE_NOT_FOUND,
            file_processing::INVALID_EXTENSION,
            file_processing::FILE_TOO_LARGE,
            file_processing::TOO_MANY_LINES,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            lexical::INVALID_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::MALFORMED_CHARACTER_LITERAL,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::STRING_TOO_LARGE,
            lexical::COMMENT_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            lexical::INVALID_TOKEN_STREAM,
            syntax::UNEXPECTED_TOKEN,
            syntax::EXPECTED_PRIMARY_EXPRESSION,
            syntax::UNEXPECTED_KEYWORD,
            syntax::INVALID_LITERAL,
            syntax::CALL_CHAIN_TOO_DEEP,
            syntax::INTERNAL_PARSER_ERROR,
            success::OPERATION_COMPLETED_SUCCESSFULLY,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::FILE_VALIDATION_PASSED,
            success::TOKENIZATION_COMPLETE,
            success::AST_CONSTRUCTION_COMPLETE,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "{} missing from registry",
                code
            );
        }
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
    }

    #[test]
    fn test_classification_lookup() {
        assert_eq!(get_category("E020"), "Lexical");
        assert_eq!(get_category("E040"), "Syntax");
        assert!(requires_halt("E027"));
        assert_eq!(Severity::parse(get_severity("E005").as_str()), Some(Severity::High));
    }
}
