use std::fmt::Display;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Note,
}

impl Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticLevel::Error => write!(f, "error"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Note => write!(f, "note"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub code: Option<String>,
    pub context: Option<String>,
    pub suggestion: Option<String>,
    pub documentation: Option<String>,
}

impl Diagnostic {
    pub fn error_from_string(message: String) -> Diagnostic {
        Diagnostic {
            level: DiagnosticLevel::Error,
            message,
            code: None,
            context: None,
            suggestion: None,
            documentation: None,
        }
    }

    pub fn warning_from_string(message: String) -> Diagnostic {
        Diagnostic {
            level: DiagnosticLevel::Warning,
            message,
            code: None,
            context: None,
            suggestion: None,
            documentation: None,
        }
    }

    pub fn note_from_string(message: String) -> Diagnostic {
        Diagnostic {
            level: DiagnosticLevel::Note,
            message,
            code: None,
            context: None,
            suggestion: None,
            documentation: None,
        }
    }

    // Builder methods
    pub fn error(message: impl Into<String>) -> Self {
        Self::error_from_string(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::warning_from_string(message.into())
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::note_from_string(message.into())
    }

    pub fn with_code(mut self, code: impl AsRef<str>) -> Self {
        self.code = Some(code.as_ref().to_string());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<String>) -> Self {
        self.documentation = Some(doc.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Warning)
    }

    pub fn is_note(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Note)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level_with_code = if let Some(code) = &self.code {
            format!("{}[{}]", self.level, code)
        } else {
            format!("{}", self.level)
        };
        write!(f, "{}: {}", level_with_code, self.message)?;
        if let Some(context) = &self.context {
            write!(f, " ({})", context)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\thint: {}", suggestion)?;
        }
        Ok(())
    }
}

impl From<Diagnostic> for String {
    fn from(diagnostic: Diagnostic) -> Self {
        diagnostic.to_string()
    }
}

impl From<String> for Diagnostic {
    fn from(message: String) -> Self {
        Diagnostic::error_from_string(message)
    }
}

impl From<&str> for Diagnostic {
    fn from(message: &str) -> Self {
        Diagnostic::error_from_string(message.to_string())
    }
}

impl From<std::io::Error> for Diagnostic {
    fn from(err: std::io::Error) -> Self {
        Diagnostic::error_from_string(err.to_string())
    }
}
