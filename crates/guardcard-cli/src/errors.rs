use console::style;
use guardcard_core::GuardCardError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// No origin could be established for a nearby search
pub fn location_unavailable(reason: &str) -> CliError {
    CliError::new("Location unavailable")
        .with_context(format!(
            "Could not determine where to search from.\n\nReason: {}",
            reason
        ))
        .with_suggestion("Pass your coordinates: guardcard nearby --lat 34.05 --lng -118.24")
        .with_suggestion("Or drop --no-fallback to search from the default region")
        .with_help("Run: guardcard nearby --help")
}

/// A coordinate given on the command line is not a valid WGS 84 position
pub fn invalid_coordinate(err: &GuardCardError) -> CliError {
    CliError::new("Invalid coordinate")
        .with_context(err.to_string())
        .with_suggestion("Latitude must be between -90 and 90")
        .with_suggestion("Longitude must be between -180 and 180 (negative for California)")
        .with_help("Run: guardcard nearby --help")
}

/// A --radius value that is not a positive number of miles
pub fn invalid_radius(err: &GuardCardError) -> CliError {
    CliError::new("Invalid search radius")
        .with_context(err.to_string())
        .with_suggestion("Pass a positive number of miles, e.g. --radius 25")
        .with_suggestion("Or omit --radius to use the configured radius")
        .with_help("Run: guardcard nearby --help")
}

/// Unknown quiz category id
pub fn quiz_not_found(id: &str, available: &[&str]) -> CliError {
    CliError::new(format!("Quiz not found: {}", id))
        .with_context(format!("Available quizzes: {}", available.join(", ")))
        .with_suggestion("List quizzes: guardcard quiz list")
        .with_help("Run: guardcard quiz take --help")
}

/// Answers supplied with --answers do not fit the quiz
pub fn invalid_answers(category: &str, reason: impl fmt::Display) -> CliError {
    CliError::new(format!("Invalid answers for quiz {}", category))
        .with_context(reason.to_string())
        .with_suggestion("Give one --answers list per quiz, e.g. --answers 2,1,3,1")
        .with_suggestion("Choices are numbered from 1")
        .with_suggestion("Or omit --answers to answer interactively")
        .with_help("Run: guardcard quiz take --help")
}
