use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid preferences: {message}")]
    InvalidPreferences { message: String },

    #[error("No {diet_type} meals left after excluding allergens [{allergens}]")]
    ConstraintExhaustion { diet_type: String, allergens: String },

    #[error("Export '{channel}' failed: {message}")]
    ExportError { channel: String, message: String },

    #[error("Input stream closed before the questionnaire finished")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Constraint,
    Export,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::CatalogError { .. }
            | PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlannerError::InvalidPreferences { .. } | PlannerError::ConstraintExhaustion { .. } => {
                ErrorCategory::Constraint
            }
            PlannerError::ExportError { .. }
            | PlannerError::ZipError(_)
            | PlannerError::CsvError(_)
            | PlannerError::SerializationError(_) => ErrorCategory::Export,
            PlannerError::InputClosed => ErrorCategory::Input,
            PlannerError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Constraint => ErrorSeverity::Low,
            ErrorCategory::Export | ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::CatalogError { .. } => {
                "Check that the catalog file exists and has the columns Type, Main Ingredient, SKU, Carbohydrate (%), Protein (%), Fat (%)"
            }
            PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file"
            }
            PlannerError::InvalidPreferences { .. } => "Pick an ending date after the starting date",
            PlannerError::ConstraintExhaustion { .. } => {
                "Choose a different meal type or remove some allergies"
            }
            PlannerError::ExportError { .. } => {
                "Make sure the output directory is writable and that pdflatex is installed"
            }
            PlannerError::ZipError(_) | PlannerError::CsvError(_) | PlannerError::SerializationError(_) => {
                "Retry the export; the meal plan itself is unaffected"
            }
            PlannerError::IoError(_) => "Check file permissions and available disk space",
            PlannerError::InputClosed => "Run the planner again in an interactive terminal",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::CatalogError { message } => {
                format!("The meal dataset could not be loaded: {}", message)
            }
            PlannerError::ConstraintExhaustion { .. } => {
                "Not enough meals in the dataset to generate a meal plan. Our fault!".to_string()
            }
            PlannerError::ExportError { channel, .. } => {
                format!("An error has occurred while generating the {} export", channel)
            }
            PlannerError::InputClosed => "Input ended before all questions were answered".to_string(),
            other => other.to_string(),
        }
    }

    pub fn export(channel: &str, err: impl std::fmt::Display) -> Self {
        PlannerError::ExportError {
            channel: channel.to_string(),
            message: err.to_string(),
        }
    }
}
