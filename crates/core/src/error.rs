use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error(
        "Failed to read Azure profile at `{}`: {} (have you run `az login`?)",
        .path,
        .original
    )]
    ProfileUnreadable {
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Json {
        action: String,
        file_description: String,
        path: String,
        original: serde_json::Error,
    },

    #[error("Failed to parse Azure profile at `{}`: {}", .path, .reason)]
    MalformedProfile { path: String, reason: String },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),

    #[error("Subscription '{}' not found", .0)]
    SubscriptionNotFound(String),

    #[error("Alias '{}' not found", .0)]
    AliasNotFound(String),

    #[error("No previous subscription")]
    NoPreviousSubscription,

    #[error("No subscriptions found. Run `az login` first")]
    NoSubscriptions,

    #[error("Alias and subscription cannot be empty")]
    EmptyAlias,

    #[error("Subscription name cannot be empty")]
    EmptyTarget,

    #[error("Invalid alias format `{}`. Use: alias=subscription", .0)]
    InvalidAliasFormat(String),

    #[error("Failed to refresh: {} (is Azure CLI installed?)", .0)]
    RefreshFailed(std::io::Error),

    #[error("Failed to refresh: `az account list` exited with a non-success code.")]
    RefreshExit,
}

impl Error {
    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn json_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_json::Error,
    ) -> Self {
        Self::Json {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn malformed_profile(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedProfile {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
