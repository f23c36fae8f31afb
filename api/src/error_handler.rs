use thiserror::Error;

/// Startup and server-loop errors.
///
/// Request handling never fails: every `/answer` outcome is a 200 body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnv {
        var: &'static str,
        reason: &'static str,
    },

    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),
}
