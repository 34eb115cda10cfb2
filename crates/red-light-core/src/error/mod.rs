use error_location::ErrorLocation;
use thiserror::Error;

/// Monitoring pipeline errors with source location tracking.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// No display could be enumerated for capture.
    #[error("No monitor found {location}")]
    NoMonitorFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Grabbing the screen contents failed.
    #[error("Screen capture failed: {reason} {location}")]
    CaptureFailed {
        /// Description of the capture failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Resizing or JPEG-encoding a captured frame failed.
    #[error("Frame encoding failed: {source} {location}")]
    EncodeFailed {
        /// Underlying error from the image crate.
        #[source]
        source: image::ImageError,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Building the HTTP client failed.
    #[error("HTTP client error: {source} {location}")]
    HttpClient {
        /// Underlying error from reqwest.
        #[source]
        source: reqwest::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The analysis request could not be completed.
    #[error("Analysis request failed: {reason} {location}")]
    AnalysisFailed {
        /// Description of the request failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`MonitorError`].
pub type Result<T> = std::result::Result<T, MonitorError>;
