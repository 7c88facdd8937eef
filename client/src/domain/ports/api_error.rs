//! Error type shared by every REST gateway port.

use super::define_port_error;

define_port_error! {
    /// Failures raised by REST gateway adapters.
    ///
    /// The form pipelines never show these to the user; they only decide that
    /// a call failed. The variants exist for logs and for the dashboard.
    pub enum ApiError {
        /// The request could not be sent or the connection dropped.
        Transport {
            /// Detail for logs.
            message: String,
        } => "api transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout {
            /// Detail for logs.
            message: String,
        } => "api request timed out: {message}",
        /// The backend rejected the credentials or bearer token.
        Unauthorized {
            /// Detail for logs.
            message: String,
        } => "api rejected credentials: {message}",
        /// The backend answered with a non-success status.
        Status {
            /// HTTP status code.
            status: u16,
            /// Compact body preview.
            message: String,
        } => "api returned status {status}: {message}",
        /// The response body did not match the expected shape.
        Decode {
            /// Detail for logs.
            message: String,
        } => "api response could not be decoded: {message}",
        /// The request could not be built from the configured base URL.
        InvalidRequest {
            /// Detail for logs.
            message: String,
        } => "api request is invalid: {message}",
    }
}
