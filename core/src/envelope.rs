use serde::{Deserialize, Serialize};

/// `code` value the backend uses for a successful call.
pub const SUCCESS_CODE: &str = "1";

/// The `{code, msg, result}` wrapper every backend response follows.
///
/// `result` only carries meaning when [`Envelope::is_success`] holds. The
/// gateway returns 2xx envelopes as-is and never inspects `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    pub result: T,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// The payload when `code` reports success, otherwise `msg`.
    pub fn into_result(self) -> Result<T, String> {
        if self.is_success() {
            Ok(self.result)
        } else {
            Err(self.msg)
        }
    }
}
