//! JSON bodies shared by every response helper.

use serde::{Deserialize, Serialize};

/// Error code for fingerprinted server failures.
pub const CODE_SERVER: &str = "server";
/// Error code for query string binding failures.
pub const CODE_INPUT_QUERY: &str = "input:query";
/// Error code for path parameter binding failures.
pub const CODE_INPUT_URI: &str = "input:uri";
/// Error code for request body binding failures.
pub const CODE_INPUT_BODY: &str = "input:body";

/// `{code, message}` body of client-error responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// `{data, total}` body of paged responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedBody<T> {
    pub data: T,
    pub total: u64,
}

/// `{msg}` body of the low-level status responses (400, 401, 403, 500).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBody {
    pub msg: String,
}

impl MsgBody {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}
