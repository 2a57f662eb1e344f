// Error reporter: explains a failed sizer response in plain text. Each
// status code the API documents maps to a title and a short explanation;
// anything else is reported as unknown. The server's own `error_message`
// is appended when the body carries one.

use log::warn;
use serde_json::Value;
use std::fmt;
use std::io::{self, Write};

pub const STATUS_DOCS_HINT: &str = "See https://developer.mozilla.org/en-US/docs/Web/HTTP/Status#server_error_responses for more information on HTML error codes.";
pub const NO_DETAIL_LINE: &str = "No additional information in the error response.";

/// What could be learned from the body of a failed response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorDetail {
    /// The body was JSON with an `error_message` field.
    Message(String),
    /// The body was JSON but had no `error_message`.
    NoMessage,
    /// The body was not JSON.
    ParseFailure,
}

impl ErrorDetail {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(json) => match json.get("error_message") {
                Some(Value::String(msg)) => ErrorDetail::Message(msg.clone()),
                Some(other) => ErrorDetail::Message(other.to_string()),
                None => ErrorDetail::NoMessage,
            },
            Err(_) => ErrorDetail::ParseFailure,
        }
    }
}

/// A failed response, reduced to its status code and body detail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorReport {
    status: u16,
    detail: ErrorDetail,
}

impl ErrorReport {
    pub fn new(status: u16, detail: ErrorDetail) -> Self {
        ErrorReport { status, detail }
    }

    pub fn from_body(status: u16, body: &str) -> Self {
        ErrorReport::new(status, ErrorDetail::from_body(body))
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn detail(&self) -> &ErrorDetail {
        &self.detail
    }

    /// The diagnostic, one entry per printed line.
    pub fn lines(&self) -> Vec<String> {
        let code = self.status;
        let mut lines = vec![format!("API call failed with status code {}.", code)];
        match explain(code) {
            Some((title, explanation)) => {
                lines.push(format!("Error {}: \"{}\"", code, title));
                lines.extend(explanation.iter().map(|line| line.to_string()));
            }
            None => lines.push(format!("Error: {}: Unknown error", code)),
        }
        match &self.detail {
            ErrorDetail::Message(msg) => lines.push(msg.clone()),
            ErrorDetail::NoMessage => {}
            ErrorDetail::ParseFailure => lines.push(NO_DETAIL_LINE.to_string()),
        }
        lines.push(STATUS_DOCS_HINT.to_string());
        lines
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Print the diagnostic to stdout.
    pub fn print(&self) {
        if let Err(e) = self.write_to(&mut io::stdout().lock()) {
            warn!("failed to print error report: {}", e);
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Title and explanation for the status codes the sizer documents.
pub fn explain(code: u16) -> Option<(&'static str, &'static [&'static str])> {
    let entry: (&'static str, &'static [&'static str]) = match code {
        301 => (
            "Moved Permanently",
            &[
                "Request must be reissued to a different controller node.",
                "The controller node has been replaced by a new node that should be used for this and all future requests.",
            ],
        ),
        307 => (
            "Temporary Redirect",
            &[
                "Request should be reissued to a different controller node.",
                "The controller node is requesting the client make further requests against the controller node specified in the Location header. Clients should continue to use the new server until directed otherwise by the new controller node.",
            ],
        ),
        400 => (
            "Bad Request",
            &["Request was improperly formatted or contained an invalid parameter."],
        ),
        401 => (
            "Unauthorized",
            &[
                "The client has not authenticated.",
                "It's likely your refresh token is out of date or otherwise incorrect.",
            ],
        ),
        403 => (
            "Forbidden",
            &[
                "The client does not have sufficient privileges to execute the request.",
                "The API is likely in read-only mode, or a request was made to modify a read-only property.",
                "It's likely your refresh token does not provide sufficient access.",
            ],
        ),
        409 => (
            "Conflict",
            &[
                "The request can not be performed because it conflicts with configuration on a different entity, or because another client modified the same entity.",
                "If the conflict arose because of a conflict with a different entity, modify the conflicting configuration. If the problem is due to a concurrent update, re-fetch the resource, apply the desired update, and reissue the request.",
            ],
        ),
        412 => (
            "Precondition Failed",
            &["The request can not be performed because a precondition check failed. Usually, this means that the client sent a PUT or PATCH request with an out-of-date _revision property, probably because some other client has modified the entity since it was retrieved. The client should re-fetch the entry, apply any desired changes, and re-submit the operation."],
        ),
        500 => (
            "Internal Server Error",
            &["An internal error occurred while executing the request. If the problem persists, perform diagnostic system tests, or contact your support representative."],
        ),
        503 => (
            "Service Unavailable",
            &["The request can not be performed because the associated resource could not be reached or is temporarily busy. Please confirm the ORG ID and SDDC ID entries in your config.ini are correct."],
        ),
        _ => return None,
    };
    Some(entry)
}
