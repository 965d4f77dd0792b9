//! Reserved query parameters.
//!
//! `_return=<int>` forces the response status, `_delay=<int>` delays the
//! response by that many milliseconds. Only the first occurrence of each is
//! honoured; a non-numeric first occurrence disables the control entirely.

use std::time::Duration;

pub const RETURN_PARAM: &str = "_return";
pub const DELAY_PARAM: &str = "_delay";

/// Control values derived from one request's query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlParams {
    /// Status to force. Zero counts as absent.
    pub forced_status: Option<u64>,
    /// Delay before the response is sent. Zero counts as absent.
    pub delay: Option<Duration>,
}

impl ControlParams {
    pub fn from_query(query: Option<&str>) -> Self {
        Self {
            forced_status: extract_return(query).filter(|code| *code != 0),
            delay: extract_delay(query)
                .filter(|ms| *ms != 0)
                .map(Duration::from_millis),
        }
    }
}

pub fn extract_return(query: Option<&str>) -> Option<u64> {
    extract_integer(query, RETURN_PARAM)
}

pub fn extract_delay(query: Option<&str>) -> Option<u64> {
    extract_integer(query, DELAY_PARAM)
}

fn extract_integer(query: Option<&str>, key: &str) -> Option<u64> {
    let query = query.filter(|q| !q.is_empty())?;
    let raw = query
        .split('&')
        .find_map(|token| token.strip_prefix(key)?.strip_prefix('='))?;
    raw.parse().ok()
}
