use super::*;

impl RemoteClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response, Unreachable> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        Err(Unreachable::new(format!("{} returned {}", label, status)))
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// The rejection body is shown verbatim; an empty body falls back to the status.
pub(super) fn rejection_reason(body: &str, status: reqwest::StatusCode) -> String {
    if body.trim().is_empty() {
        format!("request failed ({})", status)
    } else {
        body.to_string()
    }
}
