//! Per-request options and URL construction.

/// Header that tells the client not to count a request as foreground work.
pub const SKIP_LOADER_HEADER: &str = "X-Skip-Loader";

/// Query parameters, extra headers and the loading-indicator opt-out for a
/// single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiOptions {
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    skip_loader: bool,
}

impl ApiOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar query parameter, replacing earlier values for `key`.
    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.retain(|(k, _)| k != key);
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Set a query parameter only when `value` is present.
    #[must_use]
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Append one `key=value` pair per element.
    #[must_use]
    pub fn query_list<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.query.push((key.to_owned(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Mark the request as background work. Sends `X-Skip-Loader: true`.
    #[must_use]
    pub fn skip_loader(mut self) -> Self {
        self.skip_loader = true;
        self
    }

    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn skips_loader(&self) -> bool {
        self.skip_loader
            || self
                .headers
                .iter()
                .any(|(k, v)| k.eq_ignore_ascii_case(SKIP_LOADER_HEADER) && v == "true")
    }
}

/// Join `base_url` and `path` and collapse repeated slashes in the path.
/// The `scheme://` separator is kept intact.
#[must_use]
pub fn build_url(base_url: &str, path: &str) -> String {
    let joined = format!("{base_url}/{path}");
    let (scheme, rest) = match joined.find("://") {
        Some(idx) => joined.split_at(idx + 3),
        None => ("", joined.as_str()),
    };

    let mut out = String::with_capacity(joined.len());
    out.push_str(scheme);
    let mut prev_slash = false;
    for ch in rest.chars() {
        if ch == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(ch);
    }
    out
}

/// Whether `path` is already an absolute http(s) URL.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

#[cfg(test)]
#[path = "options_test.rs"]
mod tests;
