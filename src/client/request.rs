use reqwest::Method;

/// Context for one outgoing call, kept across a possible refresh-and-retry.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub query: Vec<(String, String)>,
    /// Set only when the refresh path re-issues the call. In-memory
    /// bookkeeping; never serialized onto the wire.
    pub retried: bool,
}

impl OutgoingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            retried: false,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_params(mut self, params: Option<&[(&str, &str)]>) -> Self {
        if let Some(params) = params {
            self.query = params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect();
        }
        self
    }

    /// Copy of this request marked as the one-and-only retry.
    pub(crate) fn mark_retried(&self) -> Self {
        let mut copy = self.clone();
        copy.retried = true;
        copy
    }

    /// Stamp the request onto the transport.
    pub(crate) fn build(&self, http: &reqwest::Client, base_url: &str) -> reqwest::RequestBuilder {
        let url = format!("{base_url}{}", self.path);
        let mut builder = http.request(self.method.clone(), url);
        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }
        if let Some(body) = &self.body {
            builder = builder.json(body);
        }
        builder
    }
}
