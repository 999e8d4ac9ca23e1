use http::Method;

/// Builds a method plus path-and-query pair for a service call
pub struct RequestBuilder {
    method: Method,
    path: String,
    query_params: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query_params: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push((key.into(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn build(self) -> (Method, String) {
        let path = self.build_path();
        (self.method, path)
    }

    pub fn build_path(&self) -> String {
        if self.query_params.is_empty() {
            self.path.clone()
        } else {
            let query_string = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query_params.iter())
                .finish();
            format!("{}?{}", self.path, query_string)
        }
    }
}
