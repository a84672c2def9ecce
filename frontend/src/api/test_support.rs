#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, MockResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::Method;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PUT: Method = Method::PUT;
    pub const DELETE: Method = Method::DELETE;

    /// In-process stand-in for the backend. Requests whose URL starts with
    /// this server's base are routed here by the client transport instead of
    /// hitting the network, so tests stay hermetic and synchronous.
    #[derive(Clone)]
    pub struct MockServer {
        inner: Arc<Mutex<Inner>>,
        base: String,
    }

    struct Inner {
        routes: Vec<Route>,
        hits: Vec<(Method, String)>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        response: MockResponse,
    }

    impl MockServer {
        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Arc::new(Mutex::new(Inner {
                    routes: Vec::new(),
                    hits: Vec::new(),
                })),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(base_url.clone(), Arc::new(self.clone()));
            base_url
        }

        /// Later registrations win, so a test can override an earlier route.
        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let response = MockResponse::json(
                then.status.unwrap_or(200),
                then.body.unwrap_or_else(|| serde_json::json!({})),
            );

            let mut inner = self.inner.lock().expect("mock lock");
            inner.routes.push(Route {
                method,
                path,
                headers: when.headers.clone(),
                response,
            });
        }

        /// How many requests matched the given method and path so far.
        pub fn hits(&self, method: Method, path: &str) -> usize {
            let inner = self.inner.lock().expect("mock lock");
            inner
                .hits
                .iter()
                .filter(|(m, p)| *m == method && p == path)
                .count()
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<MockResponse, ApiError> {
            let method = request.method();
            let path = request.url().path();
            let mut inner = self.inner.lock().map_err(|_| ApiError::unknown("mock lock"))?;
            inner.hits.push((method.clone(), path.to_string()));

            let route = inner
                .routes
                .iter()
                .rev()
                .find(|route| {
                    route.method == *method
                        && route.path == path
                        && route.headers.iter().all(|(name, value)| {
                            request
                                .headers()
                                .get(name.as_str())
                                .and_then(|v| v.to_str().ok())
                                .map(|v| v == value)
                                .unwrap_or(false)
                        })
                })
                .cloned();

            route
                .map(|route| route.response)
                .ok_or_else(|| ApiError::unknown(format!("No mock for {} {}", method, path)))
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        headers: Vec<(String, String)>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn header(&mut self, name: &str, value: &str) -> &mut Self {
            self.headers.push((name.to_string(), value.to_string()));
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}
