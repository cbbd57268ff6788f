use std::fmt;

/// HTTP verb of a remote endpoint. Parameters always travel in the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remote operation: verb, path relative to the service base URL, and the
/// names of the caller-supplied query parameters (`apikey` is always added).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub params: &'static [&'static str],
}

impl Endpoint {
    /// Query pairs for a call: `apikey` first, then `params` zipped with `args`.
    pub(crate) fn query(&self, apikey: &str, args: &[&str]) -> Vec<(String, String)> {
        debug_assert_eq!(self.params.len(), args.len(), "{} arity", self.path);

        let mut query = Vec::with_capacity(self.params.len() + 1);
        query.push(("apikey".to_string(), apikey.to_string()));
        query.extend(
            self.params
                .iter()
                .zip(args)
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        query
    }
}

/// Generates the endpoint table of a service and the matching methods on both
/// [`AsyncClient`](crate::AsyncClient) and [`BlockingClient`](crate::BlockingClient).
/// `extra` entries are listed in the table only; their methods are hand-written.
macro_rules! endpoints {
    (
        $service:ty;
        $(extra $extra_name:ident => $extra:path;)*
        $(
            $(#[$meta:meta])*
            fn $name:ident($($arg:ident),*) => $method:ident $path:literal;
        )*
    ) => {
        /// Every endpoint of this service as `(method name, endpoint)`.
        pub const ENDPOINTS: &[(&str, $crate::endpoint::Endpoint)] = &[
            $(
                (
                    stringify!($name),
                    $crate::endpoint::Endpoint {
                        method: $crate::endpoint::Method::$method,
                        path: $path,
                        params: &[$(stringify!($arg)),*],
                    },
                ),
            )*
            $( (stringify!($extra_name), $extra), )*
        ];

        impl<T: $crate::transport::AsyncTransport> $crate::client::AsyncClient<$service, T> {
            $(
                $(#[$meta])*
                pub async fn $name(&mut self, $($arg: &str),*) -> $crate::error::Result<serde_json::Value> {
                    const ENDPOINT: $crate::endpoint::Endpoint = $crate::endpoint::Endpoint {
                        method: $crate::endpoint::Method::$method,
                        path: $path,
                        params: &[$(stringify!($arg)),*],
                    };
                    self.call(&ENDPOINT, &[$($arg),*]).await
                }
            )*
        }

        impl<T: $crate::transport::BlockingTransport> $crate::client::BlockingClient<$service, T> {
            $(
                $(#[$meta])*
                pub fn $name(&mut self, $($arg: &str),*) -> $crate::error::Result<serde_json::Value> {
                    const ENDPOINT: $crate::endpoint::Endpoint = $crate::endpoint::Endpoint {
                        method: $crate::endpoint::Method::$method,
                        path: $path,
                        params: &[$(stringify!($arg)),*],
                    };
                    self.call(&ENDPOINT, &[$($arg),*])
                }
            )*
        }
    };
}

pub(crate) use endpoints;
