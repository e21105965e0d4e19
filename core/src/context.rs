// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Error, Result};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// Context is everything a signer or an API client may touch outside of memory.
///
/// Reading `.edgerc`, looking up `AKAMAI_*` variables and sending the signed
/// request all go through it, so tests can swap each of them out.
///
/// Nothing is wired by default: a bare [`Context::new`] fails every file read
/// and http call, and sees an empty environment.
///
/// ```
/// use edgegrid_core::{Context, OsEnv};
///
/// let ctx = Context::new().with_env(OsEnv);
/// assert!(ctx.env_var("AKAMAI_SURELY_UNSET_VARIABLE").is_none());
/// ```
#[derive(Clone)]
pub struct Context {
    fs: Arc<dyn FileRead>,
    http: Arc<dyn HttpSend>,
    env: Arc<dyn Env>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("file_read", &self.fs)
            .field("http_send", &self.http)
            .field("env", &self.env)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a context where every component is a no-op.
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileRead),
            http: Arc::new(NoopHttpSend),
            env: Arc::new(NoopEnv),
        }
    }

    /// Use `fs` to load `.edgerc` files.
    pub fn with_file_read(mut self, fs: impl FileRead) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Use `http` to deliver signed requests.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Use `env` for variable and home dir lookups.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Read a whole file.
    #[inline]
    pub async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        self.fs.file_read(path).await
    }

    /// Read a whole file, invalid utf-8 is replaced.
    pub async fn file_read_as_string(&self, path: &str) -> Result<String> {
        let content = self.file_read(path).await?;
        Ok(String::from_utf8_lossy(&content).into_owned())
    }

    /// Deliver a signed request.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Home directory, used to locate `~/.edgerc`.
    #[inline]
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.env.home_dir()
    }

    /// Resolve a leading `~/` (or `~\\`) against [`Context::home_dir`].
    ///
    /// Other paths are returned as is. `None` means the path needs a home dir
    /// and there is none.
    pub fn expand_home_dir(&self, path: &str) -> Option<String> {
        let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) else {
            return Some(path.to_string());
        };

        let home = self.home_dir()?;
        let sep = &path[1..2];
        Some(format!("{}{sep}{rest}", home.to_string_lossy()))
    }

    /// Look up a single variable such as `AKAMAI_CLIENT_TOKEN`.
    ///
    /// Unset and non utf-8 values are both `None`.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Snapshot of every visible variable.
    #[inline]
    pub fn env_vars(&self) -> HashMap<String, String> {
        self.env.vars()
    }
}

/// FileRead loads files, in practice the `.edgerc` credentials file.
#[async_trait::async_trait]
pub trait FileRead: Debug + Send + Sync + 'static {
    /// Read the whole file at `path`.
    async fn file_read(&self, path: &str) -> Result<Vec<u8>>;
}

/// HttpSend is the transport used to deliver signed requests.
///
/// Implementations only move bytes: retries, pooling and TLS belong to the
/// underlying client.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send `req` and collect the full response body.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Env abstracts the process environment.
pub trait Env: Debug + Send + Sync + 'static {
    /// Value of `key`, `None` if unset or not utf-8.
    fn var(&self, key: &str) -> Option<String>;

    /// All variables.
    fn vars(&self) -> HashMap<String, String>;

    /// Home directory of the current user.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// OsEnv reads the real process environment.
#[derive(Debug, Copy, Clone)]
pub struct OsEnv;

impl Env for OsEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn vars(&self) -> HashMap<String, String> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }
}

/// StaticEnv is a fixed environment, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    /// Home directory returned by [`Env::home_dir`].
    pub home_dir: Option<PathBuf>,
    /// Variables returned by [`Env::var`] and [`Env::vars`].
    pub envs: HashMap<String, String>,
}

impl Env for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.envs.get(key).cloned()
    }

    fn vars(&self) -> HashMap<String, String> {
        self.envs.clone()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir.clone()
    }
}

/// NoopFileRead fails every read.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileRead;

#[async_trait::async_trait]
impl FileRead for NoopFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        Err(Error::unexpected(format!(
            "no file reader configured, can't read {path}"
        )))
    }
}

/// NoopHttpSend fails every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(format!(
            "no http client configured, can't send {} {}",
            req.method(),
            req.uri()
        )))
    }
}

/// NoopEnv has no variables and no home directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnv;

impl Env for NoopEnv {
    fn var(&self, _: &str) -> Option<String> {
        None
    }

    fn vars(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        None
    }
}
