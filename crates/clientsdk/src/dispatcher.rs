//! Request Dispatcher
//!
//! Maps a `(method, router, file path, model)` call onto one of four HTTP
//! request patterns and returns the raw response body.
//!
//! | method     | request                                              |
//! |------------|------------------------------------------------------|
//! | `download` | `GET router?uid=..`                                  |
//! | `pull`     | `GET router?uid=..`, JSON array of field names       |
//! | `post`     | `POST router`, multipart `file` + `uid`              |
//! | `put`      | `PUT router?uid=..`, JSON object of updates          |
//!
//! Each call is independent: nothing is cached or retried, and the blocking
//! client must not be driven from inside an async runtime.

use std::path::Path;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::config::{DispatcherConfig, UPLOAD_FILE_NAME};
use crate::error::{SdkError, SdkResult};
use crate::http::{create_http_client, drain_response, parse_router, uid_url};
use crate::method::Method;
use crate::model::UidModel;

const JSON_CONTENT_TYPE: &str = "application/json";
const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new() -> SdkResult<Self> {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> SdkResult<Self> {
        let client = create_http_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Dispatch by method name, matched case-insensitively.
    ///
    /// An empty router is rejected before the method is looked at.
    pub fn send<M>(
        &self,
        method: &str,
        router: &str,
        file_path: Option<&Path>,
        model: &M,
    ) -> SdkResult<Vec<u8>>
    where
        M: UidModel + ?Sized,
    {
        require_router(router)?;
        let method: Method = method.parse()?;
        self.dispatch(method, router, file_path, model)
    }

    pub fn dispatch<M>(
        &self,
        method: Method,
        router: &str,
        file_path: Option<&Path>,
        model: &M,
    ) -> SdkResult<Vec<u8>>
    where
        M: UidModel + ?Sized,
    {
        require_router(router)?;
        match method {
            Method::Download => self.download(router, &model.uid()),
            Method::Pull => self.pull(router, &model.uid(), &model.personalized_fields()),
            Method::Post => {
                let path = file_path.ok_or(SdkError::EmptyFilePath)?;
                self.post(router, path, &model.uid())
            }
            Method::Put => self.put(router, &model.uid(), &model.update_fields()),
        }
    }

    /// `bytes | none` form of [`send`](Self::send): errors are logged, not returned.
    ///
    /// When the body read fails after the response started, download, pull
    /// and put still hand back the bytes that did arrive; post returns none.
    pub fn client_send<M>(
        &self,
        method: &str,
        router: &str,
        file_path: Option<&Path>,
        model: &M,
    ) -> Option<Vec<u8>>
    where
        M: UidModel + ?Sized,
    {
        match self.send(method, router, file_path, model) {
            Ok(body) => Some(body),
            Err(SdkError::BodyRead { partial, source }) => {
                error!("{} {} failed while reading the body: {}", method, router, source);
                match method.parse::<Method>() {
                    Ok(Method::Post) => None,
                    _ => Some(partial),
                }
            }
            Err(e) => {
                error!("{} {} failed: {}", method, router, e);
                None
            }
        }
    }

    /// Fetch the file stored for `uid`
    pub fn download(&self, router: &str, uid: &str) -> SdkResult<Vec<u8>> {
        require_router(router)?;
        if uid.is_empty() {
            return Err(SdkError::MissingUid);
        }

        let url = uid_url(router, uid)?;
        debug!("GET {}", url);
        self.execute(self.client.get(url))
    }

    /// Ask for a caller-chosen subset of configuration fields
    pub fn pull(&self, router: &str, uid: &str, fields: &[String]) -> SdkResult<Vec<u8>> {
        require_router(router)?;
        let url = uid_url(router, uid)?;
        debug!("GET {} ({} fields)", url, fields.len());

        let builder = self
            .client
            .get(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(encode_json(fields));
        self.execute(builder)
    }

    /// Upload a local file; the part is always named [`UPLOAD_FILE_NAME`]
    pub fn post(&self, router: &str, file_path: &Path, uid: &str) -> SdkResult<Vec<u8>> {
        require_router(router)?;
        if file_path.as_os_str().is_empty() {
            return Err(SdkError::EmptyFilePath);
        }
        let uid = if uid.is_empty() {
            self.config.default_uid.as_str()
        } else {
            uid
        };
        let url = parse_router(router)?;

        let contents = std::fs::read(file_path).map_err(|source| SdkError::FileRead {
            path: file_path.to_path_buf(),
            source,
        })?;
        debug!(
            "POST {} ({} bytes from {} as {})",
            url,
            contents.len(),
            file_path.display(),
            UPLOAD_FILE_NAME
        );

        let file_part = Part::bytes(contents)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(OCTET_STREAM)
            .map_err(SdkError::Client)?;
        let form = Form::new()
            .part("file", file_part)
            .text("uid", uid.to_string());

        self.execute(self.client.post(url).multipart(form))
    }

    /// Send updated key/value pairs for `uid`
    pub fn put(&self, router: &str, uid: &str, updates: &Map<String, Value>) -> SdkResult<Vec<u8>> {
        require_router(router)?;
        let url = uid_url(router, uid)?;
        debug!("PUT {} ({} keys)", url, updates.len());

        let builder = self
            .client
            .put(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(encode_json(updates));
        self.execute(builder)
    }

    fn execute(&self, builder: RequestBuilder) -> SdkResult<Vec<u8>> {
        let response = builder.send().map_err(SdkError::Request)?;
        if self.config.echo_response {
            let mut stdout = std::io::stdout().lock();
            drain_response(response, Some(&mut stdout as &mut dyn std::io::Write))
        } else {
            drain_response(response, None)
        }
    }
}

/// One-shot dispatch with a default [`Dispatcher`]; errors are logged.
pub fn client_send<M>(
    method: &str,
    router: &str,
    file_path: Option<&Path>,
    model: &M,
) -> Option<Vec<u8>>
where
    M: UidModel + ?Sized,
{
    match Dispatcher::new() {
        Ok(dispatcher) => dispatcher.client_send(method, router, file_path, model),
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

fn require_router(router: &str) -> SdkResult<()> {
    if router.is_empty() {
        return Err(SdkError::EmptyRouter);
    }
    Ok(())
}

// An encoding failure still sends the request, with an empty body.
fn encode_json<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_else(|e| {
        warn!("marshal the request body failed, sending it empty: {}", e);
        Vec::new()
    })
}
