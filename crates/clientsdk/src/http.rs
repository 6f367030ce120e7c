//! HTTP Client Utilities
//!
//! Client construction, uid URL building and response draining shared by all
//! four dispatch patterns.

use std::io::{Read, Write};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::config::DispatcherConfig;
use crate::error::{SdkError, SdkResult};

/// Create a blocking reqwest client from the dispatcher configuration
///
/// - no timeout unless `timeout_secs` is set
/// - system proxy settings honoured unless disabled
pub fn create_http_client(config: &DispatcherConfig) -> SdkResult<Client> {
    let mut builder = Client::builder().timeout(config.timeout_secs.map(Duration::from_secs));
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }
    builder.build().map_err(SdkError::Client)
}

pub fn parse_router(router: &str) -> SdkResult<Url> {
    Url::parse(router).map_err(|source| SdkError::InvalidUrl {
        url: router.to_string(),
        source,
    })
}

/// `router` with its query replaced by `uid=<uid>`
///
/// The uid is form-urlencoded, so non-ASCII and reserved characters survive.
pub fn uid_url(router: &str, uid: &str) -> SdkResult<Url> {
    let mut url = parse_router(router)?;
    url.set_query(None);
    url.query_pairs_mut().append_pair("uid", uid);
    Ok(url)
}

/// Read the whole body, echoing status and body to `echo` when given
///
/// A read that fails midway keeps what arrived in [`SdkError::BodyRead`].
pub fn drain_response(response: Response, echo: Option<&mut dyn Write>) -> SdkResult<Vec<u8>> {
    let status = response.status();
    debug!("Response status: {}", status);
    drain_body(status, response, echo)
}

pub fn drain_body<R: Read>(
    status: StatusCode,
    mut reader: R,
    echo: Option<&mut dyn Write>,
) -> SdkResult<Vec<u8>> {
    let mut body = Vec::new();
    let read = reader.read_to_end(&mut body);

    if let Some(sink) = echo {
        if let Err(e) = echo_response(sink, status, &body) {
            warn!("Failed to echo response: {}", e);
        }
    }

    match read {
        Ok(_) => Ok(body),
        Err(source) => Err(SdkError::BodyRead {
            partial: body,
            source,
        }),
    }
}

/// Status line (`200 OK`) then the lossily decoded body, one line each
pub fn echo_response(sink: &mut dyn Write, status: StatusCode, body: &[u8]) -> std::io::Result<()> {
    writeln!(sink, "{}", status)?;
    writeln!(sink, "{}", String::from_utf8_lossy(body))?;
    sink.flush()
}
