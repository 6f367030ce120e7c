//! Dispatch methods

use std::fmt;
use std::str::FromStr;

use crate::error::SdkError;

/// One of the four request patterns the dispatcher knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET `router?uid=..`, no body
    Download,
    /// GET `router?uid=..` with a JSON array of field names as body
    Pull,
    /// Multipart POST of a local file plus the uid
    Post,
    /// PUT `router?uid=..` with a JSON object of updates as body
    Put,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Download, Method::Pull, Method::Post, Method::Put];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Download => "download",
            Method::Pull => "pull",
            Method::Post => "post",
            Method::Put => "put",
        }
    }
}

impl FromStr for Method {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "download" => Ok(Method::Download),
            "pull" => Ok(Method::Pull),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            _ => Err(SdkError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
