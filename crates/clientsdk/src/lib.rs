//! Client SDK for a uid-keyed configuration server.
//!
//! Host programs implement [`UidModel`] and call [`client_send`] (or a
//! [`Dispatcher`]) with one of `download`, `pull`, `post` or `put`.
//!
//! ```no_run
//! use clientsdk::{client_send, StaticModel};
//!
//! let model = StaticModel::local().with_fields(["port", "host"]);
//! let body = client_send("pull", "http://localhost:8080/config/pull", None, &model);
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod identity;
pub mod method;
pub mod model;

pub use config::{DispatcherConfig, DEFAULT_UID, UPLOAD_FILE_NAME};
pub use dispatcher::{client_send, Dispatcher};
pub use error::{ErrorKind, SdkError, SdkResult};
pub use identity::{local_mac, try_local_mac};
pub use method::Method;
pub use model::{StaticModel, UidModel};
