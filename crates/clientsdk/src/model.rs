//! Caller-supplied capability model
//!
//! Every host program implements [`UidModel`] for its own type; the dispatcher
//! only ever sees the trait.

use serde_json::{Map, Value};

use crate::identity;

/// The three capabilities a dispatch needs from its caller
pub trait UidModel {
    /// Identity sent as the `uid` query parameter or form field
    fn uid(&self) -> String;

    /// Ordered field names requested by a personalized pull
    fn personalized_fields(&self) -> Vec<String>;

    /// Key/value pairs sent by an update
    fn update_fields(&self) -> Map<String, Value>;
}

/// A [`UidModel`] backed by owned values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticModel {
    pub uid: String,
    pub fields: Vec<String>,
    pub updates: Map<String, Value>,
}

impl StaticModel {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Self::default()
        }
    }

    /// Model whose uid is this host's first hardware address (empty if none)
    pub fn local() -> Self {
        Self::new(identity::local_mac())
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_update(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.updates.insert(key.into(), value.into());
        self
    }
}

impl UidModel for StaticModel {
    fn uid(&self) -> String {
        self.uid.clone()
    }

    fn personalized_fields(&self) -> Vec<String> {
        self.fields.clone()
    }

    fn update_fields(&self) -> Map<String, Value> {
        self.updates.clone()
    }
}
