//! # Service
//!
//! Services are used to express ways of communicating with the DID subject or
//! associated entities. AT Protocol clients look up the subject's Personal
//! Data Server through the `#atproto_pds` service.

use serde::{Deserialize, Serialize};

use crate::error::Err;
use crate::{Result, tracerr};

/// A Service is used to express a way of communicating with the DID subject or
/// associated entities.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// A URI unique to the service, e.g. `#atproto_pds`.
    pub id: String,

    /// The service type.
    #[serde(rename = "type")]
    pub type_: String,

    /// The service URL.
    #[allow(clippy::struct_field_names)]
    pub service_endpoint: String,
}

impl Service {
    /// Create a new `ServiceBuilder` to build a service.
    #[must_use]
    pub fn build() -> ServiceBuilder {
        ServiceBuilder::new()
    }
}

/// Service builder
#[derive(Clone, Debug, Default)]
pub struct ServiceBuilder {
    id: Option<String>,
    service_type: Option<String>,
    endpoint: Option<String>,
}

impl ServiceBuilder {
    /// Creates a new, empty `ServiceBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the service ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Specify the service type.
    #[must_use]
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Specify the service endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Build the service.
    pub(crate) fn build(self) -> Result<Service> {
        let Some(id) = self.id else {
            tracerr!(Err::InvalidInput, "no service id specified");
        };
        let Some(service_type) = self.service_type else {
            tracerr!(Err::InvalidInput, "no type specified for service {id}");
        };
        let Some(endpoint) = self.endpoint.filter(|e| !e.is_empty()) else {
            tracerr!(Err::InvalidInput, "no endpoint specified for service {id}");
        };

        Ok(Service {
            id,
            type_: service_type,
            service_endpoint: endpoint,
        })
    }
}
