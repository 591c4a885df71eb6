//! Assembles a [`Document`] member by member.

use super::{CONTEXT, Document, ServiceBuilder, VerificationMethodBuilder};
use crate::error::Err;
use crate::{Result, tracerr};

/// DID Document builder.
///
/// Members that are never set are omitted from the document; a document must
/// have at least one service.
#[derive(Clone, Debug)]
pub struct DocumentBuilder {
    context: Vec<String>,
    also_known_as: Option<Vec<String>>,
    controller: Option<String>,
    verification_method: Option<Vec<VerificationMethodBuilder>>,
    authentication: Option<Vec<String>>,
    assertion_method: Option<Vec<String>>,
    service: Option<Vec<ServiceBuilder>>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a new `DocumentBuilder` with the standard contexts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            context: CONTEXT.iter().map(ToString::to_string).collect(),
            also_known_as: None,
            controller: None,
            verification_method: None,
            authentication: None,
            assertion_method: None,
            service: None,
        }
    }

    /// Add an also-known-as identifier.
    #[must_use]
    pub fn also_known_as(mut self, aka: impl Into<String>) -> Self {
        self.also_known_as.get_or_insert(vec![]).push(aka.into());
        self
    }

    /// Set the controller.
    #[must_use]
    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    /// Add a verification method.
    #[must_use]
    pub fn verification_method(mut self, builder: VerificationMethodBuilder) -> Self {
        self.verification_method.get_or_insert(vec![]).push(builder);
        self
    }

    /// Reference a verification method (by key ID) in the `authentication`
    /// relationship.
    #[must_use]
    pub fn authentication(mut self, key_id: impl Into<String>) -> Self {
        self.authentication.get_or_insert(vec![]).push(key_id.into());
        self
    }

    /// Reference a verification method (by key ID) in the `assertionMethod`
    /// relationship.
    #[must_use]
    pub fn assertion_method(mut self, key_id: impl Into<String>) -> Self {
        self.assertion_method.get_or_insert(vec![]).push(key_id.into());
        self
    }

    /// Add a service endpoint.
    ///
    /// Chain to add multiple service endpoints.
    #[must_use]
    pub fn service(mut self, service: ServiceBuilder) -> Self {
        self.service.get_or_insert(vec![]).push(service);
        self
    }

    /// Build the document for `did`.
    ///
    /// # Errors
    ///
    /// Will fail if no service was added or a service is incomplete.
    pub fn build(self, did: impl Into<String>) -> Result<Document> {
        let did = did.into();

        let Some(services) = self.service else {
            tracerr!(Err::InvalidInput, "document for {did} has no service");
        };
        let service = services.into_iter().map(ServiceBuilder::build).collect::<Result<_>>()?;

        let verification_method = self
            .verification_method
            .map(|builders| builders.into_iter().map(|b| b.build(&did)).collect());
        let to_refs = |ids: Vec<String>| -> Vec<String> {
            ids.into_iter().map(|id| format!("{did}#{id}")).collect()
        };
        let authentication = self.authentication.map(to_refs);
        let assertion_method = self.assertion_method.map(to_refs);

        Ok(Document {
            context: self.context,
            also_known_as: self.also_known_as,
            controller: self.controller,
            verification_method,
            authentication,
            assertion_method,
            service,
            id: did,
            ..Document::default()
        })
    }
}
