//! Registered routes and match results.

use std::collections::BTreeMap;

use crate::routing::key::RouteKey;
use crate::routing::matcher::Matcher;
use crate::routing::method::MethodSpec;
use crate::routing::template::Template;

/// Parameter values by placeholder (or capture group) name.
pub type Params = BTreeMap<String, String>;

/// One registered mapping from verbs and a URI template to a handler.
#[derive(Debug)]
pub struct Route<H> {
    pub(crate) key: RouteKey,
    pub(crate) methods: MethodSpec,
    pub(crate) uri: String,
    pub(crate) template: Template,
    pub(crate) matcher: Box<dyn Matcher>,
    pub(crate) name: Option<String>,
    pub(crate) handler: H,
}

impl<H> Route<H> {
    pub fn key(&self) -> &RouteKey {
        &self.key
    }

    pub fn methods(&self) -> &MethodSpec {
        &self.methods
    }

    /// Canonical URI template.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Normalized name, if the route has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// A successful match: the route plus whatever the URI bound.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a Route<H>,
    pub params: Params,
}

impl<'a, H> RouteMatch<'a, H> {
    pub fn handler(&self) -> &'a H {
        &self.route.handler
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
