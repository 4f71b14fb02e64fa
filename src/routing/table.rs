//! The route table.
//!
//! # Responsibilities
//! - Register routes under a stable key and an optional unique name
//! - Rebuild URIs from a route name plus parameters
//! - Resolve a (method, URI) pair to the first matching route
//!
//! # Design Decisions
//! - Built once, then shared read-only (`&self` for every lookup)
//! - Two-tier lookup: O(1) key check for literal routes, then an ordered scan
//! - First match in registration order wins; specificity is not considered
//! - Explicit `None` for no-match rather than an error

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::routing::error::RouterError;
use crate::routing::key::{normalize_name, RouteKey};
use crate::routing::matcher;
use crate::routing::method::MethodSpec;
use crate::routing::request::RequestSource;
use crate::routing::route::{Params, Route, RouteMatch};
use crate::routing::template::{MatchTypes, Template};

/// Method-aware, named route table holding opaque handlers of type `H`.
#[derive(Debug)]
pub struct RouteTable<H> {
    base_path: String,
    match_types: MatchTypes,
    /// By-key store, iterated in registration order during the scan.
    routes: IndexMap<RouteKey, Route<H>>,
    /// Normalized name to route key.
    names: HashMap<String, RouteKey>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTable<H> {
    /// Create an empty table rooted at `/`.
    pub fn new() -> Self {
        Self::with_base_path("/")
    }

    /// Create an empty table whose routes live under `base_path`.
    pub fn with_base_path(base_path: &str) -> Self {
        Self {
            base_path: normalize_base_path(base_path),
            match_types: MatchTypes::default(),
            routes: IndexMap::new(),
            names: HashMap::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Register a custom placeholder tag.
    ///
    /// Only affects routes registered afterwards.
    pub fn add_match_type(&mut self, tag: &str, pattern: &str) -> Result<(), RouterError> {
        self.match_types.insert(tag, pattern)?;
        tracing::debug!(tag = %tag, pattern = %pattern, "Match type registered");
        Ok(())
    }

    /// Register a route, parsing `method` as a verb or `|`-separated verb set.
    pub fn register(
        &mut self,
        method: &str,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteKey, RouterError> {
        let methods: MethodSpec = method.parse()?;
        self.register_with(methods, path, handler, name)
    }

    /// Register a route with an already parsed method spec.
    ///
    /// Re-registering the same method, URI and name replaces the handler and
    /// keeps the route's position. A name already used by a different route
    /// is rejected and the table is left unchanged.
    pub fn register_with(
        &mut self,
        methods: MethodSpec,
        path: &str,
        handler: H,
        name: Option<&str>,
    ) -> Result<RouteKey, RouterError> {
        let uri = self.canonical_uri(path);
        let name = name.and_then(normalize_name);
        let key = RouteKey::compute(&methods.canonical(), &uri, name.as_deref());

        if let Some(name) = &name {
            if let Some(existing) = self.names.get(name) {
                if existing != &key {
                    return Err(RouterError::DuplicateRoute {
                        name: name.clone(),
                        existing: existing.to_string(),
                    });
                }
            }
        }

        let template = Template::parse(&uri, &self.match_types)?;
        let matcher = matcher::compile(&template)?;

        if self.routes.contains_key(&key) {
            tracing::debug!(key = %key, uri = %uri, "Route re-registered, handler replaced");
        } else {
            tracing::debug!(
                key = %key,
                method = %methods,
                uri = %uri,
                name = name.as_deref().unwrap_or("-"),
                "Route registered"
            );
        }

        if let Some(name) = &name {
            self.names.insert(name.clone(), key.clone());
        }
        self.routes.insert(
            key.clone(),
            Route {
                key: key.clone(),
                methods,
                uri,
                template,
                matcher,
                name,
                handler,
            },
        );
        Ok(key)
    }

    /// Rebuild the URI of a named route.
    ///
    /// Optional placeholders without a value disappear along with their
    /// separator. Required placeholders without a value stay in the output
    /// as written; use [`RouteTable::rewrite_strict`] to reject them.
    pub fn rewrite(&self, name: &str, params: &Params) -> Result<String, RouterError> {
        let route = self.named(name)?;
        let (uri, missing) = route.template.expand(params);
        if !missing.is_empty() {
            tracing::debug!(
                route = %name,
                missing = ?missing,
                "Rewrite left placeholders unresolved"
            );
        }
        Ok(uri)
    }

    /// Like [`RouteTable::rewrite`], but every required placeholder must have a value.
    pub fn rewrite_strict(&self, name: &str, params: &Params) -> Result<String, RouterError> {
        let route = self.named(name)?;
        let (uri, missing) = route.template.expand(params);
        match missing.into_iter().next() {
            Some(parameter) => Err(RouterError::MissingParameter {
                name: name.to_string(),
                parameter,
            }),
            None => Ok(uri),
        }
    }

    /// Find the route serving `method` and `uri`.
    ///
    /// Any query string is ignored. Returns `None` when nothing matches.
    pub fn match_route(&self, method: &str, uri: &str) -> Option<RouteMatch<'_, H>> {
        let path = uri.split_once('?').map_or(uri, |(path, _)| path);
        let method = method.trim().to_ascii_uppercase();

        let key = RouteKey::compute(&method, path, None);
        if let Some(route) = self.routes.get(&key) {
            if route.template.is_literal() {
                tracing::trace!(key = %key, "Exact route hit");
                return Some(RouteMatch {
                    route,
                    params: Params::new(),
                });
            }
        }

        self.routes
            .values()
            .filter(|route| route.methods.allows(&method))
            .find_map(|route| {
                route
                    .matcher
                    .capture(path)
                    .map(|params| RouteMatch { route, params })
            })
    }

    /// Match using the method and URI of `request`.
    pub fn match_request<R: RequestSource + ?Sized>(
        &self,
        request: &R,
    ) -> Option<RouteMatch<'_, H>> {
        self.match_route(request.method(), request.uri())
    }

    /// Match with explicit values where given, falling back to `request`.
    pub fn match_or_default<R: RequestSource + ?Sized>(
        &self,
        method: Option<&str>,
        uri: Option<&str>,
        request: &R,
    ) -> Option<RouteMatch<'_, H>> {
        self.match_route(
            method.unwrap_or_else(|| request.method()),
            uri.unwrap_or_else(|| request.uri()),
        )
    }

    pub fn get(&self, key: &RouteKey) -> Option<&Route<H>> {
        self.routes.get(key)
    }

    /// Look up a route by name (normalized before lookup).
    pub fn get_by_name(&self, name: &str) -> Option<&Route<H>> {
        let name = normalize_name(name)?;
        self.names.get(&name).and_then(|key| self.routes.get(key))
    }

    /// All routes in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Remove a route, keeping the order of the others.
    pub fn unregister(&mut self, key: &RouteKey) -> Option<Route<H>> {
        let route = self.routes.shift_remove(key)?;
        if let Some(name) = &route.name {
            self.names.remove(name);
        }
        tracing::debug!(key = %key, uri = %route.uri, "Route unregistered");
        Some(route)
    }

    /// Remove every route. Base path and match types are kept.
    pub fn reset(&mut self) {
        self.routes.clear();
        self.names.clear();
    }

    fn named(&self, name: &str) -> Result<&Route<H>, RouterError> {
        self.get_by_name(name)
            .ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))
    }

    fn canonical_uri(&self, path: &str) -> String {
        if path == "*" || path.starts_with('@') {
            return path.to_string();
        }
        let relative = path.strip_prefix('/').unwrap_or(path);
        format!("{}{}", self.base_path, relative)
    }
}

fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}
