//! RPC method identifiers.
//!
//! Inbound calls carry a *full* identifier such as
//! `/bytebase.v1.EnvironmentService/CreateEnvironment`. Policy tables are keyed
//! by the *short* form (`EnvironmentService/CreateEnvironment`).

/// Transport namespace prefix of the v1 API.
pub const API_PACKAGE_PREFIX: &str = "/bytebase.v1.";

/// Strip [`API_PACKAGE_PREFIX`] from a full method identifier.
///
/// Input without the prefix is returned unchanged.
pub fn short_method_name(full: &str) -> &str {
    full.strip_prefix(API_PACKAGE_PREFIX).unwrap_or(full)
}

/// Split a short identifier into `(service, method)`.
///
/// Returns `None` unless the name has exactly one `/` with non-empty halves.
pub fn split_service_method(short: &str) -> Option<(&str, &str)> {
    let (svc, method) = short.split_once('/')?;
    if svc.is_empty() || method.is_empty() || method.contains('/') {
        return None;
    }
    Some((svc, method))
}

/// Prefix-stripping normalizer with a configurable namespace prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNormalizer {
    prefix: String,
}

impl Default for MethodNormalizer {
    fn default() -> Self {
        Self::new(API_PACKAGE_PREFIX)
    }
}

impl MethodNormalizer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strip the configured prefix once. Never fails.
    pub fn normalize<'a>(&self, full: &'a str) -> &'a str {
        match full.strip_prefix(self.prefix.as_str()) {
            Some(short) => short,
            None => {
                // Malformed transport ids land here too.
                tracing::debug!(method = %full, prefix = %self.prefix, "method id without namespace prefix");
                full
            }
        }
    }
}
