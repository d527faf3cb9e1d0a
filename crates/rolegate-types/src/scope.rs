//! The capability catalog.
//!
//! A [`Scope`] is a `resource:action` token such as `traces:read`. The set
//! of scopes is closed and known at compile time; anything else fails to
//! parse.

use crate::ErrorCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Suffix that marks a read-type scope.
pub const READ_SUFFIX: &str = ":read";

macro_rules! scope_catalog {
    ($($(#[$meta:meta])* $variant:ident => $token:literal,)+) => {
        /// A capability token of the form `resource:action`.
        ///
        /// Comparison is by identity of the token; there is no prefix or
        /// wildcard matching.
        ///
        /// # Example
        ///
        /// ```
        /// use rolegate_types::Scope;
        ///
        /// let scope: Scope = "traces:read".parse().unwrap();
        /// assert_eq!(scope, Scope::TracesRead);
        /// assert_eq!(scope.resource(), "traces");
        /// assert_eq!(scope.action(), "read");
        /// assert!(scope.is_read());
        /// assert!(!Scope::TracesDelete.is_read());
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Scope {
            $($(#[$meta])* $variant,)+
        }

        impl Scope {
            /// Every scope in the catalog, in declaration order.
            pub const ALL: &'static [Scope] = &[$(Scope::$variant,)+];

            /// Returns the `resource:action` token.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }
    };
}

scope_catalog! {
    /// `projects:read`
    ProjectsRead => "projects:read",
    /// `projects:update`
    ProjectsUpdate => "projects:update",
    /// `projects:delete`
    ProjectsDelete => "projects:delete",
    /// `projects:transfer`
    ProjectsTransfer => "projects:transfer",

    /// `members:read`
    MembersRead => "members:read",
    /// `members:create`
    MembersCreate => "members:create",
    /// `members:delete`
    MembersDelete => "members:delete",

    /// `apiKeys:read`
    ApiKeysRead => "apiKeys:read",
    /// `apiKeys:create`
    ApiKeysCreate => "apiKeys:create",
    /// `apiKeys:delete`
    ApiKeysDelete => "apiKeys:delete",

    /// `integrations:CRUD`
    IntegrationsCrud => "integrations:CRUD",

    /// `traces:read`
    TracesRead => "traces:read",
    /// `traces:bookmark`
    TracesBookmark => "traces:bookmark",
    /// `traces:tag`
    TracesTag => "traces:tag",
    /// `traces:delete`
    TracesDelete => "traces:delete",

    /// `scores:read`
    ScoresRead => "scores:read",
    /// `scores:CUD`
    ScoresCud => "scores:CUD",

    /// `prompts:read`
    PromptsRead => "prompts:read",
    /// `prompts:CUD`
    PromptsCud => "prompts:CUD",

    /// `datasets:read`
    DatasetsRead => "datasets:read",
    /// `datasets:CUD`
    DatasetsCud => "datasets:CUD",

    /// `models:read`
    ModelsRead => "models:read",
    /// `models:CUD`
    ModelsCud => "models:CUD",

    /// `evalTemplates:read`
    EvalTemplatesRead => "evalTemplates:read",
    /// `evalTemplates:create`
    EvalTemplatesCreate => "evalTemplates:create",

    /// `evalJobs:read`
    EvalJobsRead => "evalJobs:read",
    /// `evalJobs:CUD`
    EvalJobsCud => "evalJobs:CUD",

    /// `llmApiKeys:read`
    LlmApiKeysRead => "llmApiKeys:read",
    /// `llmApiKeys:create`
    LlmApiKeysCreate => "llmApiKeys:create",
    /// `llmApiKeys:delete`
    LlmApiKeysDelete => "llmApiKeys:delete",
}

impl Scope {
    /// Returns `true` if the token ends with the literal `:read` suffix.
    #[must_use]
    pub fn is_read(self) -> bool {
        self.as_str().ends_with(READ_SUFFIX)
    }

    /// The part before the colon.
    #[must_use]
    pub fn resource(self) -> &'static str {
        self.split().0
    }

    /// The part after the colon.
    #[must_use]
    pub fn action(self) -> &'static str {
        self.split().1
    }

    fn split(self) -> (&'static str, &'static str) {
        let token = self.as_str();
        token.split_once(':').unwrap_or((token, ""))
    }

    /// Iterates over every scope on the given resource.
    ///
    /// ```
    /// use rolegate_types::Scope;
    ///
    /// let traces: Vec<_> = Scope::for_resource("traces").collect();
    /// assert!(traces.contains(&Scope::TracesRead));
    /// assert!(traces.contains(&Scope::TracesDelete));
    /// assert!(!traces.contains(&Scope::ScoresRead));
    /// ```
    pub fn for_resource(resource: &str) -> impl Iterator<Item = Scope> + '_ {
        Self::ALL
            .iter()
            .copied()
            .filter(move |scope| scope.resource() == resource)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not in the scope catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scope '{0}'")]
pub struct ParseScopeError(pub String);

impl ErrorCode for ParseScopeError {
    fn code(&self) -> &'static str {
        "SCOPE_UNKNOWN"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

impl FromStr for Scope {
    type Err = ParseScopeError;

    /// Exact, case-sensitive match against the catalog.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| ParseScopeError(s.to_string()))
    }
}

impl Serialize for Scope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_error_code;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_unique_and_well_formed() {
        let mut seen = HashSet::new();
        for scope in Scope::ALL {
            let token = scope.as_str();
            assert!(seen.insert(token), "duplicate token {token}");
            assert_eq!(token.matches(':').count(), 1, "malformed token {token}");
            assert!(!scope.resource().is_empty());
            assert!(!scope.action().is_empty());
        }
    }

    #[test]
    fn parse_round_trips_every_scope() {
        for scope in Scope::ALL {
            assert_eq!(scope.as_str().parse::<Scope>(), Ok(*scope));
        }
    }

    #[test]
    fn parse_is_exact() {
        assert!("traces:READ".parse::<Scope>().is_err());
        assert!("traces".parse::<Scope>().is_err());
        assert!("traces:".parse::<Scope>().is_err());
        assert!(" traces:read".parse::<Scope>().is_err());

        let err = "traces:*".parse::<Scope>().unwrap_err();
        assert_eq!(err.0, "traces:*");
        assert_error_code(&err, "SCOPE_");
    }

    #[test]
    fn read_classification_follows_suffix() {
        assert!(Scope::ProjectsRead.is_read());
        assert!(Scope::LlmApiKeysRead.is_read());
        assert!(!Scope::ProjectsDelete.is_read());
        assert!(!Scope::IntegrationsCrud.is_read());
        assert!(!Scope::ScoresCud.is_read());

        for scope in Scope::ALL {
            assert_eq!(scope.is_read(), scope.action() == "read");
        }
    }

    #[test]
    fn serde_uses_token() {
        let json = serde_json::to_string(&Scope::ApiKeysCreate).expect("serialize");
        assert_eq!(json, "\"apiKeys:create\"");

        let parsed: Scope = serde_json::from_str("\"members:delete\"").expect("deserialize");
        assert_eq!(parsed, Scope::MembersDelete);

        let err = serde_json::from_str::<Scope>("\"members:purge\"").unwrap_err();
        assert!(err.to_string().contains("members:purge"));
    }

    mod proptest_scope {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Parsing arbitrary text never panics, and anything accepted
            /// is printed back verbatim.
            #[test]
            fn parse_accepts_only_catalog_tokens(input in "[a-zA-Z:]{0,24}") {
                if let Ok(scope) = input.parse::<Scope>() {
                    prop_assert_eq!(scope.as_str(), input.as_str());
                }
            }
        }
    }
}
