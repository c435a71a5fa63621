//! Host environment the accessor runs in.

/// Tag naming a browser-like host.
pub const BROWSER_TAG: &str = "browser";
/// Tag naming a native host that embeds the account service.
pub const NATIVE_TAG: &str = "native";

/// Where the accessor is running.
///
/// Decided once at startup and passed explicitly into transport selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// A browser-like host that reaches the service over the network.
    Browser {
        /// Location fragment of the hosting page (with or without `#`).
        location_fragment: Option<String>,
    },
    /// A native host running the service in the same process.
    Native,
}

impl Environment {
    /// Build an environment from its tag.
    ///
    /// `browser` and `web` (any case) select [`Environment::Browser`]; every
    /// other tag selects [`Environment::Native`] and drops the fragment.
    #[must_use]
    pub fn from_tag(tag: &str, location_fragment: Option<String>) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case(BROWSER_TAG) || tag.eq_ignore_ascii_case("web") {
            Self::Browser { location_fragment }
        } else {
            Self::Native
        }
    }

    /// Canonical tag of this environment.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Browser { .. } => BROWSER_TAG,
            Self::Native => NATIVE_TAG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_tags_are_case_insensitive() {
        let env = Environment::from_tag("Browser", Some("#/ip4/1.2.3.4/tcp/5".into()));
        assert_eq!(
            env,
            Environment::Browser {
                location_fragment: Some("#/ip4/1.2.3.4/tcp/5".into())
            }
        );
        assert_eq!(Environment::from_tag("WEB", None).tag(), BROWSER_TAG);
    }

    #[test]
    fn unknown_tags_are_native() {
        for tag in ["native", "ios", "android", ""] {
            assert_eq!(Environment::from_tag(tag, Some("x".into())), Environment::Native);
        }
    }
}
