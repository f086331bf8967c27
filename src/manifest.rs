//! Fixture manifests: the ordered list of fixture names a test or hook depends on.
//!
//! There is no parameter-name reflection in Rust, so the manifest is explicit:
//! every test and hook states its fixture keys at registration, and the keys are
//! resolved against the fixture map in declaration order. For callers that keep
//! their dependency lists in signature-shaped strings, [`FixtureManifest::parse`]
//! extracts the keys from that form instead.

/// Ordered sequence of fixture keys. A test function's manifest IS its
/// dependency declaration: each key is looked up in the fixture map and the
/// resulting values are passed positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureManifest {
    keys: Vec<String>,
}

impl FixtureManifest {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FixtureManifest {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Manifest of a zero-fixture test.
    pub fn empty() -> Self {
        FixtureManifest::default()
    }

    /// Best-effort extraction of fixture keys from a signature-shaped string.
    ///
    /// Accepts `"(a, b)"`, `"a, b"`, full headers like `"function add(a, b)"`,
    /// and the terse arrow form `"count => ..."` (everything after `=>` is
    /// ignored). When the head carries an opening parenthesis, only the text
    /// between the parentheses counts; whitespace is stripped and empty tokens
    /// dropped, so `"()"` yields an empty manifest. Malformed input degrades to
    /// an empty manifest; this never errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use attest::manifest::FixtureManifest;
    /// let m = FixtureManifest::parse("function add( left , right )");
    /// assert_eq!(m.keys(), ["left", "right"]);
    /// assert!(FixtureManifest::parse("()").is_empty());
    /// ```
    pub fn parse(signature: &str) -> Self {
        let head = signature.split("=>").next().unwrap_or_default();
        let head = match head.find('(') {
            Some(start) => &head[start + 1..],
            None => head,
        };
        let head = match head.find(')') {
            Some(end) => &head[..end],
            None => head,
        };
        let stripped: String = head
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
            .collect();
        let keys = stripped
            .split(',')
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect();
        FixtureManifest { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<const N: usize> From<[&str; N]> for FixtureManifest {
    fn from(keys: [&str; N]) -> Self {
        FixtureManifest::new(keys)
    }
}

impl From<&[&str]> for FixtureManifest {
    fn from(keys: &[&str]) -> Self {
        FixtureManifest::new(keys.iter().copied())
    }
}

impl From<Vec<String>> for FixtureManifest {
    fn from(keys: Vec<String>) -> Self {
        FixtureManifest { keys }
    }
}

impl From<&str> for FixtureManifest {
    fn from(signature: &str) -> Self {
        FixtureManifest::parse(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parenthesized_signatures() {
        assert_eq!(FixtureManifest::parse("(a, b)").keys(), ["a", "b"]);
    }

    #[test]
    fn parses_bare_comma_lists() {
        assert_eq!(FixtureManifest::parse("a,b,c").keys(), ["a", "b", "c"]);
    }

    #[test]
    fn named_headers_keep_only_the_parenthesized_parameters() {
        assert_eq!(
            FixtureManifest::parse("function add(left, right)").keys(),
            ["left", "right"]
        );
        assert_eq!(
            FixtureManifest::parse("add(left, right)").keys(),
            ["left", "right"]
        );
    }

    #[test]
    fn zero_parameter_signature_yields_empty_manifest() {
        assert!(FixtureManifest::parse("()").is_empty());
        assert!(FixtureManifest::parse("").is_empty());
    }

    #[test]
    fn arrow_form_keeps_only_the_parameter_side() {
        assert_eq!(FixtureManifest::parse("count => count + 1").keys(), ["count"]);
    }

    #[test]
    fn strips_whitespace_and_drops_empty_tokens() {
        assert_eq!(
            FixtureManifest::parse("  ( spaced ,, keys ) ").keys(),
            ["spaced", "keys"]
        );
    }

    #[test]
    fn malformed_input_degrades_to_empty() {
        assert!(FixtureManifest::parse(")(,,").is_empty());
    }

    #[test]
    fn array_literals_convert() {
        let m: FixtureManifest = ["left", "right"].into();
        assert_eq!(m.keys(), ["left", "right"]);
    }
}
