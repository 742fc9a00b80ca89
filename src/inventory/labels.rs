//! Label extraction from container image identifiers
//!
//! Image identifiers have the shape `[registry/]path[:tag]`. The tag becomes
//! the version; the last path segment is tokenised against ordered lists of
//! known prefixes, environments and applications, and whatever is left over
//! is the component.

use crate::error::{FleetmapError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Ordered token lists driving the extractor. Earlier entries win.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelRules {
    /// Non-meaningful tokens dropped before matching
    pub prefixes: Vec<String>,
    pub environments: Vec<String>,
    pub applications: Vec<String>,
}

impl Default for LabelRules {
    fn default() -> Self {
        Self {
            prefixes: to_strings(&["ptah"]),
            environments: to_strings(&[
                "dev2",
                "dev",
                "development",
                "stage",
                "staging",
                "prod",
                "ci",
            ]),
            applications: to_strings(&[
                "wp-multisite",
                "wl-widgets",
                "social-auth",
                "wp-wl-elementor",
                "wl-messenger",
                "wl-fitbuilder",
                "wl-explorer",
            ]),
        }
    }
}

fn to_strings(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

impl LabelRules {
    pub fn validate(&self) -> Result<()> {
        for (list, tokens) in [
            ("prefixes", &self.prefixes),
            ("environments", &self.environments),
            ("applications", &self.applications),
        ] {
            if tokens.iter().any(|t| t.trim().is_empty()) {
                return Err(FleetmapError::ConfigError(format!(
                    "labels.{} contains an empty token",
                    list
                )));
            }
        }
        Ok(())
    }
}

/// Metadata derived from an image identifier. Unknown fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub app: String,
    pub env: String,
    pub component: String,
    pub version: String,
}

/// Tokens compiled to whole-word matchers, kept in priority order
#[derive(Debug, Clone)]
struct TokenList {
    tokens: Vec<(String, Regex)>,
}

impl TokenList {
    fn compile(tokens: &[String]) -> Result<Self> {
        let tokens = tokens
            .iter()
            .map(|token| {
                // ASCII word boundaries: letters, digits and `_` are word characters
                // the dash runs on either side are captured so a cut can close its gap
                let pattern = format!(r"(-*)(?-u:\b){}(?-u:\b)(-*)", regex::escape(token));
                Regex::new(&pattern)
                    .map(|re| (token.clone(), re))
                    .map_err(|e| {
                        FleetmapError::ConfigError(format!("Invalid label token {}: {}", token, e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { tokens })
    }

    /// Finds the first token present in `input` as a whole word and removes
    /// every whole-word occurrence of it. Later tokens are not considered once
    /// one has matched.
    ///
    /// Each occurrence is cut together with its adjoining dashes. An occurrence
    /// between two dash runs leaves a single `-` behind; dashes elsewhere in
    /// `input` are untouched.
    fn find_and_cut(&self, input: &str) -> (String, String) {
        for (token, re) in &self.tokens {
            if re.is_match(input) {
                let cut = re.replace_all(input, |caps: &Captures<'_>| {
                    if caps[1].is_empty() || caps[2].is_empty() {
                        ""
                    } else {
                        "-"
                    }
                });
                return (token.clone(), cut.into_owned());
            }
        }
        (String::new(), input.to_string())
    }
}

/// Compiled form of [`LabelRules`]; cheap to share between tasks.
#[derive(Debug, Clone)]
pub struct LabelExtractor {
    prefixes: TokenList,
    environments: TokenList,
    applications: TokenList,
}

impl LabelExtractor {
    pub fn new(rules: &LabelRules) -> Result<Self> {
        rules.validate()?;

        Ok(Self {
            prefixes: TokenList::compile(&rules.prefixes)?,
            environments: TokenList::compile(&rules.environments)?,
            applications: TokenList::compile(&rules.applications)?,
        })
    }

    pub fn extract(&self, image: &str) -> Labels {
        // A colon followed by a path is a registry port, not a tag
        let (path, version) = match image.rsplit_once(':') {
            Some((path, tag)) if !tag.contains('/') => (path, tag),
            _ => (image, ""),
        };

        let segment = path.rsplit_once('/').map_or(path, |(_, last)| last);

        let (_, remaining) = self.prefixes.find_and_cut(segment);

        let (mut env, remaining) = self.environments.find_and_cut(&remaining);
        if env.is_empty() {
            env = self.environments.find_and_cut(version).0;
        }

        let (app, remaining) = self.applications.find_and_cut(&remaining);

        Labels {
            app,
            env,
            component: tidy_component(&remaining),
            version: version.to_string(),
        }
    }
}

/// Cuts already closed their gaps, so only the ends need trimming.
fn tidy_component(remaining: &str) -> String {
    remaining.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> LabelExtractor {
        LabelExtractor::new(&LabelRules::default()).unwrap()
    }

    fn labels(app: &str, env: &str, component: &str, version: &str) -> Labels {
        Labels {
            app: app.to_string(),
            env: env.to_string(),
            component: component.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_plain_image_with_tag() {
        assert_eq!(
            extractor().extract("nginx:latest"),
            labels("", "", "nginx", "latest")
        );
    }

    #[test]
    fn test_full_path_with_env_and_app() {
        assert_eq!(
            extractor().extract("registry.example.com/team/seg1-prod-wl-widgets-comp:1.2"),
            labels("wl-widgets", "prod", "seg1-comp", "1.2")
        );
    }

    #[test]
    fn test_untagged_path() {
        assert_eq!(
            extractor().extract("registry/org/prod-web-api"),
            labels("", "prod", "web-api", "")
        );
    }

    #[test]
    fn test_prefix_is_stripped() {
        assert_eq!(
            extractor().extract("1234.dkr.ecr.us-west-2.amazonaws.com/ptah/ptah-prod-wl-widgets-api:1.4.2"),
            labels("wl-widgets", "prod", "api", "1.4.2")
        );
        assert_eq!(
            extractor().extract("ptah-staging-wl-fitbuilder:3"),
            labels("wl-fitbuilder", "staging", "", "3")
        );
    }

    #[test]
    fn test_list_order_wins_over_position() {
        // "dev" precedes "staging" in the list even though it appears later
        assert_eq!(
            extractor().extract("staging-api-dev:1"),
            labels("", "dev", "staging-api", "1")
        );
    }

    #[test]
    fn test_all_occurrences_removed() {
        assert_eq!(
            extractor().extract("prod-api-prod:9"),
            labels("", "prod", "api", "9")
        );
    }

    #[test]
    fn test_whole_word_only() {
        let ex = extractor();

        // "ci" inside "pencil" and "dev" inside "devtools" must not match
        assert_eq!(ex.extract("pencil-api:1").env, "");
        assert_eq!(ex.extract("devtools:1").env, "");
        assert_eq!(ex.extract("ci-runner:1").env, "ci");

        // "dev" must not match the start of "dev2"
        assert_eq!(
            ex.extract("dev2-social-auth-web"),
            labels("social-auth", "dev2", "web", "")
        );
    }

    #[test]
    fn test_dashes_in_image_are_kept() {
        let ex = extractor();

        assert_eq!(ex.extract("seg1--comp:1"), labels("", "", "seg1--comp", "1"));
        assert_eq!(
            ex.extract("seg1--prod-comp--worker:1"),
            labels("", "prod", "seg1-comp--worker", "1")
        );
        // a cut between non-dash characters leaves them as they were
        assert_eq!(ex.extract("x.prod.y:1").component, "x..y");
    }

    #[test]
    fn test_underscore_is_part_of_word() {
        assert_eq!(
            extractor().extract("prod_api:2"),
            labels("", "", "prod_api", "2")
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(extractor().extract("PROD-api:2").env, "");
    }

    #[test]
    fn test_env_falls_back_to_version() {
        assert_eq!(
            extractor().extract("repo/wl-explorer:staging-42"),
            labels("wl-explorer", "staging", "", "staging-42")
        );
    }

    #[test]
    fn test_path_env_takes_precedence_over_version() {
        assert_eq!(
            extractor().extract("repo/prod-wl-messenger:dev-1").env,
            "prod"
        );
    }

    #[test]
    fn test_registry_port_is_not_a_tag() {
        assert_eq!(
            extractor().extract("localhost:5000/prod-api"),
            labels("", "prod", "api", "")
        );
        assert_eq!(
            extractor().extract("localhost:5000/prod-api:7").version,
            "7"
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        let ex = extractor();
        assert_eq!(ex.extract(""), Labels::default());
        assert_eq!(ex.extract(":"), Labels::default());
        assert_eq!(ex.extract("repo/"), Labels::default());
        assert_eq!(ex.extract("---"), Labels::default());
    }

    #[test]
    fn test_custom_rules() {
        let rules = LabelRules {
            prefixes: vec!["acme".to_string()],
            environments: vec!["qa".to_string(), "live".to_string()],
            applications: vec!["billing".to_string()],
        };
        let ex = LabelExtractor::new(&rules).unwrap();

        assert_eq!(
            ex.extract("acme/acme-live-billing-worker:5"),
            labels("billing", "live", "worker", "5")
        );
        // default tokens no longer apply
        assert_eq!(ex.extract("prod-api").env, "");
    }

    #[test]
    fn test_tokens_are_literal() {
        let rules = LabelRules {
            prefixes: vec![],
            environments: vec!["a.b".to_string()],
            applications: vec![],
        };
        let ex = LabelExtractor::new(&rules).unwrap();

        assert_eq!(ex.extract("axb-api").env, "");
        assert_eq!(ex.extract("a.b-api").env, "a.b");
    }

    #[test]
    fn test_empty_token_rejected() {
        let rules = LabelRules {
            environments: vec!["prod".to_string(), " ".to_string()],
            ..LabelRules::default()
        };
        assert!(matches!(
            LabelExtractor::new(&rules),
            Err(FleetmapError::ConfigError(_))
        ));
    }
}
