//! The `uses` attribute of an action

use serde::{Deserialize, Serialize};

const IN_REPO_PREFIX: &str = "./";
const DOCKER_PREFIX: &str = "docker://";

/// Where an action's code lives, decomposed from the raw `uses` string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Uses {
    /// The value exactly as written
    pub raw: String,
    #[serde(flatten)]
    pub target: UsesTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form")]
pub enum UsesTarget {
    /// `./path/in/this/repo`; the path keeps its leading `./`
    #[serde(rename = "in_repo")]
    InRepo { path: String },
    /// `owner/repo[/subpath]@ref`; the path is `/subpath`, or `/` when absent
    #[serde(rename = "cross_repo")]
    CrossRepo {
        repository: String,
        path: String,
        #[serde(rename = "ref")]
        reference: String,
    },
    /// `docker://image`
    #[serde(rename = "docker")]
    DockerImage { image: String },
    #[serde(rename = "unknown")]
    Unrecognized,
}

/// Which addressing form a `uses` value takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsesForm {
    InRepo,
    CrossRepo,
    #[serde(rename = "docker")]
    DockerImage,
    Unknown,
}

impl Uses {
    /// Classify a raw `uses` value. Never fails: anything that matches no
    /// known form is kept as [`UsesTarget::Unrecognized`].
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            target: UsesTarget::parse(raw),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self.target, UsesTarget::Unrecognized)
    }

    pub fn form(&self) -> UsesForm {
        match self.target {
            UsesTarget::InRepo { .. } => UsesForm::InRepo,
            UsesTarget::CrossRepo { .. } => UsesForm::CrossRepo,
            UsesTarget::DockerImage { .. } => UsesForm::DockerImage,
            UsesTarget::Unrecognized => UsesForm::Unknown,
        }
    }
}

impl UsesTarget {
    fn parse(raw: &str) -> Self {
        if raw.starts_with(IN_REPO_PREFIX) {
            return UsesTarget::InRepo {
                path: raw.to_string(),
            };
        }

        if let Some(image) = raw.strip_prefix(DOCKER_PREFIX) {
            return UsesTarget::DockerImage {
                image: image.to_string(),
            };
        }

        let Some((location, reference)) = raw.rsplit_once('@') else {
            return UsesTarget::Unrecognized;
        };

        let parts: Vec<&str> = location.splitn(3, '/').collect();
        match parts.as_slice() {
            [owner, repo] => UsesTarget::CrossRepo {
                repository: format!("{}/{}", owner, repo),
                path: "/".to_string(),
                reference: reference.to_string(),
            },
            [owner, repo, subpath] => UsesTarget::CrossRepo {
                repository: format!("{}/{}", owner, repo),
                path: format!("/{}", subpath),
                reference: reference.to_string(),
            },
            _ => UsesTarget::Unrecognized,
        }
    }
}

impl std::fmt::Display for Uses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::fmt::Display for UsesForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            UsesForm::InRepo => "in_repo",
            UsesForm::CrossRepo => "cross_repo",
            UsesForm::DockerImage => "docker",
            UsesForm::Unknown => "unknown",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cross_repo(repository: &str, path: &str, reference: &str) -> UsesTarget {
        UsesTarget::CrossRepo {
            repository: repository.to_string(),
            path: path.to_string(),
            reference: reference.to_string(),
        }
    }

    #[test]
    fn test_in_repo() {
        let uses = Uses::parse("./actions/foo");
        assert_eq!(
            uses.target,
            UsesTarget::InRepo {
                path: "./actions/foo".to_string()
            }
        );
        assert_eq!(uses.form(), UsesForm::InRepo);

        let short = Uses::parse("./");
        assert_eq!(short.target, UsesTarget::InRepo { path: "./".to_string() });
    }

    #[test]
    fn test_docker_image() {
        let uses = Uses::parse("docker://alpine");
        assert_eq!(
            uses.target,
            UsesTarget::DockerImage {
                image: "alpine".to_string()
            }
        );
        assert_eq!(uses.form(), UsesForm::DockerImage);
    }

    #[test]
    fn test_cross_repo() {
        assert_eq!(Uses::parse("foo/bar@dev").target, cross_repo("foo/bar", "/", "dev"));
        assert_eq!(
            Uses::parse("foo/bar/path@1.0.0").target,
            cross_repo("foo/bar", "/path", "1.0.0")
        );
        assert_eq!(
            Uses::parse("foo/bar/deep/path@v1").target,
            cross_repo("foo/bar", "/deep/path", "v1")
        );
        // present-but-empty subpath
        assert_eq!(Uses::parse("foo/bar/@v1").target, cross_repo("foo/bar", "/", "v1"));
        assert_eq!(Uses::parse("name/owner@5678ac").form(), UsesForm::CrossRepo);
    }

    #[test]
    fn test_splits_on_last_at() {
        assert_eq!(
            Uses::parse("foo/bar@baz@v2").target,
            cross_repo("foo/bar@baz", "/", "v2")
        );
    }

    #[test]
    fn test_unrecognized() {
        for raw in ["foo", "foo/bar", "foo@bar", ""] {
            let uses = Uses::parse(raw);
            assert!(!uses.is_recognized(), "{raw} should not be recognized");
            assert_eq!(uses.form(), UsesForm::Unknown);
            assert_eq!(uses.to_string(), raw);
        }
    }

    #[test]
    fn test_display_is_raw() {
        assert_eq!(Uses::parse("docker://alpine").to_string(), "docker://alpine");
        assert_eq!(Uses::parse("foo/bar/path@master").to_string(), "foo/bar/path@master");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Uses::parse("foo/bar@dev")).expect("serialize");
        assert_eq!(json["form"], "cross_repo");
        assert_eq!(json["repository"], "foo/bar");
        assert_eq!(json["ref"], "dev");

        let back: Uses = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, Uses::parse("foo/bar@dev"));
    }

    fn arb_uses() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\./[a-z0-9/_-]{0,12}",
            "docker://[a-z0-9./:_-]{1,16}",
            "[a-z0-9_-]{1,8}/[a-z0-9_-]{1,8}(/[a-z0-9/_-]{0,8})?@[a-z0-9._-]{1,8}",
            "[a-z0-9@/._-]{0,16}",
        ]
    }

    proptest! {
        /// Re-reading the rendered value of a parsed `uses` gives the same value.
        #[test]
        fn reparse_of_display_is_identical(raw in arb_uses()) {
            let uses = Uses::parse(&raw);
            prop_assert_eq!(Uses::parse(&uses.to_string()), uses);
        }
    }
}
