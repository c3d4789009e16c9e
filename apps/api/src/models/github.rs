use serde::{Deserialize, Serialize};

/// GitHub profile snapshot as delivered by the scraping layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubProfile {
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    #[serde(default)]
    pub public_repos: u32,
}

/// One public repository. `readme` carries the scraped README text; the
/// generation prompts mine it for personal info, education, and experience.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub topics: Vec<String>,
    pub html_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readme: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_optional_fields_are_omitted_from_json() {
        let profile = GithubProfile {
            login: "octocat".to_string(),
            name: None,
            bio: None,
            company: None,
            location: None,
            email: None,
            blog: None,
            followers: 42,
            following: 0,
            public_repos: 7,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("name").is_none());
        assert!(json.get("bio").is_none());
        assert_eq!(json["login"], "octocat");
        assert_eq!(json["followers"], 42);
    }

    #[test]
    fn test_repository_deserializes_with_minimal_fields() {
        let json = r#"{"name": "presencecv", "html_url": "https://github.com/octocat/presencecv"}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "presencecv");
        assert!(repo.topics.is_empty());
        assert!(repo.readme.is_none());
    }
}
