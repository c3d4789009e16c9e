//! Resume output schema and structural validation.
//!
//! The resume JSON shape (field names and nesting) is fixed; every successful
//! generation reproduces it field-for-field. Validation reports per-field
//! errors with dotted paths so the retry loop can feed the model a precise
//! correction instead of a string dump.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::bootdev::BootDevProfile;
use crate::models::form::Form;
use crate::models::github::{GithubProfile, Repository};
use crate::models::leetcode::LeetCodeProfile;

// ────────────────────────────────────────────────────────────────────────────
// Output schema
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies_used: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// The generated resume. `personal_info` is the only required field; every
/// other field defaults to empty, and individual values may be placeholder
/// text like `[USER INPUT REQUIRED]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline inputs
// ────────────────────────────────────────────────────────────────────────────

/// Raw scraped profile data, one request's worth. Every source is
/// independently optional and unset sources are excluded when serialized
/// for prompting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_profile: Option<GithubProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_repositories: Option<Vec<Repository>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leetcode_profile: Option<LeetCodeProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bootdev_profile: Option<BootDevProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<Form>,
}

impl ScrapedData {
    /// True when no source supplied any data at all.
    pub fn is_empty(&self) -> bool {
        self.github_profile.is_none()
            && self.github_repositories.is_none()
            && self.leetcode_profile.is_none()
            && self.bootdev_profile.is_none()
            && self.personal_info.is_none()
    }
}

/// Lossy, flattened projection of `ScrapedData` produced by the summarizer
/// step. Never hand-constructed by API callers in normal use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizedData {
    #[serde(default)]
    pub personal_info: Map<String, Value>,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub key_projects: Vec<Map<String, Value>>,
    #[serde(default)]
    pub learning_achievements: Vec<String>,
    #[serde(default)]
    pub problem_solving_stats: Map<String, Value>,
    #[serde(default)]
    pub professional_experience_indicators: Vec<String>,
    #[serde(default)]
    pub education_background: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Structural validation
// ────────────────────────────────────────────────────────────────────────────

/// One structural mismatch between a parsed JSON value and the resume shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the offending field, e.g. `experience[0].title`.
    pub path: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

const PERSONAL_INFO_FIELDS: &[&str] = &[
    "name", "email", "phone", "location", "linkedin", "github", "twitter", "website",
];
const EXPERIENCE_FIELDS: &[&str] = &["title", "company", "duration", "description"];
const EDUCATION_FIELDS: &[&str] = &["degree", "institution", "year"];

/// Validates a parsed JSON value against the resume shape, collecting every
/// mismatch rather than stopping at the first.
///
/// Rules: `personal_info` must be present; any other field may be absent and
/// defaults to empty; a field that is present with the wrong type is an
/// error; unknown fields are ignored.
pub fn validate_resume(value: &Value) -> Result<Resume, Vec<FieldError>> {
    let Some(obj) = value.as_object() else {
        return Err(vec![FieldError {
            path: "$".to_string(),
            message: "expected a JSON object".to_string(),
        }]);
    };

    let mut errors = Vec::new();

    match obj.get("personal_info") {
        None => errors.push(FieldError {
            path: "personal_info".to_string(),
            message: "field required".to_string(),
        }),
        Some(info) => check_string_fields(info, "personal_info", PERSONAL_INFO_FIELDS, &mut errors),
    }

    check_string(obj, "summary", &mut errors);
    check_string_list(obj, "skills", &mut errors);
    check_object_list(obj, "experience", EXPERIENCE_FIELDS, &mut errors);
    check_projects(obj, &mut errors);
    check_object_list(obj, "education", EDUCATION_FIELDS, &mut errors);
    check_string_list(obj, "achievements", &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    // The structural walk above guarantees this decode succeeds; a failure
    // here still surfaces as a root-level error rather than a panic.
    serde_json::from_value(value.clone()).map_err(|e| {
        vec![FieldError {
            path: "$".to_string(),
            message: e.to_string(),
        }]
    })
}

fn check_string(obj: &Map<String, Value>, key: &str, errors: &mut Vec<FieldError>) {
    if let Some(v) = obj.get(key) {
        if !v.is_string() {
            errors.push(FieldError {
                path: key.to_string(),
                message: "expected a string".to_string(),
            });
        }
    }
}

fn check_string_fields(value: &Value, path: &str, fields: &[&str], errors: &mut Vec<FieldError>) {
    let Some(obj) = value.as_object() else {
        errors.push(FieldError {
            path: path.to_string(),
            message: "expected a JSON object".to_string(),
        });
        return;
    };
    for &field in fields {
        if let Some(v) = obj.get(field) {
            if !v.is_string() {
                errors.push(FieldError {
                    path: format!("{path}.{field}"),
                    message: "expected a string".to_string(),
                });
            }
        }
    }
}

fn check_string_list(obj: &Map<String, Value>, key: &str, errors: &mut Vec<FieldError>) {
    let Some(v) = obj.get(key) else { return };
    let Some(items) = v.as_array() else {
        errors.push(FieldError {
            path: key.to_string(),
            message: "expected an array of strings".to_string(),
        });
        return;
    };
    for (i, item) in items.iter().enumerate() {
        if !item.is_string() {
            errors.push(FieldError {
                path: format!("{key}[{i}]"),
                message: "expected a string".to_string(),
            });
        }
    }
}

fn check_object_list(
    obj: &Map<String, Value>,
    key: &str,
    fields: &[&str],
    errors: &mut Vec<FieldError>,
) {
    let Some(v) = obj.get(key) else { return };
    let Some(items) = v.as_array() else {
        errors.push(FieldError {
            path: key.to_string(),
            message: "expected an array of objects".to_string(),
        });
        return;
    };
    for (i, item) in items.iter().enumerate() {
        check_string_fields(item, &format!("{key}[{i}]"), fields, errors);
    }
}

fn check_projects(obj: &Map<String, Value>, errors: &mut Vec<FieldError>) {
    let Some(v) = obj.get("projects") else { return };
    let Some(items) = v.as_array() else {
        errors.push(FieldError {
            path: "projects".to_string(),
            message: "expected an array of objects".to_string(),
        });
        return;
    };
    for (i, item) in items.iter().enumerate() {
        let path = format!("projects[{i}]");
        check_string_fields(item, &path, &["name", "description"], errors);
        if let Some(project) = item.as_object() {
            if let Some(techs) = project.get("technologies_used") {
                let Some(tech_items) = techs.as_array() else {
                    errors.push(FieldError {
                        path: format!("{path}.technologies_used"),
                        message: "expected an array of strings".to_string(),
                    });
                    continue;
                };
                for (j, tech) in tech_items.iter().enumerate() {
                    if !tech.is_string() {
                        errors.push(FieldError {
                            path: format!("{path}.technologies_used[{j}]"),
                            message: "expected a string".to_string(),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_resume() -> Resume {
        Resume {
            personal_info: PersonalInfo {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+44 20 0000 0000".to_string(),
                location: "London".to_string(),
                linkedin: "linkedin.com/in/ada".to_string(),
                github: "github.com/ada".to_string(),
                twitter: "@ada".to_string(),
                website: "ada.dev".to_string(),
            },
            summary: "Analytical engine programmer.".to_string(),
            skills: vec!["Rust".to_string(), "Mathematics".to_string()],
            experience: vec![Experience {
                title: "Engineer".to_string(),
                company: "Babbage & Co".to_string(),
                duration: "1842-1843".to_string(),
                description: "Wrote the first published algorithm.".to_string(),
            }],
            projects: vec![Project {
                name: "Note G".to_string(),
                description: "Bernoulli number computation.".to_string(),
                technologies_used: vec!["Analytical Engine".to_string()],
            }],
            education: vec![Education {
                degree: "Private tutoring".to_string(),
                institution: "[USER INPUT REQUIRED]".to_string(),
                year: "1833".to_string(),
            }],
            achievements: vec!["First computer programmer".to_string()],
        }
    }

    #[test]
    fn test_full_resume_round_trips_field_for_field() {
        let resume = full_resume();
        let json = serde_json::to_value(&resume).unwrap();
        let recovered: Resume = serde_json::from_value(json).unwrap();
        assert_eq!(recovered, resume);
    }

    #[test]
    fn test_minimal_object_validates_with_defaults() {
        let value = json!({"personal_info": {}});
        let resume = validate_resume(&value).unwrap();
        assert_eq!(resume.personal_info, PersonalInfo::default());
        assert!(resume.skills.is_empty());
        assert!(resume.summary.is_empty());
    }

    #[test]
    fn test_missing_personal_info_is_required() {
        let value = json!({"summary": "no contact details"});
        let errors = validate_resume(&value).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "personal_info");
        assert_eq!(errors[0].message, "field required");
    }

    #[test]
    fn test_non_object_value_is_rejected() {
        let errors = validate_resume(&json!("just a string")).unwrap_err();
        assert_eq!(errors[0].path, "$");
    }

    #[test]
    fn test_mistyped_fields_report_dotted_paths() {
        let value = json!({
            "personal_info": {"name": 42},
            "skills": ["Rust", 7],
            "experience": [{"title": "Engineer", "company": null}],
            "projects": [{"name": "x", "technologies_used": "Rust"}]
        });
        let errors = validate_resume(&value).unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert!(paths.contains(&"personal_info.name"));
        assert!(paths.contains(&"skills[1]"));
        assert!(paths.contains(&"experience[0].company"));
        assert!(paths.contains(&"projects[0].technologies_used"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let value = json!({
            "personal_info": {},
            "hobbies": ["chess"]
        });
        assert!(validate_resume(&value).is_ok());
    }

    #[test]
    fn test_all_errors_collected_not_just_first() {
        let value = json!({
            "skills": "Rust",
            "achievements": 3
        });
        let errors = validate_resume(&value).unwrap_err();
        assert!(errors.len() >= 3); // personal_info missing + two type errors
    }

    #[test]
    fn test_scraped_data_is_empty() {
        assert!(ScrapedData::default().is_empty());
        let with_form = ScrapedData {
            personal_info: Some(crate::models::form::Form::default()),
            ..ScrapedData::default()
        };
        assert!(!with_form.is_empty());
    }

    #[test]
    fn test_summarized_data_decodes_with_partial_fields() {
        let json = r#"{
            "technical_skills": ["Rust", "Python"],
            "problem_solving_stats": {"total_solved": 120}
        }"#;
        let summary: SummarizedData = serde_json::from_str(json).unwrap();
        assert_eq!(summary.technical_skills.len(), 2);
        assert!(summary.personal_info.is_empty());
        assert!(summary.key_projects.is_empty());
    }

    #[test]
    fn test_summarized_data_rejects_mistyped_fields() {
        let json = r#"{"technical_skills": "Rust"}"#;
        assert!(serde_json::from_str::<SummarizedData>(json).is_err());
    }

    #[test]
    fn test_field_error_display_is_path_then_message() {
        let err = FieldError {
            path: "experience[0].title".to_string(),
            message: "expected a string".to_string(),
        };
        assert_eq!(err.to_string(), "experience[0].title: expected a string");
    }
}
