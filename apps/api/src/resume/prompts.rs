//! All LLM prompt constants and the pure prompt builder for the resume
//! pipeline. Nothing here performs I/O; identical inputs always produce
//! identical prompt text.

use serde_json::Value;

/// Literal filled into any resume field for which no source data exists.
pub const PLACEHOLDER: &str = "[USER INPUT REQUIRED]";

/// Fixed lead-in for the resume user content.
pub const RESUME_LEAD_IN: &str = "Create a professional resume using this data:";

/// Fixed lead-in for the summarizer user content.
pub const SUMMARY_LEAD_IN: &str = "Summarize the following scraped data for resume creation:";

/// System prompt for resume generation from raw scraped data.
pub const RESUME_FROM_SCRAPED_SYSTEM: &str = r#"You are a professional AI resume writer. Based on the provided scraped user data from GitHub, Boot.dev, and LeetCode, create a polished resume.

Required JSON structure: {"personal_info":{"name":"","email":"","phone":"","location":"","linkedin":"","github":"","twitter":"","website":""},"summary":"","skills":[],"experience":[{"title":"","company":"","duration":"","description":""}],"projects":[{"name":"","description":"","technologies_used":["tech1","tech2"]}],"education":[{"degree":"","institution":"","year":""}],"achievements":[""]}

IMPORTANT INSTRUCTIONS:
- Extract information from the scraped data, analyzing repository README files for additional personal info, education details, work experience, and project descriptions
- Write a professional summary that highlights skills and experience
- Infer projects from GitHub repositories with meaningful descriptions
- Use Boot.dev courses to highlight the learning journey
- Use LeetCode achievements to showcase problem-solving skill
- Create professional experience entries where the data supports them
- Fill missing information with "[USER INPUT REQUIRED]" placeholders
- Make reasonable professional inferences from the available data
- Focus on impressive and relevant information
- Skip underwhelming stats (e.g. fewer than 50 LeetCode problems solved, fewer than 200 GitHub followers)

Respond with valid JSON only. Do NOT use markdown code fences. Do NOT include any text outside the JSON object."#;

/// System prompt for resume generation from pre-summarized data.
pub const RESUME_FROM_SUMMARY_SYSTEM: &str = r#"You are an expert resume writer working from pre-summarized profile data.

Required JSON structure: {"personal_info":{"name":"","email":"","phone":"","location":"","linkedin":"","github":"","twitter":"","website":""},"summary":"","skills":[],"experience":[{"title":"","company":"","duration":"","description":""}],"projects":[{"name":"","description":"","technologies_used":["tech1","tech2"]}],"education":[{"degree":"","institution":"","year":""}],"achievements":[""]}

Create a professional resume following these guidelines:
- Write a professional summary highlighting key strengths using STAR (Situation, Task, Action, Result) or CAR (Challenge, Action, Result) methodology
- Transform project data into impressive project descriptions
- Use problem-solving stats to demonstrate analytical capability
- Create professional experience entries where the data supports them
- Fill missing information with "[USER INPUT REQUIRED]" placeholders
- Analyze README content in the project data for additional personal info, education details, work experience, and project descriptions

Respond with valid JSON only. Do NOT use markdown code fences. Do NOT include any text outside the JSON object."#;

/// System prompt for the optional data-summarizer step.
pub const SUMMARIZER_SYSTEM: &str = r#"You are an expert data analyst extracting and summarizing information.

Analyze scraped data from GitHub, LeetCode, and Boot.dev and produce a summary that highlights:
- Personal info: name, location, contact details, and professional links
- Technical skills: programming languages, frameworks, tools
- Key projects: impressive GitHub repositories with meaningful descriptions
- Learning achievements: completed courses, certifications, continuous learning
- Problem-solving stats: LeetCode statistics
- Professional indicators: patterns suggesting employment, freelance work, or professional experience
- Education background: formal or informal education inferred from courses and project complexity
- Analyze README files in repositories for additional personal info, education details, work experience, and project descriptions

QUALITY GUIDELINES:
- Do NOT include stats or achievements that are underwhelming (e.g. fewer than 50 LeetCode problems solved or fewer than 200 GitHub followers — anything that would not stand out to a technical recruiter)
- Prioritize active and recent projects
- Highlight consistent learning patterns
- Extract quantifiable achievements
- Focus on career-relevant information

Respond with valid JSON only. Do NOT use markdown code fences."#;

/// Which system instruction drives the resume call. Selected from the input
/// variant; both modes require the same output JSON shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    RawScraped,
    PreSummarized,
}

/// A fully built prompt: system instruction plus user content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePrompt {
    pub system: &'static str,
    pub user_content: String,
}

/// Builds the resume prompt for the given mode and payload. Pure: no side
/// effects, deterministic for identical inputs. Unset fields are excluded
/// upstream by the payload's own serialization.
pub fn build_resume_prompt(mode: PromptMode, payload: &Value) -> ResumePrompt {
    let system = match mode {
        PromptMode::RawScraped => RESUME_FROM_SCRAPED_SYSTEM,
        PromptMode::PreSummarized => RESUME_FROM_SUMMARY_SYSTEM,
    };
    ResumePrompt {
        system,
        user_content: format!("{RESUME_LEAD_IN}\n{}", pretty(payload)),
    }
}

/// Builds the summarizer prompt for a scraped-data payload.
pub fn build_summarizer_prompt(payload: &Value) -> ResumePrompt {
    ResumePrompt {
        system: SUMMARIZER_SYSTEM,
        user_content: format!("{SUMMARY_LEAD_IN}\n{}", pretty(payload)),
    }
}

fn pretty(payload: &Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}
