#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::resume::models::{
    Certification, Education, Experience, Language, PersonalInfo, Project, ResumeDocument,
    SkillCategory,
};

/// Raised when the résumé document on disk cannot back the chat service.
/// Not recoverable by retry; surfaced at startup or on first access.
#[derive(Debug, Error)]
pub enum DataIntegrityError {
    #[error("resume file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("resume file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("resume is missing required section '{0}'")]
    MissingSection(&'static str),

    #[error("resume section '{0}' must not be empty")]
    EmptySection(&'static str),
}

/// Unvalidated résumé shape. Every section is optional here so validation
/// can report the missing section by name instead of failing inside serde.
/// Unknown top-level keys are rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawResume {
    personal_info: Option<PersonalInfo>,
    career_objective: Option<String>,
    skills: Option<Vec<SkillCategory>>,
    education: Option<Vec<Education>>,
    certifications: Option<Vec<Certification>>,
    experience: Option<Vec<Experience>>,
    projects: Option<Vec<Project>>,
    achievements: Option<Vec<String>>,
    languages: Option<Vec<Language>>,
}

impl RawResume {
    fn validate(self) -> Result<ResumeDocument, DataIntegrityError> {
        let personal_info = self
            .personal_info
            .ok_or(DataIntegrityError::MissingSection("personalInfo"))?;
        let skills = self
            .skills
            .ok_or(DataIntegrityError::MissingSection("skills"))?;
        if skills.is_empty() {
            return Err(DataIntegrityError::EmptySection("skills"));
        }
        let education = self
            .education
            .ok_or(DataIntegrityError::MissingSection("education"))?;
        let certifications = self
            .certifications
            .ok_or(DataIntegrityError::MissingSection("certifications"))?;
        let experience = self
            .experience
            .ok_or(DataIntegrityError::MissingSection("experience"))?;
        let projects = self
            .projects
            .ok_or(DataIntegrityError::MissingSection("projects"))?;
        let languages = self
            .languages
            .ok_or(DataIntegrityError::MissingSection("languages"))?;

        Ok(ResumeDocument {
            personal_info,
            career_objective: self.career_objective.unwrap_or_default(),
            skills,
            education,
            certifications,
            experience,
            projects,
            achievements: self.achievements.unwrap_or_default(),
            languages,
        })
    }
}

/// Read-through cache over the résumé JSON file.
///
/// Constructed once in `main` and shared through `AppState` — there is no
/// process-global singleton. The document is loaded and validated on first
/// `get()` and cached for the life of the store; `clear_cache()` forces the
/// next `get()` to reload from disk.
pub struct ResumeStore {
    path: PathBuf,
    cache: RwLock<Option<Arc<ResumeDocument>>>,
}

impl ResumeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(None),
        }
    }

    /// Returns the cached document, loading and validating it on first use.
    /// Never returns a partially valid document.
    pub fn get(&self) -> Result<Arc<ResumeDocument>, DataIntegrityError> {
        if let Some(doc) = self.cache.read().expect("resume cache lock poisoned").as_ref() {
            return Ok(Arc::clone(doc));
        }

        let text = fs::read_to_string(&self.path)?;
        let raw: RawResume = serde_json::from_str(&text)?;
        let doc = Arc::new(raw.validate()?);

        debug!(path = %self.path.display(), "resume loaded and validated");

        *self.cache.write().expect("resume cache lock poisoned") = Some(Arc::clone(&doc));
        Ok(doc)
    }

    /// Drops the cached document so the next `get()` reloads from disk.
    pub fn clear_cache(&self) {
        *self.cache.write().expect("resume cache lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_resume() -> Value {
        json!({
            "personalInfo": {
                "fullName": "Jordan Reyes",
                "phone": "+1 555 010 0199",
                "email": "jordan@example.com",
                "dateOfBirth": "1995-04-12",
                "location": "Lisbon, Portugal",
            },
            "careerObjective": "Build reliable web platforms.",
            "skills": [
                { "category": "Backend", "items": ["Rust", "PostgreSQL"] }
            ],
            "education": [
                { "degree": "BSc Computer Science", "institution": "IST Lisbon", "year": 2017 }
            ],
            "certifications": [
                { "title": "AWS Solutions Architect", "issuer": "AWS", "year": 2021 }
            ],
            "experience": [
                {
                    "role": "Engineer",
                    "company": "Acme",
                    "startDate": "2022-01-01",
                    "endDate": null,
                    "responsibilities": ["Built APIs"],
                }
            ],
            "projects": [
                { "title": "Ledger", "description": "Double-entry bookkeeping service." }
            ],
            "achievements": ["Speaker at RustConf 2023"],
            "languages": [
                { "language": "English", "proficiency": "Fluent" }
            ],
        })
    }

    fn store_for(value: &Value) -> (ResumeStore, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        let store = ResumeStore::new(file.path());
        (store, file)
    }

    #[test]
    fn test_get_returns_validated_document() {
        let (store, _file) = store_for(&sample_resume());
        let doc = store.get().unwrap();
        assert_eq!(doc.personal_info.full_name, "Jordan Reyes");
        assert_eq!(doc.skills.len(), 1);
    }

    #[test]
    fn test_get_caches_document() {
        let (store, _file) = store_for(&sample_resume());
        let first = store.get().unwrap();
        let second = store.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clear_cache_reloads_from_disk() {
        let (store, file) = store_for(&sample_resume());
        store.get().unwrap();

        let mut updated = sample_resume();
        updated["personalInfo"]["fullName"] = json!("Sam Okafor");
        fs::write(file.path(), updated.to_string()).unwrap();

        // Still cached until cleared.
        assert_eq!(store.get().unwrap().personal_info.full_name, "Jordan Reyes");
        store.clear_cache();
        assert_eq!(store.get().unwrap().personal_info.full_name, "Sam Okafor");
    }

    #[test]
    fn test_missing_required_sections_fail() {
        for section in [
            "personalInfo",
            "skills",
            "education",
            "experience",
            "certifications",
            "projects",
            "languages",
        ] {
            let mut value = sample_resume();
            value.as_object_mut().unwrap().remove(section);
            let (store, _file) = store_for(&value);
            let err = store.get().unwrap_err();
            assert!(
                matches!(err, DataIntegrityError::MissingSection(name) if name == section),
                "expected missing-section error for {section}, got: {err}"
            );
        }
    }

    #[test]
    fn test_empty_skills_fail() {
        let mut value = sample_resume();
        value["skills"] = json!([]);
        let (store, _file) = store_for(&value);
        assert!(matches!(
            store.get().unwrap_err(),
            DataIntegrityError::EmptySection("skills")
        ));
    }

    #[test]
    fn test_invalid_json_fails() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let store = ResumeStore::new(file.path());
        assert!(matches!(store.get().unwrap_err(), DataIntegrityError::Parse(_)));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let mut value = sample_resume();
        value["hobbies"] = json!(["chess"]);
        let (store, _file) = store_for(&value);
        assert!(matches!(store.get().unwrap_err(), DataIntegrityError::Parse(_)));
    }

    #[test]
    fn test_missing_file_fails() {
        let store = ResumeStore::new("/nonexistent/resume.json");
        assert!(matches!(store.get().unwrap_err(), DataIntegrityError::Io(_)));
    }

    #[test]
    fn test_career_objective_defaults_to_empty() {
        let mut value = sample_resume();
        value.as_object_mut().unwrap().remove("careerObjective");
        let (store, _file) = store_for(&value);
        assert_eq!(store.get().unwrap().career_objective, "");
    }
}
