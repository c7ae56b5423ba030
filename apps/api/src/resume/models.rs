#![allow(dead_code)]

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    #[serde(default)]
    pub father_name: Option<String>,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
    /// ISO 8601: YYYY-MM-DD
    pub date_of_birth: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: u16,
}

/// Certification year as published: either a bare year or a range
/// such as "2023-Present".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CertificationYear {
    Number(u16),
    Text(String),
}

impl fmt::Display for CertificationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CertificationYear::Number(year) => write!(f, "{year}"),
            CertificationYear::Text(text) => write!(f, "{text}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub title: String,
    pub issuer: String,
    pub year: CertificationYear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub start_date: NaiveDate,
    /// `None` means the role is current and renders as "Present".
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Fluent,
    Native,
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Fluent => "Fluent",
            Proficiency::Native => "Native",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub language: String,
    pub proficiency: Proficiency,
}

/// The validated résumé document. Constructed only through
/// [`crate::resume::store::ResumeStore`], which enforces the
/// required-section invariants at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub career_objective: String,
    pub skills: Vec<SkillCategory>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub languages: Vec<Language>,
}
