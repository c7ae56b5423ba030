use crate::resume::models::ResumeDocument;

/// Flattens the structured résumé into the text block embedded in the system
/// prompt. Output is deterministic for identical input: section order and
/// separators are fixed, and optional sections with no entries are omitted
/// entirely rather than rendered empty.
pub fn format_resume_context(resume: &ResumeDocument) -> String {
    let mut sections: Vec<String> = Vec::new();

    let info = &resume.personal_info;
    sections.push(format!(
        "PERSONAL INFORMATION:\nName: {}\nEmail: {}\nPhone: {}\nLocation: {}\nDOB: {}",
        info.full_name, info.email, info.phone, info.location, info.date_of_birth
    ));

    if !resume.career_objective.is_empty() {
        sections.push(format!("CAREER OBJECTIVE:\n{}", resume.career_objective));
    }

    let skills = resume
        .skills
        .iter()
        .map(|cat| format!("{}: {}", cat.category, cat.items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");
    sections.push(format!("SKILLS:\n{skills}"));

    if !resume.education.is_empty() {
        let entries = resume
            .education
            .iter()
            .map(|edu| format!("- {} from {} ({})", edu.degree, edu.institution, edu.year))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("EDUCATION:\n{entries}"));
    }

    if !resume.certifications.is_empty() {
        let entries = resume
            .certifications
            .iter()
            .map(|cert| format!("- {} from {} ({})", cert.title, cert.issuer, cert.year))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("CERTIFICATIONS:\n{entries}"));
    }

    if !resume.experience.is_empty() {
        let entries = resume
            .experience
            .iter()
            .map(|exp| {
                let end = exp
                    .end_date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "Present".to_string());
                let mut details =
                    format!("- {} at {} ({} to {end})", exp.role, exp.company, exp.start_date);
                if !exp.responsibilities.is_empty() {
                    details.push_str(&format!(
                        "\n  Responsibilities: {}",
                        exp.responsibilities.join("; ")
                    ));
                }
                if !exp.technologies.is_empty() {
                    details.push_str(&format!(
                        "\n  Technologies: {}",
                        exp.technologies.join(", ")
                    ));
                }
                details
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        sections.push(format!("PROFESSIONAL EXPERIENCE:\n{entries}"));
    }

    if !resume.projects.is_empty() {
        let entries = resume
            .projects
            .iter()
            .map(|proj| {
                let mut details = format!("- {}: {}", proj.title, proj.description);
                if !proj.features.is_empty() {
                    details.push_str(&format!("\n  Features: {}", proj.features.join(", ")));
                }
                if !proj.technologies.is_empty() {
                    details.push_str(&format!(
                        "\n  Technologies: {}",
                        proj.technologies.join(", ")
                    ));
                }
                details
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        sections.push(format!("PROJECTS:\n{entries}"));
    }

    if !resume.languages.is_empty() {
        let entries = resume
            .languages
            .iter()
            .map(|lang| format!("- {} ({})", lang.language, lang.proficiency))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("LANGUAGES:\n{entries}"));
    }

    if !resume.achievements.is_empty() {
        let entries = resume
            .achievements
            .iter()
            .map(|ach| format!("- {ach}"))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("ACHIEVEMENTS:\n{entries}"));
    }

    sections.join("\n\n")
}
