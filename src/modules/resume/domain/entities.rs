use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub period: String,
    pub description: String,
}

/// The whole résumé as one document. Saved and replaced as a unit; there is
/// no partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub name: String,
    pub about: String,
    pub experiences: Vec<Experience>,
    pub soft_skills: Vec<String>,
    pub hard_skills_design: Vec<String>,
    pub hard_skills_video: Vec<String>,
}

/// The document a fresh install renders until the owner saves their own.
pub fn default_resume() -> ResumeData {
    ResumeData {
        name: "Alex Moreira".to_string(),
        about: "Graphic designer and video editor focused on performance \
                creatives for digital campaigns."
            .to_string(),
        experiences: vec![
            Experience {
                id: Uuid::new_v4(),
                company: "Freelance".to_string(),
                period: "2021 - present".to_string(),
                description: "Banners, static stories and motion videos for \
                              e-commerce and launch campaigns."
                    .to_string(),
            },
            Experience {
                id: Uuid::new_v4(),
                company: "Studio Nove".to_string(),
                period: "2019 - 2021".to_string(),
                description: "In-house designer for paid-media creatives and \
                              landing pages."
                    .to_string(),
            },
        ],
        soft_skills: vec![
            "Communication".to_string(),
            "Deadline management".to_string(),
            "Creative direction".to_string(),
        ],
        hard_skills_design: vec![
            "Photoshop".to_string(),
            "Illustrator".to_string(),
            "Figma".to_string(),
        ],
        hard_skills_video: vec![
            "Premiere".to_string(),
            "After Effects".to_string(),
            "CapCut".to_string(),
        ],
    }
}
