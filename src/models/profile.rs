use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::bilingual::{Bilingual, Blank, Language};
use crate::models::{object_id, timestamp};
use crate::models::validation::{ValidationError, Validator};
use crate::services::db::StoredDocument;

/// The portfolio owner's profile. Exactly one is expected to exist.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(rename = "_id", with = "object_id")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
    pub title: Bilingual<String>,
    pub location: Bilingual<String>,
    pub avatar: String,
    pub email: String,
    pub phone: String,
    pub working_hours: Bilingual<String>,
    pub available_for_work: bool,
    pub badges: Bilingual<Vec<String>>,
    pub bio: Bilingual<String>,
    pub social: Vec<SocialLink>,
    pub focus: Bilingual<Vec<String>>,
    pub languages: Vec<LanguageSkill>,
    pub interests: Bilingual<Vec<String>>,
    pub experience: Bilingual<Vec<ExperienceItem>>,
    pub credentials: Bilingual<Credentials>,
    pub technical_skills: Bilingual<TechnicalSkills>,
    pub navigation: Bilingual<Vec<NavItem>>,
    pub meta: Bilingual<Meta>,
    #[serde(with = "timestamp::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::date")]
    pub updated_at: DateTime<Utc>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            id: ObjectId::new(),
            name: String::new(),
            title: Bilingual::default(),
            location: Bilingual::default(),
            avatar: String::new(),
            email: String::new(),
            phone: String::new(),
            working_hours: Bilingual::default(),
            available_for_work: true,
            badges: Bilingual::default(),
            bio: Bilingual::default(),
            social: Vec::new(),
            focus: Bilingual::default(),
            languages: Vec::new(),
            interests: Bilingual::default(),
            experience: Bilingual::default(),
            credentials: Bilingual::default(),
            technical_skills: Bilingual::default(),
            navigation: Bilingual::default(),
            meta: Bilingual::default(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct LanguageSkill {
    pub name: String,
    pub proficiency: String,
    pub level: u32,
    #[serde(default)]
    pub flag: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Credentials {
    pub certifications: Vec<Certification>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub logo: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSkills {
    pub design: Vec<String>,
    pub development: Vec<String>,
    pub ux_methods: Vec<String>,
    pub soft_skills: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct Meta {
    pub title: String,
    pub description: String,
}

impl Blank for Credentials {
    fn is_blank(&self) -> bool {
        self.certifications.is_empty() && self.education.is_empty() && self.skills.is_empty()
    }
}

impl Blank for TechnicalSkills {
    fn is_blank(&self) -> bool {
        self.design.is_empty()
            && self.development.is_empty()
            && self.ux_methods.is_empty()
            && self.soft_skills.is_empty()
    }
}

impl Blank for Meta {
    fn is_blank(&self) -> bool {
        self.title.is_blank() && self.description.is_blank()
    }
}

impl StoredDocument for Profile {
    const COLLECTION: &'static str = "profiles";
}

impl Profile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new("Profile")
            .require("name", &self.name)
            .require("email", &self.email)
            .finish()
    }

    /**
     * flatten every bilingual pair into the requested language
     */
    pub fn localize(&self, language: Language) -> LocalizedProfile {
        LocalizedProfile {
            language,
            name: self.name.clone(),
            title: self.title.resolve(language),
            location: self.location.resolve(language),
            avatar: self.avatar.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            working_hours: self.working_hours.resolve(language),
            available_for_work: self.available_for_work,
            badges: self.badges.resolve(language),
            bio: self.bio.resolve(language),
            social: self.social.clone(),
            focus: self.focus.resolve(language),
            languages: self.languages.clone(),
            interests: self.interests.resolve(language),
            experience: self.experience.resolve(language),
            credentials: self.credentials.resolve(language),
            technical_skills: self.technical_skills.resolve(language),
            navigation: self.navigation.resolve(language),
            meta: self.meta.resolve(language),
            updated_at: self.updated_at,
        }
    }
}

/// Single-language view of the profile, as a page renders it.
#[derive(Serialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedProfile {
    pub language: Language,
    pub name: String,
    pub title: String,
    pub location: String,
    pub avatar: String,
    pub email: String,
    pub phone: String,
    pub working_hours: String,
    pub available_for_work: bool,
    pub badges: Vec<String>,
    pub bio: String,
    pub social: Vec<SocialLink>,
    pub focus: Vec<String>,
    pub languages: Vec<LanguageSkill>,
    pub interests: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub credentials: Credentials,
    pub technical_skills: TechnicalSkills,
    pub navigation: Vec<NavItem>,
    pub meta: Meta,
    #[serde(with = "timestamp::date")]
    pub updated_at: DateTime<Utc>,
}

/**
 * body of PUT /profile
 * every top-level field is optional, absent ones keep their stored value
 */
#[derive(Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub title: Option<Bilingual<String>>,
    pub location: Option<Bilingual<String>>,
    pub avatar: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub working_hours: Option<Bilingual<String>>,
    pub available_for_work: Option<bool>,
    pub badges: Option<Bilingual<Vec<String>>>,
    pub bio: Option<Bilingual<String>>,
    pub social: Option<Vec<SocialLink>>,
    pub focus: Option<Bilingual<Vec<String>>>,
    pub languages: Option<Vec<LanguageSkill>>,
    pub interests: Option<Bilingual<Vec<String>>>,
    pub experience: Option<Bilingual<Vec<ExperienceItem>>>,
    pub credentials: Option<Bilingual<Credentials>>,
    pub technical_skills: Option<Bilingual<TechnicalSkills>>,
    pub navigation: Option<Bilingual<Vec<NavItem>>>,
    pub meta: Option<Bilingual<Meta>>,
}

impl ProfilePatch {
    /**
     * only the supplied paths are checked, so an upsert with a partial
     * body still creates the singleton
     */
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new("Profile");
        if let Some(name) = &self.name {
            validator.require("name", name);
        }
        if let Some(email) = &self.email {
            validator.require("email", email);
        }
        validator.finish()
    }

    pub fn apply(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(title) = self.title {
            profile.title = title;
        }
        if let Some(location) = self.location {
            profile.location = location;
        }
        if let Some(avatar) = self.avatar {
            profile.avatar = avatar;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(working_hours) = self.working_hours {
            profile.working_hours = working_hours;
        }
        if let Some(available_for_work) = self.available_for_work {
            profile.available_for_work = available_for_work;
        }
        if let Some(badges) = self.badges {
            profile.badges = badges;
        }
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(social) = self.social {
            profile.social = social;
        }
        if let Some(focus) = self.focus {
            profile.focus = focus;
        }
        if let Some(languages) = self.languages {
            profile.languages = languages;
        }
        if let Some(interests) = self.interests {
            profile.interests = interests;
        }
        if let Some(experience) = self.experience {
            profile.experience = experience;
        }
        if let Some(credentials) = self.credentials {
            profile.credentials = credentials;
        }
        if let Some(technical_skills) = self.technical_skills {
            profile.technical_skills = technical_skills;
        }
        if let Some(navigation) = self.navigation {
            profile.navigation = navigation;
        }
        if let Some(meta) = self.meta {
            profile.meta = meta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> Profile {
        serde_json::from_value(json!({
            "_id": "65f1c2a9e4b0a1b2c3d4e5f6",
            "name": "Huy",
            "email": "huy@example.com",
            "title": { "en": "Product Designer", "vi": "Nhà thiết kế sản phẩm" },
            "bio": { "en": "I design things.", "vi": "" },
            "technicalSkills": {
                "en": { "design": ["Figma"], "uxMethods": ["Interviews"] },
                "vi": { "design": ["Figma"] }
            },
            "navigation": {
                "en": [{ "label": "Home", "href": "/" }],
                "vi": [{ "label": "Trang chủ", "href": "/" }]
            },
            "createdAt": "2024-01-01T00:00:00.000Z",
            "updatedAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn missing_fields_take_schema_defaults() {
        let profile = profile();
        assert!(profile.available_for_work);
        assert!(profile.social.is_empty());
        assert_eq!(profile.location, Bilingual::default());
    }

    #[test]
    fn localizes_each_bilingual_field() {
        let vi = profile().localize(Language::Vi);
        assert_eq!(vi.title, "Nhà thiết kế sản phẩm");
        assert_eq!(vi.navigation[0].label, "Trang chủ");
        assert_eq!(vi.technical_skills.design, vec!["Figma".to_string()]);
        // blank Vietnamese bio falls back to English
        assert_eq!(vi.bio, "I design things.");

        let body = serde_json::to_value(&vi).unwrap();
        assert_eq!(body["language"], "vi");
        assert_eq!(body["workingHours"], "");
    }

    #[test]
    fn patch_validation_only_checks_supplied_paths() {
        assert!(ProfilePatch::default().validate().is_ok());

        let blank_name = ProfilePatch {
            name: Some(String::new()),
            ..ProfilePatch::default()
        };
        assert_eq!(
            blank_name.validate().unwrap_err().to_string(),
            "Profile validation failed: name: Path `name` is required."
        );
    }

    #[test]
    fn patch_replaces_whole_bilingual_pairs() {
        let mut profile = profile();
        let patch: ProfilePatch = serde_json::from_value(json!({
            "title": { "en": "Design Lead", "vi": "Trưởng nhóm thiết kế" },
            "availableForWork": false
        }))
        .unwrap();
        patch.apply(&mut profile);

        assert_eq!(profile.title.en, "Design Lead");
        assert!(!profile.available_for_work);
        assert_eq!(profile.email, "huy@example.com");
    }
}
