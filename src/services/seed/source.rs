use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::models::bilingual::Bilingual;
use crate::models::profile::{
    Credentials, ExperienceItem, LanguageSkill, Meta, NavItem, Profile, SocialLink,
    TechnicalSkills,
};

/// The frontend's `portfolio-data.json`, one half per language.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioSource {
    pub en: LanguageSource,
    pub vi: LanguageSource,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageSource {
    pub personal: Personal,
    pub about: About,
    pub experience: Vec<ExperienceItem>,
    pub credentials: Credentials,
    pub technical_skills: TechnicalSkills,
    pub navigation: Vec<NavItem>,
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Personal {
    pub name: String,
    pub title: String,
    pub location: String,
    pub avatar: String,
    pub email: String,
    pub phone: String,
    pub working_hours: String,
    pub available_for_work: Option<bool>,
    pub badges: Vec<String>,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct About {
    pub bio: String,
    pub focus: Vec<String>,
    pub languages: Vec<LanguageSkill>,
    pub interests: Vec<String>,
}

fn pair<T>(en: T, vi: T) -> Bilingual<T> {
    Bilingual::new(en, vi)
}

impl PortfolioSource {
    /**
     * project both halves onto the stored profile
     * language-neutral fields (name, contacts, social, languages) come from `en`
     */
    pub fn to_profile(&self, id: ObjectId, now: DateTime<Utc>) -> Profile {
        let (en, vi) = (&self.en, &self.vi);
        Profile {
            id,
            name: en.personal.name.clone(),
            title: pair(en.personal.title.clone(), vi.personal.title.clone()),
            location: pair(en.personal.location.clone(), vi.personal.location.clone()),
            avatar: en.personal.avatar.clone(),
            email: en.personal.email.clone(),
            phone: en.personal.phone.clone(),
            working_hours: pair(
                en.personal.working_hours.clone(),
                vi.personal.working_hours.clone(),
            ),
            available_for_work: en.personal.available_for_work.unwrap_or(true),
            badges: pair(en.personal.badges.clone(), vi.personal.badges.clone()),
            bio: pair(en.about.bio.clone(), vi.about.bio.clone()),
            social: en.personal.social.clone(),
            focus: pair(en.about.focus.clone(), vi.about.focus.clone()),
            languages: en.about.languages.clone(),
            interests: pair(en.about.interests.clone(), vi.about.interests.clone()),
            experience: pair(en.experience.clone(), vi.experience.clone()),
            credentials: pair(en.credentials.clone(), vi.credentials.clone()),
            technical_skills: pair(en.technical_skills.clone(), vi.technical_skills.clone()),
            navigation: pair(en.navigation.clone(), vi.navigation.clone()),
            meta: pair(en.meta.clone(), vi.meta.clone()),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::timestamp;
    use serde_json::json;

    #[test]
    fn builds_profile_from_both_halves() {
        let source: PortfolioSource = serde_json::from_value(json!({
            "en": {
                "personal": {
                    "name": "Huy",
                    "title": "Designer",
                    "email": "huy@example.com",
                    "social": [{ "platform": "GitHub", "url": "https://github.com/huy", "icon": "github" }]
                },
                "about": { "bio": "Hello", "languages": [{ "name": "English", "proficiency": "Fluent", "level": 90 }] },
                "navigation": [{ "label": "Home", "href": "/" }],
                "unrelated": { "ignored": true }
            },
            "vi": {
                "personal": { "name": "Huy", "title": "Nhà thiết kế" },
                "about": { "bio": "Xin chào" },
                "navigation": [{ "label": "Trang chủ", "href": "/" }]
            }
        }))
        .unwrap();

        let profile = source.to_profile(ObjectId::new(), timestamp::now());
        assert_eq!(profile.name, "Huy");
        assert_eq!(profile.title.vi, "Nhà thiết kế");
        assert_eq!(profile.bio.en, "Hello");
        assert_eq!(profile.navigation.vi[0].label, "Trang chủ");
        assert_eq!(profile.languages[0].level, 90);
        assert_eq!(profile.social.len(), 1);
        assert!(profile.available_for_work);
        assert!(profile.validate().is_ok());
    }
}
