use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{object_id, timestamp};
use crate::models::validation::{ValidationError, Validator};
use crate::services::db::{SlugDocument, StoredDocument};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", default, with = "object_id")]
    #[schema(value_type = String, example = "65f1c2a9e4b0a1b2c3d4e5f6")]
    pub id: ObjectId,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub short_description: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub cover_image: String,
    pub thumbnail_image: String,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    pub timeline: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default)]
    pub related_projects: Vec<RelatedProject>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,
    #[serde(with = "timestamp::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct GalleryImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Denormalized pointer to another project, shown as a card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct RelatedProject {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub image: String,
}

fn published_by_default() -> bool {
    true
}

impl Project {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::new("Project");
        validator
            .require("slug", &self.slug)
            .require("title", &self.title)
            .require("category", &self.category)
            .require("shortDescription", &self.short_description)
            .require("coverImage", &self.cover_image)
            .require("thumbnailImage", &self.thumbnail_image)
            .require("timeline", &self.timeline)
            .require("role", &self.role);
        for (index, image) in self.gallery.iter().enumerate() {
            validator.require(&format!("gallery.{index}.url"), &image.url);
        }
        for (index, related) in self.related_projects.iter().enumerate() {
            validator
                .require(&format!("relatedProjects.{index}.slug"), &related.slug)
                .require(&format!("relatedProjects.{index}.title"), &related.title)
                .require(&format!("relatedProjects.{index}.category"), &related.category)
                .require(&format!("relatedProjects.{index}.image"), &related.image);
        }
        validator.finish()
    }
}

impl StoredDocument for Project {
    const COLLECTION: &'static str = "projects";
}

impl SlugDocument for Project {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn is_published(&self) -> bool {
        self.is_published
    }

    fn sort_document() -> Document {
        doc! { "createdAt": -1 }
    }

    fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/**
 * body of POST /projects
 * required fields may be absent here so validation can report them
 */
#[derive(Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub slug: String,
    pub title: String,
    pub category: String,
    pub short_description: String,
    pub description: Vec<String>,
    pub features: Vec<String>,
    pub technologies: Vec<String>,
    pub cover_image: String,
    pub thumbnail_image: String,
    pub gallery: Vec<GalleryImage>,
    pub client: Option<String>,
    pub timeline: String,
    pub role: String,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub related_projects: Vec<RelatedProject>,
    pub is_published: Option<bool>,
}

impl NewProject {
    pub fn into_project(self, id: ObjectId, now: DateTime<Utc>) -> Project {
        Project {
            id,
            slug: self.slug,
            title: self.title,
            category: self.category,
            short_description: self.short_description,
            description: self.description,
            features: self.features,
            technologies: self.technologies,
            cover_image: self.cover_image,
            thumbnail_image: self.thumbnail_image,
            gallery: self.gallery,
            client: self.client,
            timeline: self.timeline,
            role: self.role,
            live_url: self.live_url,
            github_url: self.github_url,
            related_projects: self.related_projects,
            is_published: self.is_published.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }
}

/**
 * body of PUT /projects/{slug}
 * only the supplied top-level fields are merged, unknown fields are dropped
 */
#[derive(Deserialize, Clone, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub thumbnail_image: Option<String>,
    pub gallery: Option<Vec<GalleryImage>>,
    pub client: Option<String>,
    pub timeline: Option<String>,
    pub role: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub related_projects: Option<Vec<RelatedProject>>,
    pub is_published: Option<bool>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(slug) = self.slug {
            project.slug = slug;
        }
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(category) = self.category {
            project.category = category;
        }
        if let Some(short_description) = self.short_description {
            project.short_description = short_description;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(features) = self.features {
            project.features = features;
        }
        if let Some(technologies) = self.technologies {
            project.technologies = technologies;
        }
        if let Some(cover_image) = self.cover_image {
            project.cover_image = cover_image;
        }
        if let Some(thumbnail_image) = self.thumbnail_image {
            project.thumbnail_image = thumbnail_image;
        }
        if let Some(gallery) = self.gallery {
            project.gallery = gallery;
        }
        if let Some(client) = self.client {
            project.client = Some(client);
        }
        if let Some(timeline) = self.timeline {
            project.timeline = timeline;
        }
        if let Some(role) = self.role {
            project.role = role;
        }
        if let Some(live_url) = self.live_url {
            project.live_url = Some(live_url);
        }
        if let Some(github_url) = self.github_url {
            project.github_url = Some(github_url);
        }
        if let Some(related_projects) = self.related_projects {
            project.related_projects = related_projects;
        }
        if let Some(is_published) = self.is_published {
            project.is_published = is_published;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewProject {
        serde_json::from_value(serde_json::json!({
            "slug": "job-finder-app",
            "title": "Job Finder App",
            "category": "Mobile App",
            "shortDescription": "Connects job seekers with employers.",
            "features": ["Resume builder", "Interview scheduling"],
            "coverImage": "/job-finder-cover.png",
            "thumbnailImage": "/modern-finance-app.png",
            "timeline": "3 months (Q2 2023)",
            "role": "Lead Product Designer"
        }))
        .unwrap()
    }

    #[test]
    fn new_projects_are_published_by_default() {
        let project = draft().into_project(ObjectId::new(), timestamp::now());
        assert!(project.is_published);
        assert!(project.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported_by_path() {
        let mut incomplete = draft();
        incomplete.role.clear();
        incomplete.gallery = vec![GalleryImage {
            url: String::new(),
            caption: Some("Home".into()),
        }];
        let err = incomplete
            .into_project(ObjectId::new(), timestamp::now())
            .validate()
            .unwrap_err();
        assert_eq!(
            err.violations,
            vec![
                "role: Path `role` is required.".to_string(),
                "gallery.0.url: Path `gallery.0.url` is required.".to_string(),
            ]
        );
    }

    #[test]
    fn patch_touches_only_supplied_fields() {
        let mut project = draft().into_project(ObjectId::new(), timestamp::now());
        let patch: ProjectPatch = serde_json::from_value(serde_json::json!({
            "title": "Job Finder App v2",
            "unknownField": 42
        }))
        .unwrap();
        patch.apply(&mut project);

        assert_eq!(project.title, "Job Finder App v2");
        assert_eq!(project.category, "Mobile App");
        assert_eq!(project.features.len(), 2);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let id = ObjectId::parse_str("65f1c2a9e4b0a1b2c3d4e5f6").unwrap();
        let project = draft().into_project(id, timestamp::now());
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["_id"], "65f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(json["shortDescription"], "Connects job seekers with employers.");
        assert!(json.get("client").is_none());
        assert!(json["createdAt"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn stores_object_id_and_dates_natively() {
        let project = draft().into_project(ObjectId::new(), timestamp::now());
        let raw = mongodb::bson::to_raw_document_buf(&project).unwrap();
        let stored = raw.to_document().unwrap();
        assert_eq!(stored.get_object_id("_id").unwrap(), project.id);
        assert_eq!(
            stored.get_datetime("createdAt").unwrap().timestamp_millis(),
            project.created_at.timestamp_millis()
        );

        let back: Project = mongodb::bson::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(back, project);
    }
}
