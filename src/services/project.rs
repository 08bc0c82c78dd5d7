use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::models::timestamp;
use crate::services::db::ListFilter;
use crate::services::error::ResourceError;
use crate::AppState;

const NOT_FOUND: &str = "Project not found";

/// Confirmation body returned after a hard delete.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Deleted {
    #[schema(value_type = String)]
    pub message: &'static str,
}

/// Every published project, newest first.
pub async fn list_projects(state: &AppState) -> Result<Vec<Project>, ResourceError> {
    Ok(state.projects.find(&ListFilter::published(), None).await?)
}

/// Unpublished projects are still reachable by slug.
pub async fn get_project(state: &AppState, slug: &str) -> Result<Project, ResourceError> {
    state
        .projects
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))
}

pub async fn create_project(state: &AppState, body: NewProject) -> Result<Project, ResourceError> {
    let project = body.into_project(ObjectId::new(), timestamp::now());
    project.validate()?;
    state.projects.insert(&project).await?;
    info!(slug = %project.slug, "project created");
    Ok(project)
}

/**
 * shallow merge of the supplied fields onto the stored project
 * the merged document is validated again before it replaces the old one
 */
pub async fn update_project(
    state: &AppState,
    slug: &str,
    patch: ProjectPatch,
) -> Result<Project, ResourceError> {
    let mut project = get_project(state, slug).await?;
    patch.apply(&mut project);
    project.updated_at = timestamp::now();
    project.validate()?;

    let stored = state
        .projects
        .replace_by_slug(slug, &project)
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))?;
    info!(slug, "project updated");
    Ok(stored)
}

pub async fn delete_project(state: &AppState, slug: &str) -> Result<Deleted, ResourceError> {
    state
        .projects
        .delete_by_slug(slug)
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))?;
    info!(slug, "project deleted");
    Ok(Deleted {
        message: "Project deleted successfully",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::GalleryImage;

    fn sample(slug: &str) -> NewProject {
        NewProject {
            slug: slug.to_string(),
            title: "Job Finder".into(),
            category: "Mobile App".into(),
            short_description: "Find jobs fast".into(),
            cover_image: "/cover.png".into(),
            thumbnail_image: "/thumb.png".into(),
            timeline: "3 months".into(),
            role: "Designer".into(),
            ..NewProject::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let state = AppState::in_memory();
        let created = create_project(&state, sample("job-finder-app")).await.unwrap();
        assert!(created.is_published);
        let body = serde_json::to_value(&created).unwrap();
        assert_eq!(body["_id"], created.id.to_hex());

        let fetched = get_project(&state, "job-finder-app").await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn missing_required_fields_are_reported_together() {
        let state = AppState::in_memory();
        let body = NewProject {
            title: String::new(),
            gallery: vec![GalleryImage {
                url: String::new(),
                caption: None,
            }],
            ..sample("broken")
        };
        let err = create_project(&state, body).await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ResourceError::Validation(_)));
        assert!(message.contains("Path `title` is required."));
        assert!(message.contains("Path `gallery.0.url` is required."));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let state = AppState::in_memory();
        let created = create_project(&state, sample("job-finder-app")).await.unwrap();

        let patch = ProjectPatch {
            title: Some("Job Finder 2".into()),
            ..ProjectPatch::default()
        };
        let updated = update_project(&state, "job-finder-app", patch).await.unwrap();
        assert_eq!(updated.title, "Job Finder 2");
        assert_eq!(updated.category, created.category);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn update_cannot_blank_a_required_field() {
        let state = AppState::in_memory();
        create_project(&state, sample("job-finder-app")).await.unwrap();

        let patch = ProjectPatch {
            role: Some(String::new()),
            ..ProjectPatch::default()
        };
        let err = update_project(&state, "job-finder-app", patch).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));
        assert_eq!(get_project(&state, "job-finder-app").await.unwrap().role, "Designer");
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let state = AppState::in_memory();
        create_project(&state, sample("gone")).await.unwrap();

        assert_eq!(
            delete_project(&state, "gone").await.unwrap().message,
            "Project deleted successfully"
        );
        let err = delete_project(&state, "gone").await.unwrap_err();
        assert_eq!(err.to_string(), "Project not found");
    }

    #[tokio::test]
    async fn listing_hides_unpublished_but_get_does_not() {
        let state = AppState::in_memory();
        create_project(&state, sample("public")).await.unwrap();
        let hidden = NewProject {
            is_published: Some(false),
            ..sample("hidden")
        };
        create_project(&state, hidden).await.unwrap();

        let listed = list_projects(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].slug, "public");
        assert!(get_project(&state, "hidden").await.is_ok());
    }
}
