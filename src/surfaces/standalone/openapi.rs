use crate::models::bilingual::Language;
use crate::models::blog_post::{BlogPost, BlogPostPatch, NewBlogPost};
use crate::models::profile::{
    Certification, Credentials, Education, ExperienceItem, LanguageSkill, LocalizedProfile, Meta,
    NavItem, Profile, ProfilePatch, SocialLink, TechnicalSkills,
};
use crate::models::project::{GalleryImage, NewProject, Project, ProjectPatch, RelatedProject};
use crate::services::blog::BlogListing;
use crate::services::error::ErrorBody;
use crate::services::health::HealthReport;
use crate::services::pagination::Pagination;
use crate::services::project::Deleted;

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "0.1.0",
        description = "Bilingual (en/vi) portfolio content: projects, blog posts and the owner's profile."
    ),
    tags(
        (name = "Health", description = "Database readiness"),
        (name = "Projects", description = "Portfolio case studies"),
        (name = "Blog", description = "Blog posts with tag filter and pagination"),
        (name = "Profile", description = "The single bilingual profile")
    ),
    paths(
        super::health_routes::health_check,
        super::project_routes::list,
        super::project_routes::create,
        super::project_routes::show,
        super::project_routes::update,
        super::project_routes::remove,
        super::blog_routes::list,
        super::blog_routes::create,
        super::blog_routes::show,
        super::blog_routes::update,
        super::blog_routes::remove,
        super::profile_routes::show,
        super::profile_routes::upsert,
        super::profile_routes::localized,
    ),
    components(schemas(
        Project, GalleryImage, RelatedProject, NewProject, ProjectPatch,
        BlogPost, NewBlogPost, BlogPostPatch, BlogListing, Pagination,
        Profile, ProfilePatch, LocalizedProfile, Language,
        SocialLink, LanguageSkill, ExperienceItem, Credentials, Certification, Education,
        TechnicalSkills, NavItem, Meta,
        HealthReport, Deleted, ErrorBody,
    ))
)]
pub struct ApiDoc;
