pub mod bilingual;
pub mod blog_post;
pub mod object_id;
pub mod profile;
pub mod project;
pub mod timestamp;
pub mod validation;
