use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::models::bilingual::{Language, UnsupportedLanguage};
use crate::models::profile::{LocalizedProfile, Profile, ProfilePatch};
use crate::models::timestamp;
use crate::services::error::ResourceError;
use crate::AppState;

const NOT_FOUND: &str = "Profile not found";

pub async fn get_profile(state: &AppState) -> Result<Profile, ResourceError> {
    state
        .profiles
        .first()
        .await?
        .ok_or_else(|| ResourceError::not_found(NOT_FOUND))
}

/// `language` comes straight from the path, e.g. `"vi"`.
pub async fn get_localized_profile(
    state: &AppState,
    language: &str,
) -> Result<LocalizedProfile, ResourceError> {
    let language: Language = language
        .parse()
        .map_err(|err: UnsupportedLanguage| ResourceError::not_found(err.to_string()))?;
    Ok(get_profile(state).await?.localize(language))
}

/**
 * upsert of the singleton: merges into the stored profile,
 * or starts a fresh one when the collection is empty
 */
pub async fn update_profile(state: &AppState, patch: ProfilePatch) -> Result<Profile, ResourceError> {
    patch.validate()?;
    let now = timestamp::now();
    let mut profile = match state.profiles.first().await? {
        Some(profile) => profile,
        None => {
            info!("no profile stored yet, creating one");
            Profile {
                id: ObjectId::new(),
                created_at: now,
                ..Profile::default()
            }
        }
    };
    patch.apply(&mut profile);
    profile.updated_at = now;

    let saved = state.profiles.save(&profile).await?;
    info!("profile saved");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bilingual::Bilingual;

    fn named(name: &str) -> ProfilePatch {
        ProfilePatch {
            name: Some(name.to_string()),
            email: Some("huy@example.com".into()),
            title: Some(Bilingual::new("Designer".to_string(), "Nhà thiết kế".to_string())),
            ..ProfilePatch::default()
        }
    }

    #[tokio::test]
    async fn empty_collection_is_not_found() {
        let state = AppState::in_memory();
        let err = get_profile(&state).await.unwrap_err();
        assert_eq!(err.to_string(), "Profile not found");
    }

    #[tokio::test]
    async fn upsert_keeps_a_single_profile() {
        let state = AppState::in_memory();
        let first = update_profile(&state, named("Huy")).await.unwrap();
        let second = update_profile(&state, named("Huy Vu")).await.unwrap();

        assert_eq!(state.profiles.count().await.unwrap(), 1);
        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(get_profile(&state).await.unwrap().name, "Huy Vu");
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let state = AppState::in_memory();
        update_profile(&state, named("Huy")).await.unwrap();

        let patch = ProfilePatch {
            available_for_work: Some(false),
            ..ProfilePatch::default()
        };
        let updated = update_profile(&state, patch).await.unwrap();
        assert!(!updated.available_for_work);
        assert_eq!(updated.email, "huy@example.com");
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let state = AppState::in_memory();
        let patch = ProfilePatch {
            email: Some(String::new()),
            ..ProfilePatch::default()
        };
        let err = update_profile(&state, patch).await.unwrap_err();
        assert!(matches!(err, ResourceError::Validation(_)));
        assert_eq!(state.profiles.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn localized_view() {
        let state = AppState::in_memory();
        update_profile(&state, named("Huy")).await.unwrap();

        let vi = get_localized_profile(&state, "VI").await.unwrap();
        assert_eq!(vi.title, "Nhà thiết kế");

        let err = get_localized_profile(&state, "fr").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
        assert_eq!(err.to_string(), "Unsupported language: fr");
    }
}
