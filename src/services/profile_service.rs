use crate::error::AppError;
use crate::models::profile_types::{ProfileUpdate, UserProfile};
use crate::services::db::Database;

const PROFILE_KEY: &str = "profile";

/// The single user profile. Reads fall back to [`UserProfile::default`] until one is saved.
#[derive(Clone)]
pub struct ProfileStore {
    db: Database,
}

impl ProfileStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn profile(&self) -> Result<UserProfile, AppError> {
        match self.db.get(PROFILE_KEY)? {
            Some(stored) => serde_json::from_str(&stored).map_err(|e| AppError {
                message: format!("Corrupt profile data: {}", e),
            }),
            None => Ok(UserProfile::default()),
        }
    }

    fn save(&self, profile: &UserProfile) -> Result<(), AppError> {
        let json = serde_json::to_string(profile)?;
        self.db.set(PROFILE_KEY, &json)?;
        Ok(())
    }

    fn modify<F>(&self, change: F) -> Result<UserProfile, AppError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut profile = self.profile()?;
        change(&mut profile);
        self.save(&profile)?;
        Ok(profile)
    }

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, AppError> {
        self.modify(|profile| update.apply_to(profile))
    }

    pub fn complete_onboarding(&self) -> Result<UserProfile, AppError> {
        self.modify(|profile| profile.is_onboarded = true)
    }

    /// `None` clears the photo.
    pub fn set_full_body_photo(&self, uri: Option<String>) -> Result<UserProfile, AppError> {
        self.modify(|profile| profile.full_body_photo_uri = uri)
    }

    pub fn is_onboarded(&self) -> Result<bool, AppError> {
        Ok(self.profile()?.is_onboarded)
    }

    pub fn has_full_body_photo(&self) -> Result<bool, AppError> {
        Ok(self
            .profile()?
            .full_body_photo_uri
            .is_some_and(|uri| !uri.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile_types::{BodyShape, Gender};

    fn store() -> ProfileStore {
        ProfileStore::new(Database::in_memory().unwrap())
    }

    #[test]
    fn unset_profile_reads_as_default() {
        let store = store();
        assert_eq!(store.profile().unwrap(), UserProfile::default());
        assert!(!store.is_onboarded().unwrap());
        assert!(!store.has_full_body_photo().unwrap());
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let store = store();
        store
            .update_profile(&ProfileUpdate {
                gender: Some(Gender::Male),
                height: Some(182),
                ..ProfileUpdate::default()
            })
            .unwrap();
        let profile = store
            .update_profile(&ProfileUpdate {
                body_shape: Some(BodyShape::Athletic),
                ..ProfileUpdate::default()
            })
            .unwrap();

        assert_eq!(profile.gender, Gender::Male);
        assert_eq!(profile.height, 182);
        assert_eq!(profile.body_shape, BodyShape::Athletic);
        assert_eq!(profile.age, 25);
        assert_eq!(store.profile().unwrap(), profile);
    }

    #[test]
    fn onboarding_and_photo_flags() {
        let store = store();
        store.complete_onboarding().unwrap();
        assert!(store.is_onboarded().unwrap());

        store.set_full_body_photo(Some("/photos/me.jpg".into())).unwrap();
        assert!(store.has_full_body_photo().unwrap());

        store.set_full_body_photo(Some(String::new())).unwrap();
        assert!(!store.has_full_body_photo().unwrap());

        let cleared = store.set_full_body_photo(None).unwrap();
        assert!(cleared.full_body_photo_uri.is_none());
        assert!(cleared.is_onboarded);
    }

    #[test]
    fn corrupt_payload_is_reported() {
        let db = Database::in_memory().unwrap();
        db.set(PROFILE_KEY, "nope").unwrap();
        let err = ProfileStore::new(db).profile().unwrap_err();
        assert!(err.message.contains("Corrupt profile data"));
    }
}
