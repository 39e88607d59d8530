use uuid::Uuid;

use gamestore_domain::user::UserRole;

use crate::domain::repository::{BlobStore, UserRepository};
use crate::domain::types::{OwnedGame, StoreUser, validate_age, validate_email, validate_password};
use crate::error::StoreServiceError;
use crate::usecase::auth::{hash_password, verify_password};

/// Bucket profile pictures are uploaded under.
const PROFILE_IMAGE_BUCKET: &str = "profile-pictures";

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<StoreUser, StoreServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)
    }
}

pub struct EditProfileInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
}

pub struct EditProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> EditProfileUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: EditProfileInput,
    ) -> Result<(), StoreServiceError> {
        if !validate_email(&input.email) {
            return Err(StoreServiceError::InvalidEmail);
        }
        if !validate_age(input.age) {
            return Err(StoreServiceError::InvalidAge);
        }
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(StoreServiceError::UserNotFound);
        }
        if let Some(other) = self.users.find_by_email(&input.email).await? {
            if other.id != user_id {
                return Err(StoreServiceError::EmailTaken);
            }
        }
        self.users
            .update_profile(
                user_id,
                &input.email,
                &input.first_name,
                &input.last_name,
                input.age,
            )
            .await
    }
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), StoreServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;
        if !verify_password(current_password, &user.password_hash) {
            return Err(StoreServiceError::InvalidCredentials);
        }
        if !validate_password(new_password) {
            return Err(StoreServiceError::WeakPassword);
        }
        let hash = hash_password(new_password)?;
        self.users.update_password_hash(user_id, &hash).await
    }
}

pub struct GetLibraryUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetLibraryUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<OwnedGame>, StoreServiceError> {
        self.users.list_owned_games(user_id).await
    }
}

pub struct UploadProfileImageUseCase<U: UserRepository, B: BlobStore> {
    pub users: U,
    pub blobs: B,
}

impl<U: UserRepository, B: BlobStore> UploadProfileImageUseCase<U, B> {
    /// Store the image under a fresh name and persist its URL on the profile.
    pub async fn execute(
        &self,
        user_id: Uuid,
        original_filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StoreServiceError> {
        if bytes.is_empty() {
            return Err(StoreServiceError::EmptyUpload);
        }
        let extension = original_filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .ok_or(StoreServiceError::UnsupportedFileType)?;
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(StoreServiceError::UserNotFound);
        }

        let filename = format!("{}.{extension}", Uuid::new_v4());
        let url = self
            .blobs
            .upload(bytes, &filename, PROFILE_IMAGE_BUCKET)
            .await?;
        self.users.set_profile_picture(user_id, &url).await?;
        Ok(url)
    }
}

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<StoreUser>, StoreServiceError> {
        self.users.list_all().await
    }
}

/// Toggle `email_confirmed`, which gates login. Disabling an account and
/// un-confirming its email are the same switch.
pub struct SetUserEnabledUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetUserEnabledUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, enabled: bool) -> Result<(), StoreServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(StoreServiceError::UserNotFound);
        }
        self.users.set_email_confirmed(user_id, enabled).await
    }
}

pub struct SetUserRoleUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetUserRoleUseCase<U> {
    pub async fn execute(&self, user_id: Uuid, role: UserRole) -> Result<(), StoreServiceError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(StoreServiceError::UserNotFound);
        }
        self.users.set_role(user_id, role).await
    }
}
