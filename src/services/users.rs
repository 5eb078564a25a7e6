use crate::auth::{ensure, hash_password, verify_password, Action, AuthUser, Resource};
use crate::entities::user::{self, Entity as UserEntity, Role};
use crate::errors::ServiceError;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUserInput {
    #[validate(length(min = 1, max = 150, message = "username must be 1-150 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 150, message = "username must be 1-150 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub role: Option<Role>,
}

/// Account management and credential checks.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Verifies a username/password pair. The same error covers unknown
    /// usernames and bad passwords.
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, ServiceError> {
        let found = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await?;

        let user = match found {
            Some(u) => u,
            None => {
                return Err(ServiceError::Unauthorized(
                    "Invalid username or password".to_string(),
                ))
            }
        };

        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }
        Ok(user)
    }

    #[instrument(skip(self, input))]
    pub async fn create_user(
        &self,
        actor: &AuthUser,
        input: CreateUserInput,
    ) -> Result<user::Model, ServiceError> {
        ensure(actor.role, Resource::User, Action::Add)?;
        input.validate()?;

        let existing = UserEntity::find()
            .filter(user::Column::Username.eq(input.username.as_str()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let user = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            password_hash: Set(hash_password(&input.password)?),
            email: Set(input.email),
            role: Set(input.role),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;
        Ok(user)
    }

    #[instrument(skip(self, input))]
    pub async fn update_user(
        &self,
        actor: &AuthUser,
        id: Uuid,
        input: UpdateUserInput,
    ) -> Result<user::Model, ServiceError> {
        ensure(actor.role, Resource::User, Action::Change)?;
        input.validate()?;

        let existing = UserEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;

        let mut active = existing.into_active_model();
        if let Some(v) = input.username {
            active.username = Set(v);
        }
        if let Some(v) = input.password {
            active.password_hash = Set(hash_password(&v)?);
        }
        if let Some(v) = input.email {
            active.email = Set(v);
        }
        if let Some(v) = input.role {
            active.role = Set(v);
        }
        let updated = active.update(&*self.db).await?;
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, actor: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
        ensure(actor.role, Resource::User, Action::Delete)?;

        if actor.user_id == id {
            return Err(ServiceError::InvalidOperation(
                "You cannot delete your own account.".to_string(),
            ));
        }

        let existing = UserEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))?;

        existing.into_active_model().delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, actor: &AuthUser, id: Uuid) -> Result<user::Model, ServiceError> {
        ensure(actor.role, Resource::User, Action::View)?;

        UserEntity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, actor: &AuthUser) -> Result<Vec<user::Model>, ServiceError> {
        ensure(actor.role, Resource::User, Action::View)?;

        let users = UserEntity::find()
            .order_by_asc(user::Column::Username)
            .all(&*self.db)
            .await?;
        Ok(users)
    }

    /// Creates the bootstrap `admin` Superuser if it does not exist yet.
    /// Safe to call on every startup.
    #[instrument(skip(self, password))]
    pub async fn seed_admin(&self, password: &str) -> Result<(), ServiceError> {
        let existing = UserEntity::find()
            .filter(user::Column::Username.eq("admin"))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("admin".to_string()),
            password_hash: Set(hash_password(password)?),
            email: Set(String::new()),
            role: Set(Role::Superuser),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;
        info!("Seeded bootstrap admin user");
        Ok(())
    }
}
