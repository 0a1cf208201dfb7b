use serde::Deserialize;

use crate::database::UserRepository;
use crate::models::User;
use crate::utils::AppError;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Creates an account with an empty log.
///
/// The email check and the insert are two separate store calls; two signups
/// racing on the same email can both pass the check.
pub async fn signup(users: &dyn UserRepository, form: SignupForm) -> Result<User, AppError> {
    const CONTEXT: &str = "Error saving user to database";

    let existing = users
        .find_by_email(&form.email)
        .await
        .map_err(AppError::store(CONTEXT))?;
    if existing.is_some() {
        return Err(AppError::EmailTaken);
    }

    let user = User::new(form.name, form.email, form.password);
    users.insert(&user).await.map_err(AppError::store(CONTEXT))?;

    log::info!("✅ User created: {} ({})", user.id, user.email);
    Ok(user)
}

pub async fn login(users: &dyn UserRepository, form: &LoginForm) -> Result<User, AppError> {
    users
        .find_by_credentials(&form.email, &form.password)
        .await
        .map_err(AppError::store("Error fetching user from database"))?
        .ok_or(AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryUsers;

    fn signup_form(email: &str) -> SignupForm {
        SignupForm {
            name: "Nora".to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn signup_creates_user_with_empty_log() {
        let users = InMemoryUsers::new();
        let user = signup(&users, signup_form("nora@example.com")).await.unwrap();

        assert!(user.log.is_empty());
        let stored = users.find_by_id(&user.id_hex()).await.unwrap().unwrap();
        assert_eq!(stored.name, "Nora");
    }

    #[tokio::test]
    async fn second_signup_with_same_email_is_rejected() {
        let users = InMemoryUsers::new();
        signup(&users, signup_form("twice@example.com")).await.unwrap();

        let second = signup(&users, signup_form("twice@example.com")).await;
        assert!(matches!(second, Err(AppError::EmailTaken)));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn login_requires_exact_password() {
        let users = InMemoryUsers::new();
        let created = signup(&users, signup_form("exact@example.com")).await.unwrap();

        let ok = login(
            &users,
            &LoginForm { email: "exact@example.com".to_string(), password: "hunter2".to_string() },
        )
        .await
        .unwrap();
        assert_eq!(ok.id, created.id);

        let bad = login(
            &users,
            &LoginForm { email: "exact@example.com".to_string(), password: "hunter2 ".to_string() },
        )
        .await;
        assert!(matches!(bad, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_store_error() {
        let users = InMemoryUsers::new();
        users.set_offline(true);
        let result = signup(&users, signup_form("down@example.com")).await;
        assert!(matches!(
            result,
            Err(AppError::Store { context: "Error saving user to database", .. })
        ));
    }
}
