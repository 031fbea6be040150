use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub resume_url: Option<String>,
    pub profile_picture_url: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            title: user.title,
            location: user.location,
            phone: user.phone,
            bio: user.bio,
            skills: user.skills,
            resume_url: user.resume_url,
            profile_picture_url: user.profile_picture_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_never_carries_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "dev@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            name: "Dev".to_string(),
            role: "jobseeker".to_string(),
            title: None,
            location: None,
            phone: None,
            bio: None,
            skills: vec!["Rust".to_string()],
            resume_url: None,
            profile_picture_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "dev@example.com");
    }
}
