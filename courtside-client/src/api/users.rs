//! User, session and permission endpoints

use serde::{Deserialize, Serialize};

use shared::models::{Identity, PermissionGrant, UserInfo};

use crate::ClientResult;
use crate::http::HttpApi;

use super::CourtsideApi;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginData {
    id: Option<i64>,
}

/// Registration payload; the verification code is mailed to the campus
/// address beforehand
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    pub verification_code: String,
}

#[derive(Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<UserInfo>,
}

#[derive(Serialize)]
struct GrantChange<'a> {
    operator: &'a str,
    username: &'a str,
    permission_name: &'a str,
    permission_info: &'a str,
}

impl<H: HttpApi> CourtsideApi<H> {
    /// Log in and return the resulting identity
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Identity> {
        let data: LoginData = self
            .http()
            .post("/login/", &LoginRequest { username, password })
            .await?;
        Ok(Identity {
            id: data.id,
            username: username.to_string(),
        })
    }

    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.http().post_empty("/register/", request).await
    }

    /// Mail a verification code for registration
    pub async fn send_verification_code(&self, email: &str) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/send_verification_code/",
                &serde_json::json!({ "email": email }),
            )
            .await
    }

    /// Public profile of a user
    pub async fn user_info(&self, username: &str) -> ClientResult<UserInfo> {
        self.http()
            .get(
                "/settings/get_user_info/",
                &[("username", username.to_string())],
            )
            .await
    }

    /// Change the caller's nickname
    pub async fn change_nickname(&self, username: &str, nickname: &str) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/settings/change_nickname/",
                &serde_json::json!({ "username": username, "nickname": nickname }),
            )
            .await
    }

    /// Change the caller's password
    pub async fn change_password(
        &self,
        username: &str,
        password: &str,
        new_password: &str,
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/settings/change_password/",
                &serde_json::json!({
                    "username": username,
                    "password": password,
                    "new_password": new_password,
                }),
            )
            .await
    }

    /// Prefix search over usernames (admin user picker)
    pub async fn search_username_prefix(&self, prefix: &str) -> ClientResult<Vec<UserInfo>> {
        let data: UserList = self
            .http()
            .get(
                "/settings/search_username_settings/",
                &[("username_prefix", prefix.to_string())],
            )
            .await?;
        Ok(data.users)
    }

    /// Full grant list of a user
    pub async fn user_permissions(&self, username: &str) -> ClientResult<Vec<PermissionGrant>> {
        self.http()
            .get(
                "/settings/get_user_permission_info/",
                &[("username", username.to_string())],
            )
            .await
    }

    /// Grant a permission to a user
    pub async fn add_permission(
        &self,
        operator: &str,
        username: &str,
        permission_name: &str,
        permission_info: &str,
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/settings/user_add_permission/",
                &GrantChange {
                    operator,
                    username,
                    permission_name,
                    permission_info,
                },
            )
            .await
    }

    /// Revoke a permission from a user
    pub async fn remove_permission(
        &self,
        operator: &str,
        username: &str,
        permission_name: &str,
        permission_info: &str,
    ) -> ClientResult<()> {
        self.http()
            .post_empty(
                "/settings/user_remove_permission/",
                &GrantChange {
                    operator,
                    username,
                    permission_name,
                    permission_info,
                },
            )
            .await
    }
}
