use super::{
    client::ApiClient,
    session::Session,
    types::{
        ChangePasswordRequest, CreateUserRequest, LoginRequest, LoginResponse, MessageResponse,
        RefreshResponse, User,
    },
};
use crate::api::ApiError;
use serde_json::json;

impl ApiClient {
    /// `POST /auth/login`. On success the full session (tokens + profile) is
    /// persisted; on failure the previously stored session is left untouched.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/auth/login/", base_url))
                    .json(&request),
            )
            .await?;

        if response.status().is_success() {
            let login_response: LoginResponse = response.json()?;
            self.session().persist(&Session {
                access: login_response.access.clone(),
                refresh: login_response.refresh.clone(),
                user: login_response.user.clone(),
            });
            Ok(login_response)
        } else {
            Err(response.api_error())
        }
    }

    /// One silent `POST /auth/refresh` exchanging the stored refresh token
    /// for a new access token. Any failure here is fatal to the session; the
    /// caller decides on the teardown.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let refresh = self
            .session()
            .refresh_token()
            .ok_or_else(|| ApiError::unauthorized("Brak tokena odświeżania"))?;

        let base_url = self.resolved_base_url().await;
        let response = self
            .send(
                self.http_client()
                    .post(format!("{}/auth/refresh/", base_url))
                    .json(&json!({ "refresh": refresh })),
            )
            .await?;

        if response.status().is_success() {
            let refreshed: RefreshResponse = response.json()?;
            self.session().replace_access_token(&refreshed.access);
            if let Some(rotated) = refreshed.refresh {
                self.session().replace_refresh_token(&rotated);
            }
            Ok(())
        } else {
            Err(response.api_error())
        }
    }

    /// `POST /auth/logout`. The server-side invalidation is best-effort; the
    /// local session is cleared no matter what the server said.
    pub async fn logout(&self) {
        let refresh = self.session().refresh_token();
        if let (Ok(headers), Some(refresh)) = (self.get_auth_headers(), refresh) {
            let base_url = self.resolved_base_url().await;
            let result = self
                .send(
                    self.http_client()
                        .post(format!("{}/auth/logout/", base_url))
                        .headers(headers)
                        .json(&json!({ "refresh": refresh })),
                )
                .await;
            if let Err(err) = result {
                log::warn!("logout request failed, clearing session anyway: {}", err);
            }
        }
        self.session().clear();
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/auth/me/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn change_password(
        &self,
        old_password: String,
        new_password: String,
    ) -> Result<MessageResponse, ApiError> {
        let base_url = self.resolved_base_url().await;
        let payload = ChangePasswordRequest {
            old_password,
            new_password,
        };
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/auth/change-password/", base_url))
                    .headers(headers)
                    .json(&payload))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .get(format!("{}/auth/users/", base_url))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .post(format!("{}/auth/users/create/", base_url))
                    .headers(headers)
                    .json(&request))
            })
            .await?;

        if response.status().is_success() {
            response.json()
        } else {
            Err(response.api_error())
        }
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                let headers = self.get_auth_headers()?;
                Ok(self
                    .http_client()
                    .delete(format!("{}/auth/users/{}/delete/", base_url, user_id))
                    .headers(headers))
            })
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response.api_error())
        }
    }
}
