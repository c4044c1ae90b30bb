use anyhow::Result;
use reqwest::header::AUTHORIZATION;

use super::types::*;
use crate::API_URL;
use crate::db::*;
use crate::session::SessionToken;
use crate::validate::SignUpInput;

#[derive(Clone, Debug)]
pub struct BasaltApi {
    pub url: String,
}

impl Default for BasaltApi {
    fn default() -> Self {
        Self {
            url: API_URL.to_string(),
        }
    }
}

impl BasaltApi {
    pub fn new(url: String) -> Result<Self> {
        Ok(Self { url })
    }

    pub async fn create_user(&self, input: &SignUpInput) -> Result<UserModelSafe> {
        let response = reqwest::Client::new()
            .post(format!("{}/user", self.url))
            .json(input)
            .send()
            .await?;
        if response.status().is_success() {
            let data = response.json().await?;
            Ok(data)
        } else {
            anyhow::bail!("{}", response.text().await?);
        }
    }

    /// Log in and collect the session identifiers. The access token is read
    /// from the `Authorization` response header.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionToken> {
        let response = reqwest::Client::new()
            .post(format!("{}/auth/login", self.url))
            .json(request)
            .send()
            .await?;
        if response.status().is_success() {
            let token = match response.headers().get(AUTHORIZATION) {
                Some(value) => value.to_str()?.to_string(),
                None => anyhow::bail!("login response is missing an authorization header"),
            };
            let data: LoginResponse = response.json().await?;
            Ok(SessionToken {
                id: data.id,
                token,
                refresh_token: data.data.refresh_token,
            })
        } else {
            anyhow::bail!("{}", response.text().await?);
        }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserModelSafe> {
        let response = reqwest::Client::new()
            .get(format!("{}/user/{user_id}", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let data = response.json().await?;
            Ok(data)
        } else {
            anyhow::bail!("{}", response.text().await?);
        }
    }

    pub async fn list_users(&self) -> Result<Vec<UserModelSafe>> {
        let response = reqwest::Client::new()
            .get(format!("{}/user", self.url))
            .send()
            .await?;
        if response.status().is_success() {
            let data = response.json().await?;
            Ok(data)
        } else {
            anyhow::bail!("{}", response.text().await?);
        }
    }

    /// `token` is the raw authorization value returned by `login`.
    pub async fn patch_user(
        &self,
        user_id: &str,
        patch: &UserPatch,
        token: &str,
    ) -> Result<UserModelSafe> {
        let response = reqwest::Client::new()
            .patch(format!("{}/user/{user_id}", self.url))
            .header(AUTHORIZATION, token)
            .json(patch)
            .send()
            .await?;
        if response.status().is_success() {
            let data = response.json().await?;
            Ok(data)
        } else {
            anyhow::bail!("{}", response.text().await?);
        }
    }

    pub async fn delete_user(&self, user_id: &str, token: &str) -> Result<()> {
        let response = reqwest::Client::new()
            .delete(format!("{}/user/{user_id}", self.url))
            .header(AUTHORIZATION, token)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            anyhow::bail!("{}", response.text().await?);
        }
    }
}
