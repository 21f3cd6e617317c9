use reqwest::Response;
use serde_json::Value;

use crate::helpers::{TestApp, TestUser};
use clinichub::domain::Role;

impl TestApp {
    pub async fn register_user(&self, payload: &Value) -> Response {
        self.send_post("v1/user/register", payload).await
    }

    pub async fn login(&self) {
        let user = self.test_user.clone();
        self.login_as(&user).await;
    }

    pub async fn login_as(&self, user: &TestUser) {
        let body = serde_json::json!({
            "user_name": &user.user_name,
            "password": &user.password,
        });
        let response = self.login_with(&body).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    pub async fn login_with(&self, creds: &Value) -> Response {
        self.send_post("v1/user/login", creds).await
    }

    pub async fn logout(&self) -> Response {
        self.send_post("v1/user/me/logout", &serde_json::json!({}))
            .await
    }

    pub async fn get_profile(&self) -> Response {
        self.send_get("v1/user/me/profile").await
    }

    /// Stores a fresh user with `role` and switches the session to it.
    pub async fn switch_to_new_user(&self, role: Role) -> TestUser {
        let user = TestUser::generate(role);
        user.store(&self.db_pool)
            .await
            .expect("Failed to store user");

        self.logout().await;
        self.login_as(&user).await;
        user
    }
}
