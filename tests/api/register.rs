use crate::helpers::spawn_app;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use serde_json::{Value, json};

fn valid_payload() -> Value {
    let email: String = SafeEmail().fake();
    json!({
        "user_name": "jane_doe",
        "email": email,
        "password": "correct horse battery",
        "display_name": "Jane Doe",
        "avatar": "https://example.com/jane.png"
    })
}

#[tokio::test]
async fn register_returns_201_and_persists_a_regular_user() {
    let app = spawn_app().await;

    let response = app.register_user(&valid_payload()).await;
    assert_eq!(response.status().as_u16(), 201);

    let (display_name, role): (Option<String>, String) =
        sqlx::query_as("SELECT display_name, role FROM users WHERE user_name = 'jane_doe'")
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(display_name.as_deref(), Some("Jane Doe"));
    assert_eq!(role, "user");
}

#[tokio::test]
async fn registered_user_can_log_in() {
    let app = spawn_app().await;
    app.register_user(&valid_payload()).await;

    let response = app
        .login_with(&json!({ "user_name": "jane_doe", "password": "correct horse battery" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn register_returns_409_for_a_taken_user_name() {
    let app = spawn_app().await;
    assert_eq!(app.register_user(&valid_payload()).await.status().as_u16(), 201);

    let response = app.register_user(&valid_payload()).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn register_returns_400_for_invalid_data() {
    let app = spawn_app().await;

    let test_cases = vec![
        ("user_name", json!("a b"), "user name with spaces"),
        ("email", json!("not-an-email"), "invalid email"),
        ("password", json!("short"), "short password"),
        ("display_name", json!("<script>"), "display name with markup"),
        ("avatar", json!("ftp://example.com/a.png"), "non-https avatar"),
    ];

    for (field, value, description) in test_cases {
        let mut payload = valid_payload();
        payload[field] = value;

        let response = app.register_user(&payload).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 for {description}"
        );
    }
}
