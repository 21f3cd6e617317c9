use crate::helpers::spawn_app;
use clinichub::domain::Role;
use serde_json::{Value, json};
use uuid::Uuid;

fn sample_payload(title: &str) -> Value {
    json!({
        "title": title,
        "text": "Drink water and rest.",
        "img": "https://example.com/image.jpg"
    })
}

#[tokio::test]
async fn user_must_be_logged_in_to_create_post() {
    let app = spawn_app().await;

    let response = app.create_post(&sample_payload("Some title")).await;

    assert_eq!(
        401,
        response.status().as_u16(),
        "The API did not return 401 Unauthorized for unauthenticated user."
    );
}

#[tokio::test]
async fn only_doctors_and_admins_can_create_posts() {
    let app = spawn_app().await;

    for role in [Role::User, Role::AppointmentStaff, Role::OnlineSupportStaff] {
        app.switch_to_new_user(role).await;
        let response = app.create_post(&sample_payload("Forbidden post")).await;
        assert_eq!(403, response.status().as_u16(), "{role} must not publish");
    }

    app.switch_to_new_user(Role::Admin).await;
    let response = app.create_post(&sample_payload("Admin post")).await;
    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn create_post_returns_400_for_invalid_payload() {
    let app = spawn_app().await;
    app.login().await;

    let invalid_payloads = vec![
        json!({ "title": "", "text": "Some text", "img": "https://example.com/image.jpg" }),
        json!({ "title": "Title", "text": "", "img": "https://example.com/image.jpg" }),
        json!({ "title": "Title", "text": "Text", "img": "" }),
        json!({ "title": "Title", "text": "Text", "img": "http://example.com/image.jpg" }),
        json!({}),
    ];

    for payload in invalid_payloads {
        let response = app.create_post(&payload).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return 400 for invalid input: {payload:?}"
        );
    }
}

#[tokio::test]
async fn create_post_persists_valid_post_and_returns_201() {
    let app = spawn_app().await;
    app.login().await;

    let response = app.create_post(&sample_payload("Treating a cold")).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Treating a cold");
    assert_eq!(body["text"], "Drink water and rest.");
    assert_eq!(body["created_by"], app.test_user.user_id.to_string());

    let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    let (title, created_by): (String, Uuid) =
        sqlx::query_as("SELECT title, created_by FROM posts WHERE id = $1")
            .bind(id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(title, "Treating a cold");
    assert_eq!(created_by, app.test_user.user_id);
}

#[tokio::test]
async fn get_post_reports_comment_count_without_the_root() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let body: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(body["post"]["comment_count"], 0);

    let parent = app.reply(&post_id, None, "one").await;
    app.reply(&post_id, Some(parent), "two").await;

    let response = app.get_post(&post_id).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["post"]["comment_count"], 2);
    assert_eq!(body["post"]["version"], 1);
    assert_eq!(
        body["post"]["created_by"]["display_name"],
        app.test_user.user_name
    );
}

#[tokio::test]
async fn get_post_returns_404_for_unknown_post() {
    let app = spawn_app().await;

    let response = app.get_post(&Uuid::new_v4()).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn update_post_bumps_the_version() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let mut payload = sample_payload("Updated title");
    payload["version"] = json!(1);
    let response = app.update_post(&post_id, &payload).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["version"], 2);

    let body: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(body["post"]["title"], "Updated title");
}

#[tokio::test]
async fn update_post_with_stale_version_returns_409() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let mut payload = sample_payload("First edit");
    payload["version"] = json!(1);
    assert_eq!(app.update_post(&post_id, &payload).await.status().as_u16(), 200);

    payload["title"] = json!("Second edit");
    let response = app.update_post(&post_id, &payload).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn only_the_author_can_update_a_post() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    app.switch_to_new_user(Role::Admin).await;
    let mut payload = sample_payload("Not mine");
    payload["version"] = json!(1);
    let response = app.update_post(&post_id, &payload).await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn author_can_soft_delete_a_post() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let response = app.delete_post(&post_id).await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.get_post(&post_id).await.status().as_u16(), 404);
    assert_eq!(app.get_comments(&post_id).await.status().as_u16(), 404);

    let deleted_by: Option<Uuid> = sqlx::query_scalar("SELECT deleted_by FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(deleted_by, Some(app.test_user.user_id));
}

#[tokio::test]
async fn admin_can_delete_any_post_but_other_users_cannot() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    app.switch_to_new_user(Role::Doctor).await;
    assert_eq!(app.delete_post(&post_id).await.status().as_u16(), 403);

    app.switch_to_new_user(Role::Admin).await;
    assert_eq!(app.delete_post(&post_id).await.status().as_u16(), 200);
}

#[tokio::test]
async fn like_toggles_on_and_off() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let body: Value = app.like_post(&post_id).await.json().await.unwrap();
    assert_eq!(body["liked"], true);
    let post: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(post["post"]["like_count"], 1);

    let body: Value = app.like_post(&post_id).await.json().await.unwrap();
    assert_eq!(body["liked"], false);
    let post: Value = app.get_post(&post_id).await.json().await.unwrap();
    assert_eq!(post["post"]["like_count"], 0);
}

#[tokio::test]
async fn bookmark_toggles_on_and_off() {
    let app = spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let body: Value = app.bookmark_post(&post_id).await.json().await.unwrap();
    assert_eq!(body["bookmarked"], true);
    let body: Value = app.bookmark_post(&post_id).await.json().await.unwrap();
    assert_eq!(body["bookmarked"], false);
}

#[tokio::test]
async fn liking_an_unknown_post_returns_404() {
    let app = spawn_app().await;
    app.login().await;

    let response = app.like_post(&Uuid::new_v4()).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_posts_paginates_and_reports_metadata() {
    let app = spawn_app().await;
    app.login().await;
    for i in 0..3 {
        app.create_sample_post_titled(&format!("Post number {i}")).await;
    }

    let response = app.get_all_posts("?page=2&size=2&option=oldest").await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Post number 2");
    assert_eq!(body["metadata"]["total_records"], 3);
    assert_eq!(body["metadata"]["last_page"], 2);
    assert_eq!(body["metadata"]["current_page"], 2);
}

#[tokio::test]
async fn list_posts_filters_by_title_keyword() {
    let app = spawn_app().await;
    app.login().await;
    app.create_sample_post_titled("Managing diabetes").await;
    app.create_sample_post_titled("Sleep hygiene").await;

    let body: Value = app
        .get_all_posts("?keyword=diabetes")
        .await
        .json()
        .await
        .unwrap();
    let posts = body["posts"].as_array().unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Managing diabetes");
}

#[tokio::test]
async fn popular_option_orders_by_like_count() {
    let app = spawn_app().await;
    app.login().await;
    let _quiet = app.create_sample_post_titled("Quiet post").await;
    let liked = app.create_sample_post_titled("Liked post").await;
    app.like_post(&liked).await;

    let body: Value = app
        .get_all_posts("?option=popular")
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(body["posts"][0]["id"], liked.to_string());
}

#[tokio::test]
async fn list_posts_returns_400_for_invalid_query() {
    let app = spawn_app().await;

    for query in ["?size=0", "?size=201", "?page=0", "?option=sideways"] {
        let response = app.get_all_posts(query).await;
        assert_eq!(response.status().as_u16(), 400, "query {query}");
    }
}
