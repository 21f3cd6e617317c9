use crate::helpers::TestApp;
use reqwest::Response;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoredComment {
    pub id: Uuid,
    pub lft: i32,
    pub rgt: i32,
    pub message: String,
    pub created_by: Option<Uuid>,
}

impl TestApp {
    pub async fn create_comment(&self, post_id: &Uuid, payload: &Value) -> Response {
        self.send_post(&format!("v1/comment/me/posts/{post_id}"), payload)
            .await
    }

    pub async fn edit_comment(&self, comment_id: &Uuid, payload: &Value) -> Response {
        self.send_patch_with_payload(&format!("v1/comment/me/update/{comment_id}"), payload)
            .await
    }

    pub async fn get_comments(&self, post_id: &Uuid) -> Response {
        self.send_get(&format!("v1/comment/get/posts/{post_id}"))
            .await
    }

    /// Posts a reply and returns the id of the created comment.
    pub async fn reply(&self, post_id: &Uuid, parent_id: Option<Uuid>, message: &str) -> Uuid {
        let mut payload = serde_json::json!({ "message": message });
        if let Some(parent_id) = parent_id {
            payload["parent_id"] = Value::String(parent_id.to_string());
        }

        let response = self.create_comment(post_id, &payload).await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create comment");
        let body: Value = response.json().await.unwrap();
        Uuid::parse_str(body["id"].as_str().unwrap()).unwrap()
    }

    /// Rows of a post ordered by left bound, root included.
    pub async fn stored_comments(&self, post_id: &Uuid) -> Vec<StoredComment> {
        sqlx::query_as::<_, StoredComment>(
            r#"
            SELECT id, lft, rgt, message, created_by
            FROM comments
            WHERE post_id = $1
            ORDER BY lft
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.db_pool)
        .await
        .expect("Failed to fetch stored comments")
    }
}

/// Asserts that `rows` (sorted by left bound) encode one tree with contiguous bounds.
pub fn assert_valid_nested_set(rows: &[StoredComment]) {
    let mut bounds: Vec<i32> = rows.iter().flat_map(|r| [r.lft, r.rgt]).collect();
    bounds.sort_unstable();
    let expected: Vec<i32> = (1..=(rows.len() as i32 * 2)).collect();
    assert_eq!(bounds, expected, "bounds are not contiguous");

    assert_eq!(rows[0].lft, 1);
    assert_eq!(rows[0].rgt, rows.len() as i32 * 2);

    for a in rows {
        assert!(a.lft < a.rgt);
        for b in rows {
            let nested = (a.lft < b.lft && b.rgt < a.rgt) || (b.lft < a.lft && a.rgt < b.rgt);
            let disjoint = a.rgt < b.lft || b.rgt < a.lft;
            assert!(a.id == b.id || nested || disjoint, "{a:?} overlaps {b:?}");
        }
    }
}
