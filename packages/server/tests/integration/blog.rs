use serde_json::json;

use crate::common::{TestApp, initial_blogs, routes};

const MISSING_ID: &str = "0190b9a4-1c2d-7e3f-8a4b-5c6d7e8f9a0b";

mod listing {
    use super::*;

    #[tokio::test]
    async fn blogs_are_returned_as_json() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        app.seed_blogs(&token).await;

        let res = app.get(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        assert!(res.is_json());
        assert_eq!(
            res.body.as_array().unwrap().len(),
            initial_blogs().len()
        );
    }

    #[tokio::test]
    async fn blogs_expose_id_and_expanded_owner() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        app.seed_blogs(&token).await;

        let res = app.get(routes::BLOGS).await;

        for blog in res.body.as_array().unwrap() {
            assert!(blog["id"].is_string());
            assert!(blog.get("_id").is_none());
            assert_eq!(blog["user"]["username"], "root");
            assert_eq!(blog["user"]["name"], "Test User");
            assert!(blog["user"].get("password").is_none());
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::BLOGS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn a_valid_blog_can_be_added() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        app.seed_blogs(&token).await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({
                    "title": "Test Blog",
                    "author": "Test Author",
                    "url": "https://testblog.com",
                    "likes": 5,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.is_json());
        assert_eq!(res.body["user"]["username"], "root");
        assert_eq!(app.blog_count().await, initial_blogs().len() as u64 + 1);

        let listed = app.get(routes::BLOGS).await;
        let titles: Vec<&str> = listed
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert!(titles.contains(&"Test Blog"));
    }

    #[tokio::test]
    async fn likes_default_to_zero() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({
                    "title": "Test blog without likes",
                    "author": "Test Author",
                    "url": "https://testblog.com",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["likes"], 0);
        let stored = app.blog_in_db(&res.id()).await.expect("blog stored");
        assert_eq!(stored.likes, 0);
    }

    #[tokio::test]
    async fn blog_without_title_is_not_added() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        app.seed_blogs(&token).await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"author": "Test Author", "url": "https://testblog.com", "likes": 0}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "title or url missing");
        assert_eq!(app.blog_count().await, initial_blogs().len() as u64);
    }

    #[tokio::test]
    async fn blog_without_url_is_not_added() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        app.seed_blogs(&token).await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "Test Blog without URL", "author": "Test Author", "likes": 0}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.blog_count().await, initial_blogs().len() as u64);
    }

    #[tokio::test]
    async fn blog_cannot_be_added_without_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::BLOGS,
                &json!({"title": "Sneaky", "url": "https://sneaky.dev"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
        assert_eq!(app.blog_count().await, 0);
    }

    #[tokio::test]
    async fn blog_cannot_be_added_with_a_forged_token() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("root", "sekret").await;

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "Sneaky", "url": "https://sneaky.dev"}),
                "not.a.jwt",
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
        assert_eq!(app.blog_count().await, 0);
    }

    #[tokio::test]
    async fn token_of_a_vanished_user_is_rejected() {
        let app = TestApp::spawn().await;
        let ghost = uuid::Uuid::now_v7();
        let token =
            bloglist::utils::jwt::sign(ghost, "ghost", crate::common::JWT_SECRET, 3600).unwrap();

        let res = app
            .post_with_token(
                routes::BLOGS,
                &json!({"title": "Boo", "url": "https://boo.dev"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(app.blog_count().await, 0);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn owner_can_delete_a_blog() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        let ids = app.seed_blogs(&token).await;

        let res = app.delete_with_token(&routes::blog(&ids[0]), &token).await;

        assert_eq!(res.status, 204);
        assert_eq!(app.blog_count().await, initial_blogs().len() as u64 - 1);

        let listed = app.get(routes::BLOGS).await;
        let titles: Vec<&str> = listed
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["title"].as_str().unwrap())
            .collect();
        assert!(!titles.contains(&"React patterns"));
    }

    #[tokio::test]
    async fn other_users_cannot_delete_a_blog() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("root", "sekret").await;
        let intruder = app.create_authenticated_user("mallory", "sekret").await;
        let ids = app.seed_blogs(&owner).await;

        let res = app.delete_with_token(&routes::blog(&ids[0]), &intruder).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "NOT_OWNER");
        assert_eq!(res.body["error"], "only the creator can delete blogs");
        assert!(app.blog_in_db(&ids[0]).await.is_some());
    }

    #[tokio::test]
    async fn deleting_requires_a_token() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        let ids = app.seed_blogs(&token).await;

        let res = app.delete_without_token(&routes::blog(&ids[0])).await;

        assert_eq!(res.status, 401);
        assert_eq!(app.blog_count().await, initial_blogs().len() as u64);
    }

    #[tokio::test]
    async fn deleting_a_non_existing_blog_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;

        let res = app.delete_with_token(&routes::blog(MISSING_ID), &token).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn stats_is_not_a_blog_id() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;

        let res = app.delete_with_token(&routes::blog("stats"), &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "MALFORMED_ID");
    }

    #[tokio::test]
    async fn deleting_with_a_malformed_id_returns_400() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;

        let res = app.delete_with_token(&routes::blog("invalidid"), &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "malformatted id");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn likes_can_be_updated_by_anyone() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        let ids = app.seed_blogs(&token).await;

        let res = app
            .put(
                &routes::blog(&ids[0]),
                &json!({
                    "title": "React patterns",
                    "author": "Michael Chan",
                    "url": "https://reactpatterns.com/",
                    "likes": 8,
                }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.is_json());
        assert_eq!(res.body["likes"], 8);
        assert_eq!(res.body["user"]["username"], "root");
        assert_eq!(app.blog_in_db(&ids[0]).await.unwrap().likes, 8);
    }

    #[tokio::test]
    async fn updating_a_non_existing_blog_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::blog(MISSING_ID), &json!({"likes": 10})).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn updating_with_a_malformed_id_returns_400() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::blog("invalidid"), &json!({"likes": 10})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "MALFORMED_ID");
    }

    #[tokio::test]
    async fn stats_is_not_a_blog_id() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::blog("stats"), &json!({"likes": 1})).await;

        assert_eq!(res.status, 400);
        assert!(res.is_json());
        assert_eq!(res.body["error"], "malformatted id");
    }

    #[tokio::test]
    async fn updating_with_non_numeric_likes_returns_400() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        let ids = app.seed_blogs(&token).await;

        let res = app
            .put(&routes::blog(&ids[0]), &json!({"likes": "not a number"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.blog_in_db(&ids[0]).await.unwrap().likes, 7);
    }

    #[tokio::test]
    async fn updating_with_negative_likes_returns_400() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        let ids = app.seed_blogs(&token).await;

        let res = app.put(&routes::blog(&ids[1]), &json!({"likes": -1})).await;

        assert_eq!(res.status, 400);
        assert_eq!(app.blog_in_db(&ids[1]).await.unwrap().likes, 5);
    }
}

mod stats {
    use super::*;

    #[tokio::test]
    async fn stats_of_an_empty_store() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::STATS).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!({
                "total_likes": 0,
                "favorite_blog": null,
                "most_blogs": null,
                "most_likes": null,
            })
        );
    }

    #[tokio::test]
    async fn stats_reflect_stored_blogs() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        app.seed_blogs(&token).await;
        app.create_blog(
            &token,
            &json!({
                "title": "Canonical string reduction",
                "author": "Edsger W. Dijkstra",
                "url": "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
                "likes": 12,
            }),
        )
        .await;

        let res = app.get(routes::STATS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total_likes"], 24);
        assert_eq!(
            res.body["favorite_blog"],
            json!({
                "title": "Canonical string reduction",
                "author": "Edsger W. Dijkstra",
                "likes": 12,
            })
        );
        assert_eq!(
            res.body["most_blogs"],
            json!({"author": "Edsger W. Dijkstra", "blogs": 2})
        );
        assert_eq!(
            res.body["most_likes"],
            json!({"author": "Edsger W. Dijkstra", "likes": 17})
        );
    }

    #[tokio::test]
    async fn huge_like_counts_do_not_break_stats() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("root", "sekret").await;
        let ids = app.seed_blogs(&token).await;

        let res = app
            .put(&routes::blog(&ids[0]), &json!({"likes": i64::MAX}))
            .await;
        assert_eq!(res.status, 200);

        let res = app.get(routes::STATS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["total_likes"], i64::MAX);
        assert_eq!(res.body["most_likes"]["likes"], i64::MAX);
    }
}
