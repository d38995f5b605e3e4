use std::net::SocketAddr;
use std::path::PathBuf;

use configs::{LoadPolicyConfig, StorageConfig};
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes;
use server::startup::build_state;

struct TestApp {
    base_url: String,
    storage: PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated store file per test run
    let storage = PathBuf::from(format!("target/test-data/{}/storage.json", Uuid::new_v4()));
    let state = build_state(&StorageConfig { path: storage.clone(), load_policy: LoadPolicyConfig::Lenient });
    let app = routes::build_router(state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, storage })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client")
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_post_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create two posts through the form endpoint
    for (author, title) in [("Ann", "First"), ("Bob", "Second")] {
        let res = c
            .post(format!("{}/add", app.base_url))
            .form(&[("author", author), ("post_title", title), ("post_content", "body")])
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], "/");
    }

    let posts = c.get(format!("{}/api/posts", app.base_url)).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(posts.as_array().map(Vec::len), Some(2));
    assert_eq!(posts[1]["id"], 2);

    // Update the first post
    let res = c
        .post(format!("{}/update/1", app.base_url))
        .form(&[("author", "Ann"), ("post_title", "First, edited"), ("post_content", "new body")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);
    let post = c.get(format!("{}/api/posts/1", app.base_url)).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(post["title"], "First, edited");
    assert_eq!(post["content"], "new body");

    // Unknown id: 404 for update, redirect for delete
    let res = c
        .post(format!("{}/update/42", app.base_url))
        .form(&[("author", "x")])
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "Post not found");
    let res = c.post(format!("{}/delete/42", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);

    // Delete the first post; the next id keeps counting from the max
    let res = c.post(format!("{}/delete/1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::SEE_OTHER);
    c.post(format!("{}/add", app.base_url))
        .form(&[("post_title", "Third")])
        .send()
        .await?;
    let posts = c.get(format!("{}/api/posts", app.base_url)).send().await?.json::<serde_json::Value>().await?;
    let ids: Vec<u64> = posts.as_array().unwrap().iter().filter_map(|p| p["id"].as_u64()).collect();
    assert_eq!(ids, vec![2, 3]);

    // Index renders what is on disk
    let html = c.get(&app.base_url).send().await?.text().await?;
    assert!(html.contains("Third"));
    assert!(!html.contains("First, edited"));

    let _ = tokio::fs::remove_dir_all(app.storage.parent().unwrap()).await;
    Ok(())
}
