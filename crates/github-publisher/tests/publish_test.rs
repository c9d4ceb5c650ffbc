//! Tests for [`github_publisher::GithubPublisher`] against a mockito server standing in for
//! api.github.com.

use code_extractor::ExtractedFileSet;
use github_publisher::{GithubPublisher, PublishError, RepoPublisher, RepoStatus};
use mockito::Matcher;

const TOKEN: &str = "ghp_0123456789abcdefghij";

fn files() -> ExtractedFileSet {
    let mut files = ExtractedFileSet::new();
    files.insert("index.js".to_string(), "console.log('hi');\n".to_string());
    files.insert("package.json".to_string(), "{}".to_string());
    files
}

/// **Test: New repository is created private and every file is uploaded base64-encoded.**
///
/// **Setup:** create → 201, contents GET → 404, contents PUT → 201.
/// **Expected:** RepoStatus::Created, owner/url from the create response, 2 PUTs with the
/// "Add <path>" message.
#[tokio::test]
async fn creates_repo_and_uploads_files() {
    let mut server = mockito::Server::new_async().await;
    let create = server
        .mock("POST", "/user/repos")
        .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
        .match_header("user-agent", "codegen-bot")
        .match_body(Matcher::PartialJsonString(
            r#"{"name":"generated-bot-42","private":true}"#.to_string(),
        ))
        .with_status(201)
        .with_body(r#"{"html_url":"https://github.com/octo/generated-bot-42","owner":{"login":"octo","html_url":"https://github.com/octo"}}"#)
        .create_async()
        .await;
    let lookups = server
        .mock("GET", Matcher::Regex(r"^/repos/octo/generated-bot-42/contents/.+$".to_string()))
        .with_status(404)
        .expect(2)
        .create_async()
        .await;
    let put_index = server
        .mock("PUT", "/repos/octo/generated-bot-42/contents/index.js")
        .match_body(Matcher::Json(serde_json::json!({
            "message": "Add index.js",
            "content": "Y29uc29sZS5sb2coJ2hpJyk7Cg==",
        })))
        .with_status(201)
        .create_async()
        .await;
    let put_package = server
        .mock("PUT", "/repos/octo/generated-bot-42/contents/package.json")
        .match_body(Matcher::PartialJsonString(
            r#"{"message":"Add package.json","content":"e30="}"#.to_string(),
        ))
        .with_status(201)
        .create_async()
        .await;

    let publisher = GithubPublisher::new(server.url(), None).unwrap();
    let published = publisher
        .publish(&files(), "generated-bot-42", "echo bot", TOKEN)
        .await
        .unwrap();

    assert_eq!(published.status, RepoStatus::Created);
    assert_eq!(published.owner, "octo");
    assert_eq!(published.html_url, "https://github.com/octo/generated-bot-42");
    assert_eq!(published.files_written, 2);
    create.assert_async().await;
    lookups.assert_async().await;
    put_index.assert_async().await;
    put_package.assert_async().await;
}

/// **Test: 422 on create reuses the repository and overwrites files with their sha.**
#[tokio::test]
async fn reuses_existing_repo_on_422() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/user/repos")
        .with_status(422)
        .with_body(r#"{"message":"Repository creation failed."}"#)
        .create_async()
        .await;
    let user = server
        .mock("GET", "/user")
        .with_status(200)
        .with_body(r#"{"login":"octo","html_url":"https://github.com/octo"}"#)
        .create_async()
        .await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/repos/octo/generated-bot-7/contents/.+$".to_string()))
        .with_status(200)
        .with_body(r#"{"sha":"abc123","path":"x"}"#)
        .create_async()
        .await;
    let puts = server
        .mock("PUT", Matcher::Regex(r"^/repos/octo/generated-bot-7/contents/.+$".to_string()))
        .match_body(Matcher::PartialJsonString(r#"{"sha":"abc123"}"#.to_string()))
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let publisher = GithubPublisher::new(server.url(), None).unwrap();
    let published = publisher
        .publish(&files(), "generated-bot-7", "", TOKEN)
        .await
        .unwrap();

    assert_eq!(published.status, RepoStatus::AlreadyExists);
    assert_eq!(published.html_url, "https://github.com/octo/generated-bot-7");
    user.assert_async().await;
    puts.assert_async().await;
}

/// **Test: A configured owner is used for reused repositories without calling GET /user.**
#[tokio::test]
async fn configured_owner_skips_user_lookup() {
    let mut server = mockito::Server::new_async().await;
    let _create = server.mock("POST", "/user/repos").with_status(422).create_async().await;
    let user = server.mock("GET", "/user").expect(0).create_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/repos/acme/.+$".to_string()))
        .with_status(404)
        .create_async()
        .await;
    let _mock = server
        .mock("PUT", Matcher::Regex(r"^/repos/acme/.+$".to_string()))
        .with_status(201)
        .create_async()
        .await;

    let publisher = GithubPublisher::new(server.url(), Some("acme".to_string())).unwrap();
    let published = publisher.publish(&files(), "repo", "", TOKEN).await.unwrap();

    assert_eq!(published.owner, "acme");
    user.assert_async().await;
}

/// **Test: Any other create failure is reported with its status and body.**
#[tokio::test]
async fn create_failure_is_status_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/user/repos")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let publisher = GithubPublisher::new(server.url(), None).unwrap();
    match publisher.publish(&files(), "repo", "", TOKEN).await {
        Err(PublishError::Status { status, body, .. }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("expected Status error, got {:?}", other),
    }
}

/// **Test: Every filename the extractor can produce is uploaded to its own contents path.**
///
/// **Setup:** a response with every mapped label plus `c#` and an unlabelled block.
/// **Expected:** one PUT per file at the percent-encoded path; `#` never truncates a name.
#[tokio::test]
async fn uploads_each_mapped_file_to_its_path() {
    let response = "```javascript\nrequire('telegraf');\n```\n```json\n{}\n```\n```dockerfile\nFROM node:20\n```\n```markdown\n# Bot\n```\n```env\nBOT_TOKEN=\n```\n```yaml\na: 1\n```\n```c#\nclass A {}\n```\n```\nnotes\n```\n";
    let files = code_extractor::extract_files(response);
    // (request path, file name)
    let expected = [
        ("/repos/octo/generated-bot-1/contents/.env.example", ".env.example"),
        ("/repos/octo/generated-bot-1/contents/Dockerfile", "Dockerfile"),
        ("/repos/octo/generated-bot-1/contents/README.md", "README.md"),
        ("/repos/octo/generated-bot-1/contents/file.c%23", "file.c#"),
        ("/repos/octo/generated-bot-1/contents/file.txt", "file.txt"),
        ("/repos/octo/generated-bot-1/contents/file.yaml", "file.yaml"),
        ("/repos/octo/generated-bot-1/contents/index.js", "index.js"),
        ("/repos/octo/generated-bot-1/contents/package.json", "package.json"),
    ];
    assert_eq!(files.len(), expected.len());

    let mut server = mockito::Server::new_async().await;
    let _create = server
        .mock("POST", "/user/repos")
        .with_status(201)
        .with_body(r#"{"html_url":"https://github.com/octo/generated-bot-1","owner":{"login":"octo","html_url":"https://github.com/octo"}}"#)
        .create_async()
        .await;
    let _lookups = server
        .mock("GET", Matcher::Regex(r"^/repos/octo/generated-bot-1/contents/.+$".to_string()))
        .with_status(404)
        .create_async()
        .await;
    let mut puts = Vec::new();
    for (path, name) in expected {
        puts.push(
            server
                .mock("PUT", path)
                .match_body(Matcher::PartialJson(serde_json::json!({
                    "message": format!("Add {}", name),
                })))
                .with_status(201)
                .expect(1)
                .create_async()
                .await,
        );
    }

    let publisher = GithubPublisher::new(server.url(), None).unwrap();
    let published = publisher
        .publish(&files, "generated-bot-1", "", TOKEN)
        .await
        .unwrap();

    assert_eq!(published.files_written, expected.len());
    for put in &puts {
        put.assert_async().await;
    }
}

/// **Test: A path with `..` segments is refused before anything is sent to GitHub.**
#[tokio::test]
async fn dot_dot_path_is_refused() {
    let mut files = files();
    files.insert("file.x/../../../../user".to_string(), "boom".to_string());

    let mut server = mockito::Server::new_async().await;
    let create = server.mock("POST", "/user/repos").expect(0).create_async().await;
    let puts = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let publisher = GithubPublisher::new(server.url(), None).unwrap();
    let result = publisher.publish(&files, "generated-bot-1", "", TOKEN).await;

    match result {
        Err(PublishError::InvalidPath(path)) => assert_eq!(path, "file.x/../../../../user"),
        other => panic!("expected InvalidPath, got {:?}", other),
    }
    create.assert_async().await;
    puts.assert_async().await;
}
