// Integration tests for the authentication gateway
// Run with: cargo test -p gatekit-server --test integration_test -- --ignored
// Requires: gatekit-server running against a SurrealDB instance whose
// schema defines the `user` record access (signup/signin expressions).

use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> reqwest::Client {
    // Redirects are asserted, not followed; cookies carry the session
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client builds")
}

#[tokio::test]
#[ignore = "requires a running gateway and SurrealDB"]
async fn test_register_login_password_flow() {
    let client = client();

    // Health first, so a missing server fails with a clear message
    let health = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("gateway not reachable");
    assert_eq!(health.status(), 200);

    // Unique email per run so the flow can repeat
    let email = format!(
        "it-{}@example.com",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis()
    );

    // Step 1: Register
    let response = client
        .post(format!("{}/register", BASE_URL))
        .form(&[("email", email.as_str()), ("password", "initial-pw")])
        .send()
        .await
        .expect("register request failed");
    assert_eq!(response.status(), 303, "register should redirect");

    // Step 2: Session cookie identifies the user
    let response = client
        .get(format!("{}/session", BASE_URL))
        .send()
        .await
        .expect("session request failed");
    let session: Value = response.json().await.expect("session body");
    let user_id = session["user_id"].as_str().expect("registered session");
    assert!(user_id.starts_with("user:"));

    // Step 3: Change password
    let response = client
        .post(format!("{}/password", BASE_URL))
        .form(&[("oldPassword", "initial-pw"), ("newPassword", "rotated-pw")])
        .send()
        .await
        .expect("password request failed");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("password body");
    assert_eq!(body["success"], true);

    // Step 4: Wrong current password is rejected
    let response = client
        .post(format!("{}/password", BASE_URL))
        .form(&[("oldPassword", "initial-pw"), ("newPassword", "other-pw")])
        .send()
        .await
        .expect("password request failed");
    assert_eq!(response.status(), 401);

    // Step 5: Logout clears the session
    let response = client
        .post(format!("{}/logout", BASE_URL))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(response.status(), 303);

    let response = client
        .get(format!("{}/session", BASE_URL))
        .send()
        .await
        .expect("session request failed");
    let session: Value = response.json().await.expect("session body");
    assert!(session["user_id"].is_null());

    // Step 6: Login with the rotated password
    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", email.as_str()), ("password", "rotated-pw")])
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 303, "login should redirect");

    let response = client
        .get(format!("{}/session", BASE_URL))
        .send()
        .await
        .expect("session request failed");
    let session: Value = response.json().await.expect("session body");
    assert_eq!(session["user_id"].as_str(), Some(user_id));
}

#[tokio::test]
#[ignore = "requires a running gateway and SurrealDB"]
async fn test_login_rejects_bad_credentials() {
    let client = client();

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("username", "nobody@example.com"), ("password", "wrong")])
        .send()
        .await
        .expect("login request failed");
    assert_eq!(response.status(), 401);
}
