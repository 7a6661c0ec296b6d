//! Integration tests for login/logout commands.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, now, read_session, temp_home, token_expiring_in};
use predicates::prelude::*;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_stores_session_for_one_day() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    let token = token_expiring_in(3600);

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(serde_json::json!({
            "email": "student@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": token})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--email", "student@example.com", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Logged in"))
        .stdout(predicate::str::contains("session.json"));

    let session = read_session(home.path()).expect("session.json should exist");
    assert_eq!(session["token"], token.as_str());
    let expires_at = session["expires_at"].as_i64().unwrap();
    let one_day = 24 * 60 * 60;
    assert!((expires_at - (now() + one_day)).abs() < 60);
}

#[tokio::test]
async fn test_login_reads_password_from_stdin() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(serde_json::json!({
            "email": "student@example.com",
            "password": "from-stdin"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"token": token_expiring_in(3600)})),
        )
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--email", "student@example.com"])
        .write_stdin("from-stdin\n")
        .assert()
        .success();

    assert!(read_session(home.path()).is_some());
}

#[tokio::test]
async fn test_login_with_empty_password_makes_no_request() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--email", "student@example.com"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill in all fields"));

    assert!(read_session(home.path()).is_none());
}

#[tokio::test]
async fn test_login_failure_shows_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(serde_json::json!({"message": "Please verify your email"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--email", "student@example.com", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Please verify your email"));

    assert!(read_session(home.path()).is_none());
}

#[tokio::test]
async fn test_login_failure_without_message_uses_fallback() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--email", "student@example.com", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}

#[tokio::test]
async fn test_google_login_exchanges_identity_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;
    let token = token_expiring_in(3600);

    Mock::given(method("POST"))
        .and(path("/api/users/google-login"))
        .and(body_json(serde_json::json!({"token": "google-credential"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": token})))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--google", "google-credential"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Logged in"));

    let session = read_session(home.path()).expect("session.json should exist");
    assert_eq!(session["token"], token.as_str());
}

#[tokio::test]
async fn test_google_login_failure_uses_fixed_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/google-login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({"message": "bad audience"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .env("STUDYBUDDY_API_URL", server.uri())
        .args(["login", "--google", "google-credential"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Google login failed. Try again."));
}

#[test]
fn test_login_requires_a_method() {
    let home = temp_home();

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .arg("login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Specify exactly one of --email or --google"));
}

#[test]
fn test_logout_when_not_logged_in() {
    let home = temp_home();

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_removes_session() {
    let home = temp_home();
    fixtures::write_session(home.path(), &token_expiring_in(3600));

    cargo_bin_cmd!("studybuddy")
        .env("STUDYBUDDY_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Logged out"));

    assert!(!home.path().join("session.json").exists());
}
