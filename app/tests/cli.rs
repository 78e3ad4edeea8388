use assert_cmd::Command;
use mocks::{album_server, base_url};
use predicates::prelude::*;
use tempfile::TempDir;

fn command_in_home(bin: &str, home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    cmd.env("HOME", home);
    cmd.env_remove("ALBUMVIEW_PASSWORD");
    cmd.arg("--log-dir").arg(home.join("logs"));
    cmd
}

#[test]
fn album_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("album_cli")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Album server command line client"));
    Ok(())
}

#[test]
fn albumview_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("albumview")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Terminal album viewer"));
    Ok(())
}

#[test]
fn album_cli_url_is_offline() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = command_in_home("album_cli", home.path());
    cmd.args([
        "--server-url",
        "http://photos.lan/albums/",
        "url",
        "thumbnail",
        "Summer 2023",
        "a b.jpg",
    ]);
    cmd.assert().success().stdout(predicate::str::contains(
        "http://photos.lan/albums/thumbnails/Summer%202023/a%20b.jpg",
    ));
    Ok(())
}

#[test]
fn album_cli_rejects_unknown_media_kind() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = command_in_home("album_cli", home.path());
    cmd.args(["url", "video", "a", "b.jpg"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown media kind"));
    Ok(())
}

#[test]
fn album_cli_requires_credentials() -> Result<(), Box<dyn std::error::Error>> {
    let home = TempDir::new()?;
    let mut cmd = command_in_home("album_cli", home.path());
    cmd.args(["--server-url", "http://127.0.0.1:9", "albums"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--username and --password"));
    Ok(())
}

#[test]
fn album_cli_lists_albums() -> Result<(), Box<dyn std::error::Error>> {
    let server = album_server();
    mocks::expect_login(&server, "/albums", "alice");
    mocks::expect_albums(&server, "/albums", &["first", "second"]);

    let home = TempDir::new()?;
    let mut cmd = command_in_home("album_cli", home.path());
    cmd.args(["--server-url", &base_url(&server, "/albums")]);
    cmd.args(["--username", "alice", "--password", "secret", "albums"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("first (id: first)"))
        .stdout(predicate::str::contains("second (id: second)"));
    Ok(())
}

#[test]
fn album_cli_contents_with_env_password() -> Result<(), Box<dyn std::error::Error>> {
    let server = album_server();
    mocks::expect_login(&server, "", "bob");
    mocks::expect_contents(&server, "", "Summer%202023", &["2.jpg", "1.jpg"]);

    let home = TempDir::new()?;
    let mut cmd = command_in_home("album_cli", home.path());
    cmd.env("ALBUMVIEW_PASSWORD", "secret");
    cmd.args(["--server-url", &base_url(&server, "")]);
    cmd.args(["--username", "bob", "contents", "Summer 2023"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2.jpg\n1.jpg"));
    Ok(())
}

#[test]
fn albumview_login_and_slideshow_session() -> Result<(), Box<dyn std::error::Error>> {
    let server = album_server();
    mocks::expect_me_unauthenticated(&server, "");
    mocks::expect_login(&server, "", "alice");
    mocks::expect_albums(&server, "", &["trip"]);
    mocks::expect_contents(&server, "", "trip", &["1.jpg", "2.jpg"]);

    let home = TempDir::new()?;
    let mut cmd = command_in_home("albumview", home.path());
    cmd.args(["--server-url", &base_url(&server, "")]);
    cmd.write_stdin("login alice secret\nplay\nspace\n]\nesc\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sign in"))
        .stdout(predicate::str::contains("* trip (trip)"))
        .stdout(predicate::str::contains("[slideshow playing 7s] 1.jpg"))
        .stdout(predicate::str::contains("» Paused"))
        .stdout(predicate::str::contains("» Speed: 9s"));
    Ok(())
}

#[test]
fn albumview_reports_rejected_login() -> Result<(), Box<dyn std::error::Error>> {
    let server = album_server();
    mocks::expect_me_unauthenticated(&server, "");
    mocks::expect_login_rejected(&server, "");

    let home = TempDir::new()?;
    let mut cmd = command_in_home("albumview", home.path());
    cmd.args(["--server-url", &base_url(&server, "")]);
    cmd.write_stdin("login alice wrong\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("! Invalid username/password"));
    Ok(())
}
