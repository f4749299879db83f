use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn video(channel: &str, published: &str, views: u64, likes: u64) -> Value {
    json!({
        "video_id": format!("{}-{}", channel, published),
        "video_title": format!("{} picks", channel),
        "channel": channel,
        "link": "https://www.youtube.com/watch?v=abc",
        "published": published,
        "view_count": views,
        "like_count": likes,
    })
}

fn book(id: &str, title: &str, author: Option<&str>, videos: Vec<Value>) -> Value {
    let views: u64 = videos.iter().map(|v| v["view_count"].as_u64().unwrap()).sum();
    let likes: u64 = videos.iter().map(|v| v["like_count"].as_u64().unwrap()).sum();
    json!({
        "id": id,
        "title": title,
        "author": author,
        "amazon_url": format!("https://www.amazon.co.jp/dp/{}", id),
        "count": videos.len(),
        "total_views": views,
        "total_likes": likes,
        "videos": videos,
    })
}

/// A small catalogue: two named books plus enough filler for three pages.
fn write_dataset(dir: &Path) {
    let mut books = vec![
        book(
            "4873119324",
            "Deep Work",
            Some("Cal Newport"),
            vec![
                video("Book Club", "2023-03-01T09:00:00Z", 5000, 100),
                video("Book Club", "2023-06-01T09:00:00Z", 4000, 80),
                video("Reader", "2022-01-10T09:00:00Z", 100, 5),
            ],
        ),
        book(
            "4478025819",
            "THE MONEY BOOK",
            None,
            vec![video("Reader", "2023-02-01T09:00:00Z", 90000, 900)],
        ),
    ];
    for i in 0..43 {
        books.push(book(
            &format!("filler{:02}", i),
            &format!("Filler {:02}", i),
            Some("Anon"),
            vec![video("Reader", "2021-05-05T09:00:00Z", 10, 1)],
        ));
    }

    let channels = json!({
        "channels": [
            {"name": "Book Club", "channel_id": "UCbookclub", "subscribers": "12万人", "note": ""},
            {"name": "Reader", "channel_id": "UCreader", "subscribers": "3万人"},
        ]
    });

    fs::write(dir.join("books.json"), Value::Array(books).to_string()).unwrap();
    fs::write(dir.join("channels.json"), channels.to_string()).unwrap();
}

struct Fixture {
    home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let home = TempDir::new().unwrap();
        let data = home.path().join("data");
        fs::create_dir(&data).unwrap();
        write_dataset(&data);
        Self { home }
    }

    fn without_data() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("bookrank").unwrap();
        cmd.current_dir(self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join("config"))
            .env("HOME", self.home.path())
            .env_remove("BOOKRANK_DATA")
            .env_remove("RUST_LOG")
            .env_remove("CLICOLOR_FORCE")
            .arg("--no-color");
        cmd
    }
}

#[test]
fn test_default_listing_ranks_by_points() {
    let fx = Fixture::new();
    fx.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("By points"))
        // Book Club x2 + Reader x1 = (5 + 1) + 5
        .stdout(predicate::str::contains(" 1. Deep Work"))
        .stdout(predicate::str::contains("11 pts"))
        .stdout(predicate::str::contains("(1-20 of 45)"))
        .stdout(predicate::str::contains("view: ?\n"));
}

#[test]
fn test_listing_flags_and_share_line() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--sort", "views", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. THE MONEY BOOK"))
        .stdout(predicate::str::contains(" 2. Deep Work"))
        .stdout(predicate::str::contains("9,000 views"))
        .stdout(predicate::str::contains("(1-2 of 2)"))
        .stdout(predicate::str::contains("view: ?sort=views&year=2023"));
}

#[test]
fn test_last_page_holds_the_remainder() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--page", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("41. "))
        .stdout(predicate::str::contains("45. "))
        .stdout(predicate::str::contains("(41-45 of 45)"))
        .stdout(predicate::str::contains("1 2 [3]"))
        .stdout(predicate::str::contains("view: ?page=3"));
}

#[test]
fn test_url_state_round_trips() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--url", "https://books.example/?q=money&sort=likes"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 1. THE MONEY BOOK"))
        .stdout(predicate::str::contains("Deep Work").not())
        .stdout(predicate::str::contains("view: ?sort=likes&q=money"));
}

#[test]
fn test_channel_filter_narrows_counts() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--channel", "Book Club", "--sort", "count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 mentions"))
        .stdout(predicate::str::contains("(1-1 of 1)"))
        .stdout(predicate::str::contains("view: ?sort=count&channel=Book%20Club"));
}

#[test]
fn test_page_past_the_end_is_reported() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["list", "--page", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books on this page."))
        .stdout(predicate::str::contains("Page 9 is past the end (3 pages)."));
}

#[test]
fn test_show_book() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["show", "4873119324"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep Work\nCal Newport"))
        .stdout(predicate::str::contains("11 pts from 2 channels"))
        .stdout(predicate::str::contains("3 mentions · 9,100 views · 185 likes"))
        .stdout(predicate::str::contains("2023-03-01"));
}

#[test]
fn test_show_unknown_book_is_not_an_error() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["show", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Book not found: nope"))
        .stdout(predicate::str::contains("Back to the ranking: bookrank list"));
}

#[test]
fn test_channels_directory() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("channels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Book Club"))
        .stdout(predicate::str::contains("12万人  2 mentions"))
        .stdout(predicate::str::contains("https://www.youtube.com/channel/UCreader"))
        .stdout(predicate::str::contains("3万人  45 mentions"));
}

#[test]
fn test_stats() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("45 books, 47 mentions"))
        .stdout(predicate::str::contains("2023 2022 2021"))
        .stdout(predicate::str::contains("45  Reader"));
}

#[test]
fn test_link_from_isbn() {
    let fx = Fixture::new();
    fs::write(
        fx.home.path().join("bookrank.json"),
        r#"{"associate_tag": "shelf-22"}"#,
    )
    .unwrap();

    fx.cmd()
        .args(["link", "978-4-87311-932-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://www.amazon.co.jp/dp/4873119324?tag=shelf-22",
        ));
}

#[test]
fn test_link_rejects_bad_codes() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["link", "9791234567896"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid product code"));
}

#[test]
fn test_missing_dataset_degrades_to_empty_view() {
    let fx = Fixture::without_data();
    fx.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to show."))
        .stdout(predicate::str::contains("The catalogue is unavailable right now."))
        .stderr(predicate::str::contains("failed to load dataset"));
}

#[test]
fn test_data_flag_points_at_another_directory() {
    let fx = Fixture::without_data();
    let elsewhere = TempDir::new().unwrap();
    write_dataset(elsewhere.path());

    fx.cmd()
        .args(["--data", elsewhere.path().to_str().unwrap(), "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("45 books"));
}

#[test]
fn test_grouped_help() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Browse:"))
        .stdout(predicate::str::contains("Catalogue:"))
        .stdout(predicate::str::contains("channels"));
}
