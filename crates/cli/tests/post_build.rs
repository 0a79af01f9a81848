use sitegraft::pass::post_build;
use sitegraft_core::{GraftConfig, Outcome, Stage};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// A docs tree with a landing bundle and a site as the generator left it
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let docs = dir.path().join("docs");
    let site = dir.path().join("site");

    write(
        &docs,
        "home/index.html",
        r#"<link href="./style.css"><script src="./index.js"></script><a href="../guide/">Guide</a>"#,
    );
    write(&docs, "land/dist/app.js", "console.log('land')");
    write(&docs, "land/dist/style.css", "body{}");
    write(&docs, "global-assets/logo.svg", "<svg/>");

    write(&site, "index.html", "<p>generated index</p>");
    write(
        &site,
        "guide/index.html",
        r#"<link href="../assets/main.css"><img src="../assets/logo.png"><a href="https://example.com/">x</a>"#,
    );
    write(&site, "assets/main.css", "body{background:url(../assets/bg.png)}");
    write(&site, "sitemap.xml", "<urlset/>");
    write(&site, "404.html", r#"<img src="assets/404.png">"#);
    write(&site, "main.js.map", "{}");

    dir
}

fn config(dir: &TempDir, site_url: Option<&str>) -> GraftConfig {
    GraftConfig::with_dirs(
        dir.path().join("docs"),
        dir.path().join("site"),
        site_url.map(str::to_string),
    )
}

fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().display().to_string();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

#[test]
fn test_post_build_with_base_path() {
    let dir = project();
    let config = config(&dir, Some("https://govhub.github.io/govhub/"));
    let site = dir.path().join("site");

    let report = post_build(&config);
    assert!(!report.has_failures(), "{:?}", report.failures().collect::<Vec<_>>());

    // Entry document replaces the generated index
    assert_eq!(
        read(&site, "index.html"),
        r#"<link href="/govhub/land/dist/style.css"><script src="/govhub/land/dist/index.js"></script><a href="../guide/">Guide</a>"#
    );

    // Secondary trees at both locations
    for rel in [
        "land/dist/app.js",
        "govhub/land/dist/app.js",
        "global-assets/logo.svg",
        "govhub/global-assets/logo.svg",
    ] {
        assert!(site.join(rel).exists(), "{rel} missing");
    }

    // Generated pages duplicated and rewritten at both locations
    let expected = r#"<link href="/govhub/assets/main.css"><img src="/govhub/assets/logo.png"><a href="https://example.com/">x</a>"#;
    assert_eq!(read(&site, "guide/index.html"), expected);
    assert_eq!(read(&site, "govhub/guide/index.html"), expected);
    assert!(site.join("govhub/assets/main.css").exists());

    // Exclusions
    for rel in [
        "govhub/sitemap.xml",
        "govhub/404.html",
        "govhub/index.html",
        "govhub/main.js.map",
        "govhub/govhub",
    ] {
        assert!(!site.join(rel).exists(), "{rel} should not exist");
    }

    // 404 page stays at the root but still gets its asset paths fixed
    assert_eq!(read(&site, "404.html"), r#"<img src="/govhub/assets/404.png">"#);

    // land/public is absent from the docs tree
    assert_eq!(
        report.count(Stage::StaticDir, |o| matches!(o, Outcome::Skipped(_))),
        1
    );
}

#[test]
fn test_post_build_is_rerunnable() {
    let dir = project();
    let config = config(&dir, Some("https://govhub.github.io/govhub/"));
    let site = dir.path().join("site");

    post_build(&config);
    let first = snapshot(&site);

    let report = post_build(&config);
    let second = snapshot(&site);

    assert_eq!(first, second);
    assert_eq!(report.count(Stage::Assets, |o| *o == Outcome::Rewritten), 0);
}

#[test]
fn test_post_build_without_base_path() {
    let dir = project();
    let config = config(&dir, Some("https://govhub.github.io/"));
    let site = dir.path().join("site");

    let report = post_build(&config);

    assert!(!report.has_failures());
    assert!(site.join("land/dist/app.js").exists());
    assert!(read(&site, "index.html").contains(r#"href="/land/dist/style.css""#));
    assert_eq!(
        read(&site, "guide/index.html"),
        r#"<link href="../assets/main.css"><img src="../assets/logo.png"><a href="https://example.com/">x</a>"#
    );
    assert!(report.stage(Stage::Duplicate).next().is_none());
    assert!(report.stage(Stage::Assets).next().is_none());
}
