// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
use predicates::prelude::*;
use std::fs;

fn sitepad() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("sitepad").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn build_default_project() {
    sitepad()
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build completed successfully!"))
        .stdout(predicate::str::contains("Generated 2 pages:"))
        .stdout(predicate::str::contains("- _site/index.html"))
        .stdout(predicate::str::contains("- _site/about/index.html"));
}

#[test]
fn tree_lists_node_ids() {
    sitepad()
        .arg("tree")
        .arg("--toggle")
        .arg("includes")
        .assert()
        .success()
        .stdout(predicate::str::contains("[index-md]"))
        .stdout(predicate::str::contains("[includes]"))
        .stdout(predicate::str::contains("base.njk").not())
        .stdout(predicate::str::contains("Editing src/index.md (markdown)"));
}

#[test]
fn tree_reports_a_folder_selection() {
    sitepad()
        .args(["tree", "--select", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Select a file from the tree"));
}

#[test]
fn preview_shows_the_index_page() {
    sitepad()
        .arg("preview")
        .arg("--viewport")
        .arg("mobile")
        .assert()
        .success()
        .stdout(predicate::str::contains("Previewing index.html (mobile 375px × 667px)"))
        .stdout(predicate::str::contains("<h1>Welcome to Your 11ty Site!</h1>"))
        .stdout(predicate::str::contains(r#"<a href="/about/">About</a>"#));
}

#[test]
fn preview_selects_a_page() {
    sitepad()
        .args(["preview", "--page", "about/index.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>About</h1>"));
}

#[test]
fn preview_rejects_unknown_pages() {
    sitepad()
        .args(["preview", "--page", "_site/missing.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no generated page"));
}

#[test]
fn replaced_content_is_built() {
    let dir = tempfile::tempdir().unwrap();
    let page = dir.path().join("about.md");
    fs::write(&page, "---\ntitle: Contact\n---\n# Say **hi**").unwrap();

    sitepad()
        .arg("preview")
        .arg("--replace")
        .arg(format!("about-md={}", page.display()))
        .arg("--page")
        .arg("_site/about/index.html")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Say <strong>hi</strong></h1>"))
        .stdout(predicate::str::contains("<title>Contact | My 11ty Site</title>"));
}

#[test]
fn invalid_config_fails_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("sitepad.toml");
    fs::write(&config, "output_dir = \"\"\n").unwrap();

    sitepad()
        .arg("build")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Build failed: build setting 'output_dir' must not be empty",
        ));
}

#[test]
fn builds_a_project_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/_includes")).unwrap();
    fs::write(
        dir.path().join("src/_includes/base.njk"),
        "<main>{{ content | safe }}</main>",
    )
    .unwrap();
    fs::write(dir.path().join("src/index.md"), "---\ntitle: Home\n---\n# Home").unwrap();
    fs::write(dir.path().join("src/draft.md"), "# no front matter").unwrap();

    sitepad()
        .arg("build")
        .arg("--project")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 pages:\n- _site/index.html"));
}

#[test]
fn export_writes_pages() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("out");

    sitepad()
        .arg("export")
        .arg(&destination)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));

    let about = fs::read_to_string(destination.join("_site/about/index.html")).unwrap();
    assert!(about.contains("<h1>About</h1>"));
    assert!(destination.join("_site/index.html").is_file());
}

#[test]
fn export_writes_to_a_parent_relative_destination() {
    let dir = tempfile::tempdir().unwrap();
    let work = dir.path().join("work");
    fs::create_dir(&work).unwrap();

    sitepad()
        .current_dir(&work)
        .args(["export", "../out", "--yes"])
        .assert()
        .success();

    assert!(dir.path().join("out/_site/index.html").is_file());
    assert!(!work.join("out").exists());
}
