use std::{fs, path::Path};

use sitecfg::{build, BuildConfig};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

// Changes the working directory, so it stays the only test in this binary.
#[tokio::test]
async fn relative_root_still_detects_overlap() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("site");
    write(&project, "src/index.njk", "");
    write(&project, "src/css/site.css", "body{}");
    write(&project, "admin/index.html", "");
    write(&project, "public/robots.txt", "");
    write(&project, "notes.txt", "keep me");
    write(dir.path(), "sibling.txt", "keep me too");
    std::env::set_current_dir(&project).unwrap();

    let mut config = BuildConfig::default();
    config.dirs.output = ".".into();
    let err = build(Path::new("."), &config).await.unwrap_err();
    assert!(err.to_string().contains("overlaps"));

    config.dirs.output = "..".into();
    let err = build(Path::new("."), &config).await.unwrap_err();
    assert!(err.to_string().contains("overlaps"));

    assert!(project.join("notes.txt").is_file());
    assert!(project.join("src/index.njk").is_file());
    assert!(dir.path().join("sibling.txt").is_file());

    let summary = build(Path::new("."), &BuildConfig::default()).await.unwrap();
    assert!(summary.output_dir.is_absolute());
    assert!(project.join("_site/css/site.css").is_file());
    assert!(project.join("_site/robots.txt").is_file());
    assert_eq!(summary.templates.len(), 1);

    std::env::set_current_dir(std::env::temp_dir()).unwrap();
}
