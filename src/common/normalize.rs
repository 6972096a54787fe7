use std::{
    io,
    path::{Component, Path, PathBuf},
};

/// Lexically resolves `.` and `..` components without touching the filesystem.
/// Leading `..` components of a relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }

    normalized
}

/// Anchors a relative path at the current working directory and normalizes it
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize_path(path))
    } else {
        Ok(normalize_path(&std::env::current_dir()?.join(path)))
    }
}

/// True when `child` is `parent` or lies beneath it, compared lexically
pub fn is_within(child: &Path, parent: &Path) -> bool {
    normalize_path(child).starts_with(normalize_path(parent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_parent_components() {
        assert_eq!(
            normalize_path(Path::new("/site/src/../content")),
            PathBuf::from("/site/content")
        );
        assert_eq!(
            normalize_path(Path::new("src/./_includes")),
            PathBuf::from("src/_includes")
        );
    }

    #[test]
    fn keeps_leading_parents_of_relative_paths() {
        assert_eq!(
            normalize_path(Path::new("../content")),
            PathBuf::from("../content")
        );
        assert_eq!(normalize_path(Path::new("src/..")), PathBuf::from("."));
    }

    #[test]
    fn does_not_escape_root() {
        assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(absolute_path(Path::new(".")).unwrap(), normalize_path(&cwd));
        assert_eq!(
            absolute_path(Path::new("site/../site/src")).unwrap(),
            normalize_path(&cwd.join("site/src"))
        );
        assert_eq!(
            absolute_path(Path::new("/srv/site/./src")).unwrap(),
            PathBuf::from("/srv/site/src")
        );
    }

    #[test]
    fn within_is_component_wise() {
        assert!(is_within(Path::new("/p/src/_site"), Path::new("/p/src")));
        assert!(is_within(Path::new("/p/src"), Path::new("/p/src/")));
        assert!(!is_within(Path::new("/p/src2"), Path::new("/p/src")));
        assert!(!is_within(Path::new("/p/_site"), Path::new("/p/src")));
    }
}
