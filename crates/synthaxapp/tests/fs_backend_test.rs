use synthaxapp::store::backend::StorageBackend;
use synthaxapp::store::fs_backend::FsBackend;
use synthaxapp::store::StorageKey;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_io() {
    let (_dir, backend) = setup();

    // 1. Absent
    assert_eq!(backend.read(StorageKey::Mentors).unwrap(), None);

    // 2. Write + read
    backend.write(StorageKey::Mentors, "[]").unwrap();
    assert_eq!(
        backend.read(StorageKey::Mentors).unwrap(),
        Some("[]".to_string())
    );

    // 3. Remove, twice
    backend.remove(StorageKey::Mentors).unwrap();
    backend.remove(StorageKey::Mentors).unwrap();
    assert_eq!(backend.read(StorageKey::Mentors).unwrap(), None);
}

#[test]
fn test_fs_backend_file_names() {
    let (dir, backend) = setup();
    backend.write(StorageKey::ForumPosts, "[]").unwrap();
    backend.write(StorageKey::AuthSession, "{}").unwrap();

    assert!(dir.path().join("synthax_forum_posts.json").exists());
    assert!(dir.path().join("synthax_auth.json").exists());
}

#[test]
fn test_fs_backend_custom_prefix() {
    let (dir, backend) = setup();
    let backend = backend.with_prefix("demo_");
    backend.write(StorageKey::Theme, "\"light\"").unwrap();

    assert!(dir.path().join("demo_theme.json").exists());
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.write(StorageKey::Courses, "first").unwrap();
    backend.write(StorageKey::Courses, "second").unwrap();

    let on_disk = fs::read_to_string(dir.path().join("synthax_courses.json")).unwrap();
    assert_eq!(on_disk, "second");

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone());

    backend.write(StorageKey::User, "{}").unwrap();
    assert!(nested.join("synthax_user.json").exists());
}

#[test]
fn test_fs_backend_failed_rename_cleans_up() {
    let (dir, backend) = setup();
    // A non-empty directory where the file should go makes the rename fail.
    let blocker = dir.path().join("synthax_courses.json");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), "x").unwrap();

    assert!(backend.write(StorageKey::Courses, "[]").is_err());

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}
