use alcove::files::resolver::{PathResolver, Resolved, ResolveError};
use std::fs;
use tempfile::TempDir;

/// A served root with an index, a few files, a subdirectory, and a
/// sibling directory that must stay unreachable.
fn fixture() -> (TempDir, PathResolver) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("www");
    fs::create_dir(&root).unwrap();

    fs::write(root.join("index.html"), "<h1>hi</h1>").unwrap();
    fs::write(root.join("style.css"), "body {}").unwrap();
    fs::write(root.join("README"), "no extension here").unwrap();
    fs::create_dir(root.join("docs")).unwrap();
    fs::write(root.join("docs/index.html"), "docs index").unwrap();

    let outside = dir.path().join("outside");
    fs::create_dir(&outside).unwrap();
    fs::write(outside.join("secret.txt"), "top secret").unwrap();

    let resolver = PathResolver::new("/www", root);
    (dir, resolver)
}

#[test]
fn test_claims_by_prefix() {
    let (_dir, resolver) = fixture();

    assert!(resolver.claims("/www/index.html"));
    assert!(resolver.claims("/www"));
    assert!(!resolver.claims("/api/data"));
    assert!(!resolver.claims("/"));
}

#[test]
fn test_resolve_plain_file() {
    let (_dir, resolver) = fixture();

    let resolved = resolver.resolve("/www/index.html").unwrap();
    let Resolved::File(served) = resolved else {
        panic!("expected a file");
    };

    assert!(served.path.ends_with("www/index.html"));
    assert_eq!(served.extension, "html");
}

#[test]
fn test_resolve_missing_file() {
    let (_dir, resolver) = fixture();

    let result = resolver.resolve("/www/missing.txt");
    assert!(matches!(result, Err(ResolveError::NotFound)));
}

#[test]
fn test_resolve_bare_prefix_is_the_root_directory() {
    // "/www" with no trailing slash names the root directory itself and
    // must redirect, not 404
    let (_dir, resolver) = fixture();

    let resolved = resolver.resolve("/www").unwrap();
    assert!(matches!(resolved, Resolved::RedirectToDir));
}

#[test]
fn test_resolve_directory_with_trailing_slash_serves_index() {
    let (_dir, resolver) = fixture();

    let Resolved::File(served) = resolver.resolve("/www/").unwrap() else {
        panic!("expected the index file");
    };

    assert!(served.path.ends_with("www/index.html"));
    assert_eq!(served.extension, "html");
}

#[test]
fn test_resolve_subdirectory_redirect_and_index() {
    let (_dir, resolver) = fixture();

    assert!(matches!(
        resolver.resolve("/www/docs").unwrap(),
        Resolved::RedirectToDir
    ));

    let Resolved::File(served) = resolver.resolve("/www/docs/").unwrap() else {
        panic!("expected the docs index");
    };
    assert!(served.path.ends_with("docs/index.html"));
}

#[test]
fn test_resolve_directory_without_index() {
    let (dir, resolver) = fixture();
    fs::create_dir(dir.path().join("www/empty")).unwrap();

    let result = resolver.resolve("/www/empty/");
    assert!(matches!(result, Err(ResolveError::NotFound)));
}

#[test]
fn test_resolve_extension_annotation() {
    let (_dir, resolver) = fixture();

    let Resolved::File(served) = resolver.resolve("/www/style.css").unwrap() else {
        panic!("expected a file");
    };
    assert_eq!(served.extension, "css");

    let Resolved::File(served) = resolver.resolve("/www/README").unwrap() else {
        panic!("expected a file");
    };
    assert_eq!(served.extension, "");
}

#[test]
fn test_resolve_dot_dot_traversal_is_caught() {
    let (_dir, resolver) = fixture();

    let result = resolver.resolve("/www/../outside/secret.txt");
    assert!(matches!(result, Err(ResolveError::Traversal)));
}

#[test]
fn test_resolve_deep_traversal_never_escapes() {
    let (_dir, resolver) = fixture();

    for target in [
        "/www/../../../../etc/passwd",
        "/www/docs/../../outside/secret.txt",
        "/www/./../outside/secret.txt",
    ] {
        let result = resolver.resolve(target);
        assert!(
            matches!(
                result,
                Err(ResolveError::Traversal) | Err(ResolveError::NotFound)
            ),
            "target {:?} must not resolve",
            target
        );
    }
}

#[cfg(unix)]
#[test]
fn test_resolve_symlink_escape_is_caught() {
    let (dir, resolver) = fixture();
    std::os::unix::fs::symlink(
        dir.path().join("outside/secret.txt"),
        dir.path().join("www/escape.txt"),
    )
    .unwrap();

    let result = resolver.resolve("/www/escape.txt");
    assert!(matches!(result, Err(ResolveError::Traversal)));
}

#[cfg(unix)]
#[test]
fn test_resolve_symlinked_index_escape_is_caught() {
    // A directory inside the root whose index.html points outside it
    let (dir, resolver) = fixture();
    fs::create_dir(dir.path().join("www/leaky")).unwrap();
    std::os::unix::fs::symlink(
        dir.path().join("outside/secret.txt"),
        dir.path().join("www/leaky/index.html"),
    )
    .unwrap();

    let result = resolver.resolve("/www/leaky/");
    assert!(matches!(result, Err(ResolveError::Traversal)));
}

#[test]
fn test_resolve_root_prefix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), "root index").unwrap();
    let resolver = PathResolver::new("/", dir.path());

    let Resolved::File(served) = resolver.resolve("/").unwrap() else {
        panic!("expected the index file");
    };
    assert!(served.path.ends_with("index.html"));

    let Resolved::File(served) = resolver.resolve("/index.html").unwrap() else {
        panic!("expected a file");
    };
    assert_eq!(served.extension, "html");
}
