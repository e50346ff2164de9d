use mirrorsync_core::{
    ContentHash, EventSink, Fault, MirrorConfig, NameMatching, SyncError, SyncEvent, SyncEventKind,
};
use std::path::PathBuf;

#[test]
fn test_content_hash_equality() {
    let hash = ContentHash::new([0xab; 32]);
    let hash2 = ContentHash::new([0xab; 32]);
    let hash3 = ContentHash::new([0xcd; 32]);

    assert_eq!(hash, hash2);
    assert_ne!(hash, hash3);
    assert!(hash.to_hex().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: MirrorConfig = toml::from_str(
        r#"
            source = "/src"
            replica = "/dst"
            log_file = "/log/mirror.log"
            name_matching = "case-insensitive"
        "#,
    )
    .unwrap();

    assert_eq!(config.source, PathBuf::from("/src"));
    assert_eq!(config.replica, PathBuf::from("/dst"));
    assert_eq!(config.interval_secs, 60);
    assert_eq!(config.name_matching, NameMatching::CaseInsensitive);
    assert!(config.console);
}

#[test]
fn test_fault_events_render_like_log_lines() {
    let mut sink: Vec<SyncEvent> = Vec::new();
    let err = SyncError::io(
        "/src/locked",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    sink.record(SyncEvent::now(SyncEventKind::io_fault("/src", err.to_string())));
    sink.record(SyncEvent::now(SyncEventKind::source_missing("/src/gone")));

    assert_eq!(sink[0].message(), "Error: Permission denied: /src/locked");
    assert_eq!(
        sink[1].message(),
        "Source directory does not exist: /src/gone"
    );
    assert!(matches!(
        sink[1].kind,
        SyncEventKind::Fault {
            fault: Fault::SourceMissing,
            ..
        }
    ));
}
