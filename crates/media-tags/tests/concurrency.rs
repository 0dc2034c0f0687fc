//! Concurrent operations on one folder must not lose updates.

use media_tags::TagService;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_keep_every_tag() {
    let temp = TempDir::new().unwrap();
    tokio::fs::write(temp.path().join("x.png"), b"x").await.unwrap();
    let service = Arc::new(TagService::with_file_store());

    let mut handles = Vec::new();
    for i in 0..24 {
        let service = service.clone();
        let folder = temp.path().to_path_buf();
        handles.push(tokio::spawn(async move {
            service
                .add_tag(&folder, "x.png", &format!("tag-{}", i))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut tags = service.get_tags(temp.path(), "x.png").await.unwrap();
    tags.sort();
    let mut expected: Vec<String> = (0..24).map(|i| format!("tag-{}", i)).collect();
    expected.sort();
    assert_eq!(tags, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_across_files_in_one_folder() {
    let temp = TempDir::new().unwrap();
    for i in 0..8 {
        tokio::fs::write(temp.path().join(format!("{}.png", i)), format!("content {}", i))
            .await
            .unwrap();
    }
    let service = Arc::new(TagService::with_file_store());

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        let folder = temp.path().to_path_buf();
        handles.push(tokio::spawn(async move {
            service
                .add_tag(&folder, &format!("{}.png", i), "seen")
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let all = service.list_all(temp.path()).await.unwrap();
    assert_eq!(all.len(), 8);
    assert!(all.values().all(|tags| tags == &vec!["seen".to_string()]));
}
