//! Repository tests over in-memory and file-backed storage.

use user_admin_api::domain::{NewUser, Password, User, UserChanges};
use user_admin_api::infra::{
    Document, FileStorage, JsonUserRepository, MemoryStorage, Storage, UserRepository,
};

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        avatar: None,
        password_hash: "hash".to_string(),
    }
}

fn seeded_repo() -> JsonUserRepository<MemoryStorage> {
    JsonUserRepository::new(MemoryStorage::seeded().unwrap())
}

#[tokio::test]
async fn test_create_then_get_round_trip_with_defaults() {
    let repo = seeded_repo();

    let created = repo.create(new_user("janet.weaver@reqres.in")).await.unwrap();
    assert_eq!(created.id, 2);
    // Avatar defaulted from the assigned id
    assert_eq!(created.avatar, "https://reqres.in/img/faces/2-image.jpg");

    let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, "janet.weaver@reqres.in");
    assert_eq!(fetched.first_name, "Test");
    assert_eq!(fetched.avatar, created.avatar);
}

#[tokio::test]
async fn test_create_keeps_explicit_avatar() {
    let repo = seeded_repo();

    let mut input = new_user("emma.wong@reqres.in");
    input.avatar = Some("https://example.com/custom.png".to_string());

    let created = repo.create(input).await.unwrap();
    assert_eq!(created.avatar, "https://example.com/custom.png");
}

#[tokio::test]
async fn test_empty_update_is_a_no_op() {
    let repo = seeded_repo();
    let before = repo.find_by_id(1).await.unwrap().unwrap();

    let after = repo
        .update(1, UserChanges::default())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(after.id, before.id);
    assert_eq!(after.email, before.email);
    assert_eq!(after.first_name, before.first_name);
    assert_eq!(after.last_name, before.last_name);
    assert_eq!(after.avatar, before.avatar);
    assert_eq!(after.password, before.password);
}

#[tokio::test]
async fn test_update_merges_only_provided_fields() {
    let repo = seeded_repo();

    let updated = repo
        .update(
            1,
            UserChanges {
                first_name: Some("Georgie".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, 1);
    assert_eq!(updated.first_name, "Georgie");
    // Everything else preserved
    assert_eq!(updated.last_name, "Bluth");
    assert_eq!(updated.email, "george.bluth@reqres.in");
}

#[tokio::test]
async fn test_update_missing_record_is_none() {
    let repo = seeded_repo();
    let result = repo.update(99, UserChanges::default()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_removes_record_and_decrements_total() {
    let repo = seeded_repo();
    repo.create(new_user("janet.weaver@reqres.in")).await.unwrap();

    let total_before = repo.list(1, 6).await.unwrap().total;
    assert!(repo.delete(1).await.unwrap());

    assert!(repo.find_by_id(1).await.unwrap().is_none());
    let page = repo.list(1, 6).await.unwrap();
    assert_eq!(page.total, total_before - 1);

    // Deleting again reports nothing removed
    assert!(!repo.delete(1).await.unwrap());
}

#[tokio::test]
async fn test_id_assignment_recomputes_from_persisted_max() {
    let repo = seeded_repo();

    let second = repo.create(new_user("a@example.com")).await.unwrap();
    assert_eq!(second.id, 2);
    let third = repo.create(new_user("b@example.com")).await.unwrap();
    assert_eq!(third.id, 3);

    // Deleting a lower id never rewinds the assignment
    repo.delete(1).await.unwrap();
    let fourth = repo.create(new_user("c@example.com")).await.unwrap();
    assert_eq!(fourth.id, 4);
}

#[tokio::test]
async fn test_find_by_email_is_case_sensitive() {
    let repo = seeded_repo();

    let found = repo.find_by_email("george.bluth@reqres.in").await.unwrap();
    assert!(found.is_some());

    let not_found = repo.find_by_email("George.Bluth@reqres.in").await.unwrap();
    assert!(not_found.is_none());
}

#[tokio::test]
async fn test_pagination_slices_cover_collection_exactly_once() {
    let repo = JsonUserRepository::new(MemoryStorage::empty());
    for i in 1..=7 {
        repo.create(new_user(&format!("user{}@example.com", i)))
            .await
            .unwrap();
    }

    let per_page = 3;
    let first = repo.list(1, per_page).await.unwrap();
    assert_eq!(first.total, 7);
    assert_eq!(first.total_pages, 3);
    assert!(first.data.len() as u64 <= per_page);

    let mut seen: Vec<u64> = Vec::new();
    for page in 1..=first.total_pages {
        let slice = repo.list(page, per_page).await.unwrap();
        assert!(slice.data.len() as u64 <= per_page);
        seen.extend(slice.data.iter().map(|user| user.id));
    }

    let expected: Vec<u64> = (1..=7).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_out_of_range_page_is_empty_not_an_error() {
    let repo = seeded_repo();
    let page = repo.list(10, 6).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_file_storage_seeds_on_first_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("users.json");

    let storage = FileStorage::new(&path);
    let document = storage.read().await.unwrap();

    assert_eq!(document.total, 1);
    assert_eq!(document.data[0].email, "george.bluth@reqres.in");
    // Seeded password is a verifiable hash, not the plain text
    assert!(Password::from_hash(document.data[0].password.clone()).verify("1234"));
    assert!(path.exists());
}

#[tokio::test]
async fn test_file_storage_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");

    {
        let repo = JsonUserRepository::new(FileStorage::new(&path));
        repo.create(new_user("janet.weaver@reqres.in")).await.unwrap();
    }

    // A fresh repository over the same file sees the data and continues
    // id assignment from what is on disk.
    let repo = JsonUserRepository::new(FileStorage::new(&path));
    assert!(repo
        .find_by_email("janet.weaver@reqres.in")
        .await
        .unwrap()
        .is_some());

    let next = repo.create(new_user("emma.wong@reqres.in")).await.unwrap();
    assert_eq!(next.id, 3);
}

#[tokio::test]
async fn test_document_written_back_keeps_invariants() {
    let storage = MemoryStorage::seeded().unwrap();
    let repo = JsonUserRepository::new(storage);

    repo.create(new_user("a@example.com")).await.unwrap();
    repo.create(new_user("b@example.com")).await.unwrap();
    repo.delete(2).await.unwrap();

    // Re-read the raw document through a fresh repository view
    let document: Document = repo.list(1, 100).await.unwrap();
    assert_eq!(document.total, document.data.len() as u64);
    let ids: Vec<u64> = document.data.iter().map(|u: &User| u.id).collect();
    assert_eq!(ids, vec![1, 3]);
}
