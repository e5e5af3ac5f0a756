//! Integration tests for SqliteShopRepository.

mod common;

use adbiz_core::{AdbizError, ShopChanges, ShopDraft, User, UserRole};
use adbiz_repository::ShopRepository;
use common::TestDatabase;

fn draft_for(owner: &User, username: &str) -> ShopDraft {
    ShopDraft::new(
        owner.id,
        &owner.mobile_number,
        "Spice Hub".to_string(),
        username.to_string(),
        "food".to_string(),
    )
}

#[tokio::test]
async fn test_insert_and_find_by_owner() {
    let db = TestDatabase::new().await;
    let repo = db.shops();
    let seller = db.seed_user("9998887777", UserRole::Seller).await;

    let shop = repo
        .insert(&draft_for(&seller, "spicehub"))
        .await
        .expect("Failed to insert shop");
    assert_eq!(shop.shop_id, "food9998887777spicehubSpice Hub");
    assert_eq!(shop.user_id, seller.id);

    let found = repo
        .find_by_owner(seller.id)
        .await
        .expect("Query failed")
        .expect("Shop not found");
    assert_eq!(found, shop);
}

#[tokio::test]
async fn test_second_shop_for_owner_is_conflict() {
    let db = TestDatabase::new().await;
    let repo = db.shops();
    let seller = db.seed_user("9998887777", UserRole::Seller).await;

    repo.insert(&draft_for(&seller, "spicehub"))
        .await
        .expect("Failed to insert shop");

    let err = repo
        .insert(&draft_for(&seller, "spicehub2"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdbizError::Conflict(_)));
}

#[tokio::test]
async fn test_update_shop() {
    let db = TestDatabase::new().await;
    let repo = db.shops();
    let seller = db.seed_user("9998887777", UserRole::Seller).await;
    let mut shop = repo
        .insert(&draft_for(&seller, "spicehub"))
        .await
        .expect("Failed to insert shop");

    shop.apply_changes(ShopChanges {
        bio: Some("Fresh spices daily".to_string()),
        location: Some("Kochi".to_string()),
        ..ShopChanges::default()
    });
    repo.update(&shop).await.expect("Update failed");

    let found = repo
        .find_by_owner(seller.id)
        .await
        .expect("Query failed")
        .expect("Shop not found");
    assert_eq!(found.bio.as_deref(), Some("Fresh spices daily"));
    assert_eq!(found.location.as_deref(), Some("Kochi"));
    assert_eq!(found.shop_id, shop.shop_id);
}

#[tokio::test]
async fn test_soft_delete_and_reactivate() {
    let db = TestDatabase::new().await;
    let repo = db.shops();
    let seller = db.seed_user("9998887777", UserRole::Seller).await;
    let shop = repo
        .insert(&draft_for(&seller, "spicehub"))
        .await
        .expect("Failed to insert shop");

    repo.soft_delete(shop.id).await.expect("Delete failed");
    assert!(repo.find_by_owner(seller.id).await.expect("Query failed").is_none());

    let deleted = repo
        .find_by_owner_including_deleted(seller.id)
        .await
        .expect("Query failed")
        .expect("Deleted shop not found");
    assert!(!deleted.is_active());

    assert!(repo.soft_delete(shop.id).await.unwrap_err().is_not_found());

    repo.reactivate(shop.id).await.expect("Reactivate failed");
    assert!(repo.find_by_owner(seller.id).await.expect("Query failed").is_some());
    assert!(repo.reactivate(shop.id).await.unwrap_err().is_not_found());
}
