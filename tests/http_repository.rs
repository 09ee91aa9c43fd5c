mod common;

use catalog_taxonomy::domain::hierarchy::ConflictScope;
use catalog_taxonomy::domain::subcategory::{NewSubCategory, SubCategory};
use catalog_taxonomy::domain::types::{
    CategoryId, SubCategoryId, SubCategoryName, SubCategorySlug,
};
use catalog_taxonomy::forms::subcategories::{
    AddSubCategoryForm, AddSubCategoryFormPayload, UpdateSubCategoryForm,
    UpdateSubCategoryFormPayload,
};
use catalog_taxonomy::repository::{
    RepositoryError, SubCategoryListQuery, SubCategoryReader, SubCategoryWriter,
};
use catalog_taxonomy::services::categories::show_categories;
use catalog_taxonomy::services::parents::resolve_available_parents;
use catalog_taxonomy::services::reconcile::classify_write_conflict;
use catalog_taxonomy::services::subcategories::{
    create_subcategory, show_subcategories, update_subcategory,
};
use serde_json::json;

use crate::common::{ParentsRoute, StubBackend, StubState, sunglasses_catalog};

fn ids(nodes: &[SubCategory]) -> Vec<i32> {
    nodes.iter().map(|n| n.id.get()).collect()
}

#[tokio::test]
async fn missing_parents_route_falls_back_to_category_listing() {
    let backend =
        StubBackend::spawn(StubState::new(sunglasses_catalog()).parents_route(ParentsRoute::Absent))
            .await;
    let repo = backend.repository();

    let parents = resolve_available_parents(&repo, CategoryId::new(7).unwrap(), None)
        .await
        .unwrap();

    assert_eq!(ids(&parents), vec![10]);
    assert_eq!(
        backend.requests(),
        vec!["/subcategories/available-parents", "/subcategories"]
    );
}

#[tokio::test]
async fn malformed_records_do_not_hide_the_rest_of_the_listing() {
    let records = vec![
        json!({"id": 10, "categoryId": 7, "parentId": null, "name": "Sun"}),
        json!({"id": 11, "categoryId": 7, "parentId": 10, "name": "Polarized"}),
        json!({"id": 14, "categoryId": 7, "parentId": 0, "name": "Legacy"}),
        json!({"id": 15, "categoryId": 7, "parentId": null, "name": "   "}),
    ];
    let backend =
        StubBackend::spawn(StubState::new(records).parents_route(ParentsRoute::Absent)).await;
    let repo = backend.repository();
    let category = CategoryId::new(7).unwrap();

    let parents = resolve_available_parents(&repo, category, None)
        .await
        .unwrap();
    assert_eq!(ids(&parents), vec![14, 10]);

    let rows = show_subcategories(category, &repo).await.unwrap();
    let row_ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    assert_eq!(row_ids, vec![14, 10, 11]);
}

#[tokio::test]
async fn parents_route_is_used_when_deployed() {
    let mut records = sunglasses_catalog();
    records.push(json!({"id": 13, "categoryId": 7, "parentId": null, "name": "Ski"}));
    let backend = StubBackend::spawn(StubState::new(records)).await;
    let repo = backend.repository();

    let parents = resolve_available_parents(
        &repo,
        CategoryId::new(7).unwrap(),
        Some(SubCategoryId::new(10).unwrap()),
    )
    .await
    .unwrap();

    assert_eq!(ids(&parents), vec![13]);
    assert_eq!(backend.requests(), vec!["/subcategories/available-parents"]);
}

#[tokio::test]
async fn slow_parents_route_times_out_and_falls_back() {
    let backend =
        StubBackend::spawn(StubState::new(sunglasses_catalog()).parents_route(ParentsRoute::Slow))
            .await;
    let repo = backend.repository();

    let err = repo
        .list_available_parents(CategoryId::new(7).unwrap(), None)
        .await
        .unwrap_err();
    assert_eq!(err, RepositoryError::Timeout);

    let parents = resolve_available_parents(&repo, CategoryId::new(7).unwrap(), None)
        .await
        .unwrap();
    assert_eq!(ids(&parents), vec![10]);
}

#[tokio::test]
async fn listing_normalizes_aliased_records() {
    let records = vec![
        json!({"_id": 20, "category": {"id": 9}, "parent": null, "title": "Rings", "order": 2}),
        json!({"id": 21, "category": {"id": 9}, "parent": {"_id": 20}, "name": "Gold", "active": false}),
    ];
    let backend = StubBackend::spawn(StubState::new(records)).await;
    let repo = backend.repository();

    let nodes = repo
        .list_subcategories(SubCategoryListQuery::new(CategoryId::new(9).unwrap()))
        .await
        .unwrap();

    assert_eq!(ids(&nodes), vec![20, 21]);
    assert!(nodes[0].is_top_level());
    assert_eq!(nodes[0].name.as_str(), "Rings");
    assert_eq!(nodes[0].sort_order, Some(2));
    assert_eq!(nodes[1].parent_id, Some(SubCategoryId::new(20).unwrap()));
    assert!(!nodes[1].is_active);
}

#[tokio::test]
async fn created_child_keeps_requested_parent_when_echo_omits_it() {
    let backend =
        StubBackend::spawn(StubState::new(sunglasses_catalog()).omit_parent_in_echo()).await;
    let repo = backend.repository();

    let payload = AddSubCategoryFormPayload::try_from(AddSubCategoryForm {
        category_id: 7,
        parent_id: Some(10),
        name: "Mirrored".to_string(),
        slug: None,
        is_active: Some(true),
        sort_order: None,
        description: None,
    })
    .unwrap();
    let created = create_subcategory(payload, &repo).await.unwrap();

    assert_eq!(created.parent_id, Some(SubCategoryId::new(10).unwrap()));
    assert_eq!(created.slug.as_ref().map(|s| s.as_str()), Some("mirrored"));

    let stored = backend.records();
    let record = stored.iter().find(|r| r["name"] == "Mirrored").unwrap();
    assert_eq!(record["parentId"], json!(10));
}

#[tokio::test]
async fn promoting_a_child_sends_and_keeps_null_parent() {
    let backend = StubBackend::spawn(StubState::new(sunglasses_catalog())).await;
    let repo = backend.repository();

    let payload = UpdateSubCategoryFormPayload::try_from(UpdateSubCategoryForm {
        subcategory_id: 11,
        category_id: 7,
        parent_id: None,
        name: "Polarized".to_string(),
        slug: Some("polarized".to_string()),
        is_active: Some(true),
        sort_order: None,
        description: None,
    })
    .unwrap();
    let updated = update_subcategory(payload, &repo).await.unwrap();

    assert!(updated.is_top_level());
    let rows = show_subcategories(CategoryId::new(7).unwrap(), &repo)
        .await
        .unwrap();
    assert!(rows.iter().all(|row| row.parent_id.is_none()));
}

#[tokio::test]
async fn backend_duplicate_is_a_same_parent_conflict() {
    let backend = StubBackend::spawn(StubState::new(sunglasses_catalog())).await;
    let repo = backend.repository();

    let draft = NewSubCategory {
        category_id: CategoryId::new(7).unwrap(),
        parent_id: Some(SubCategoryId::new(10).unwrap()),
        name: SubCategoryName::new("Polarized").unwrap(),
        slug: SubCategorySlug::new("polarized").unwrap(),
        is_active: true,
        sort_order: None,
        description: None,
    };
    let err = repo.create_subcategory(&draft).await.unwrap_err();

    let RepositoryError::Conflict(message) = err else {
        panic!("expected a conflict, got {err:?}");
    };
    let conflict = classify_write_conflict(&message, draft.parent_id);
    assert_eq!(conflict.scope, ConflictScope::SameParent);
}

#[tokio::test]
async fn updating_unknown_node_is_reported_by_status() {
    let backend = StubBackend::spawn(StubState::new(sunglasses_catalog())).await;
    let repo = backend.repository();

    let draft = NewSubCategory {
        category_id: CategoryId::new(7).unwrap(),
        parent_id: None,
        name: SubCategoryName::new("Ghost").unwrap(),
        slug: SubCategorySlug::new("ghost").unwrap(),
        is_active: true,
        sort_order: None,
        description: None,
    };
    let err = repo
        .update_subcategory(SubCategoryId::new(404).unwrap(), &draft)
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Status { status: 404, .. }));
}

#[tokio::test]
async fn categories_are_read_from_wrapped_envelope() {
    let backend = StubBackend::spawn(StubState::new(vec![])).await;
    let repo = backend.repository();

    let categories = show_categories(&repo).await.unwrap();

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Sunglasses", "Watches"]);
    assert_eq!(categories[1].id, 8);
}
