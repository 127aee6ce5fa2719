#![cfg(feature = "integration")]

mod common;

use common::{cake, category, recipe, setup};
use recipe_store::error::AppError;
use recipe_store::models::{Difficulty, NewRecipe, RecipeListOptions, UpdateRecipe};

fn list_options() -> RecipeListOptions {
    RecipeListOptions::default()
}

#[tokio::test]
async fn test_created_recipe_is_listed_with_its_category_name() {
    let ctx = setup().await;
    let services = &ctx.state.services;

    let desserts = services.categories.create(category("Desserts")).await.unwrap();
    let created = services
        .recipes
        .create(cake(desserts.category.id))
        .await
        .unwrap();

    assert_eq!(created.recipe.difficulty, Difficulty::Medium);
    assert_eq!(created.recipe.servings, 8);
    assert_eq!(created.category_name.as_deref(), Some("Desserts"));

    let page = services
        .recipes
        .list(RecipeListOptions {
            category_id: Some(desserts.category.id),
            ..list_options()
        })
        .await
        .unwrap();

    assert_eq!(page.recipes.len(), 1);
    assert_eq!(page.recipes[0].recipe.id, created.recipe.id);
    assert_eq!(page.recipes[0].recipe.title, "Cake");
    assert_eq!(page.recipes[0].category_name.as_deref(), Some("Desserts"));
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.pagination.returned, 1);
}

#[tokio::test]
async fn test_pagination_reports_filtered_total_and_page_size() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    for i in 0..7 {
        recipes
            .create(recipe(&format!("Recipe {}", i), 5, i + 1))
            .await
            .unwrap();
    }

    for (limit, offset) in [(3i64, 0i64), (3, 6), (3, 7), (10, 2), (1, 100)] {
        let page = recipes
            .list(RecipeListOptions {
                limit: Some(limit),
                offset: Some(offset),
                ..list_options()
            })
            .await
            .unwrap();

        let expected = if offset < 7 { limit.min(7 - offset) } else { 0 };
        assert_eq!(page.pagination.total, 7);
        assert_eq!(page.pagination.limit, limit);
        assert_eq!(page.pagination.offset, offset);
        assert_eq!(page.pagination.returned as i64, expected);
        assert_eq!(page.recipes.len(), page.pagination.returned);
    }
}

#[tokio::test]
async fn test_filters_combine_with_and() {
    let ctx = setup().await;
    let services = &ctx.state.services;

    let lunch = services.categories.create(category("Lunch")).await.unwrap().category.id;
    let dinner = services.categories.create(category("Diner")).await.unwrap().category.id;

    let cases = [
        ("Easy Lunch", Difficulty::Easy, lunch),
        ("Hard Lunch", Difficulty::Hard, lunch),
        ("Easy Dinner", Difficulty::Easy, dinner),
    ];
    for (title, difficulty, category_id) in cases {
        services
            .recipes
            .create(NewRecipe {
                difficulty: Some(difficulty),
                category_id: Some(category_id),
                ..recipe(title, 10, 10)
            })
            .await
            .unwrap();
    }

    let page = services
        .recipes
        .list(RecipeListOptions {
            difficulty: Some(Difficulty::Easy),
            category_id: Some(lunch),
            ..list_options()
        })
        .await
        .unwrap();

    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.recipes[0].recipe.title, "Easy Lunch");
}

#[tokio::test]
async fn test_search_is_case_insensitive_and_literal() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    recipes
        .create(NewRecipe {
            ingredients: "400g SPAGHETTI, 500g gehakt, tomaten".to_string(),
            ..recipe("Bolognese", 15, 45)
        })
        .await
        .unwrap();
    recipes
        .create(NewRecipe {
            description: Some("Cocoa content 100% dark".to_string()),
            ..recipe("Lava Cake", 15, 12)
        })
        .await
        .unwrap();
    recipes.create(recipe("Pancakes", 10, 15)).await.unwrap();

    let search = |term: &str| RecipeListOptions {
        search: Some(term.to_string()),
        ..list_options()
    };

    let page = recipes.list(search("spaghetti")).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.recipes[0].recipe.title, "Bolognese");

    let page = recipes.list(search("CAKE")).await.unwrap();
    assert_eq!(page.pagination.total, 2);

    let page = recipes.list(search("100%")).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.recipes[0].recipe.title, "Lava Cake");

    let page = recipes.list(search("0%d")).await.unwrap();
    assert_eq!(page.pagination.total, 0);
}

#[tokio::test]
async fn test_total_time_sort_orders_by_sum() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    for (title, prep, cook) in [("Slow", 30, 180), ("Quick", 5, 0), ("Middle", 20, 25), ("Short", 1, 9)] {
        recipes.create(recipe(title, prep, cook)).await.unwrap();
    }

    let page = recipes
        .list(RecipeListOptions {
            sort: Some("total_time".to_string()),
            order: Some("asc".to_string()),
            ..list_options()
        })
        .await
        .unwrap();

    let totals: Vec<i32> = page
        .recipes
        .iter()
        .map(|r| r.recipe.prep_time + r.recipe.cook_time)
        .collect();
    assert_eq!(totals, vec![5, 10, 45, 210]);
}

#[tokio::test]
async fn test_title_sort_ignores_case() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    for title in [
        "Zucchini Soup",
        "éclair au chocolat",
        "banana bread",
        "Cherry tart",
        "apple pie",
    ] {
        recipes.create(recipe(title, 10, 10)).await.unwrap();
    }

    let page = recipes
        .list(RecipeListOptions {
            sort: Some("title".to_string()),
            order: Some("ASC".to_string()),
            ..list_options()
        })
        .await
        .unwrap();

    let titles: Vec<&str> = page.recipes.iter().map(|r| r.recipe.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "apple pie",
            "banana bread",
            "Cherry tart",
            "éclair au chocolat",
            "Zucchini Soup"
        ]
    );
}

#[tokio::test]
async fn test_unknown_sort_falls_back_to_newest_first() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    let first = recipes.create(recipe("First", 1, 1)).await.unwrap();
    let second = recipes.create(recipe("Second", 1, 1)).await.unwrap();

    let page = recipes
        .list(RecipeListOptions {
            sort: Some("calories".to_string()),
            ..list_options()
        })
        .await
        .unwrap();

    let ids: Vec<i32> = page.recipes.iter().map(|r| r.recipe.id).collect();
    assert_eq!(ids, vec![second.recipe.id, first.recipe.id]);
}

#[tokio::test]
async fn test_soft_delete_hides_recipe_and_is_idempotent() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;
    let repo = &ctx.state.repositories.recipes;

    let id = recipes.create(recipe("Soup", 10, 25)).await.unwrap().recipe.id;

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());

    assert!(matches!(
        recipes.get(id, false).await,
        Err(AppError::NotFound { .. })
    ));
    let deleted = recipes.get(id, true).await.unwrap();
    assert!(deleted.recipe.deleted_at.is_some());

    assert!(matches!(recipes.delete(id).await, Err(AppError::NotFound { .. })));

    let page = recipes.list(list_options()).await.unwrap();
    assert_eq!(page.pagination.total, 0);

    let page = recipes
        .list(RecipeListOptions {
            include_deleted: Some(true),
            ..list_options()
        })
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 1);
}

#[tokio::test]
async fn test_restore_requires_a_deleted_recipe() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    let id = recipes.create(recipe("Salad", 15, 1)).await.unwrap().recipe.id;

    let err = recipes.restore(id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict { .. }));
    assert!(err.to_string().contains("not deleted"));

    recipes.delete(id).await.unwrap();
    let restored = recipes.restore(id).await.unwrap();
    assert!(restored.recipe.deleted_at.is_none());
    assert!(recipes.get(id, false).await.is_ok());

    assert!(matches!(recipes.restore(9999).await, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let ctx = setup().await;
    let services = &ctx.state.services;

    let desserts = services.categories.create(category("Desserts")).await.unwrap();
    let before = services
        .recipes
        .create(NewRecipe {
            description: Some("Chocolate sponge".to_string()),
            ..cake(desserts.category.id)
        })
        .await
        .unwrap();

    let after = services
        .recipes
        .update(
            before.recipe.id,
            UpdateRecipe {
                servings: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(after.recipe.servings, 10);
    assert_eq!(after.recipe.title, before.recipe.title);
    assert_eq!(after.recipe.description, before.recipe.description);
    assert_eq!(after.recipe.ingredients, before.recipe.ingredients);
    assert_eq!(after.recipe.instructions, before.recipe.instructions);
    assert_eq!(after.recipe.prep_time, before.recipe.prep_time);
    assert_eq!(after.recipe.cook_time, before.recipe.cook_time);
    assert_eq!(after.recipe.difficulty, before.recipe.difficulty);
    assert_eq!(after.recipe.category_id, before.recipe.category_id);
    assert_eq!(after.category_name.as_deref(), Some("Desserts"));
}

#[tokio::test]
async fn test_update_with_explicit_nulls_and_empty_patch() {
    let ctx = setup().await;
    let services = &ctx.state.services;

    let desserts = services.categories.create(category("Desserts")).await.unwrap();
    let created = services
        .recipes
        .create(NewRecipe {
            description: Some("Chocolate sponge".to_string()),
            ..cake(desserts.category.id)
        })
        .await
        .unwrap();
    let id = created.recipe.id;

    let unchanged = services
        .recipes
        .update(id, UpdateRecipe::default())
        .await
        .unwrap();
    assert_eq!(
        unchanged.recipe.updated_at.to_jiff(),
        created.recipe.updated_at.to_jiff()
    );

    let patch: UpdateRecipe =
        serde_json::from_str(r#"{"description": null, "category_id": null}"#).unwrap();
    let cleared = services.recipes.update(id, patch).await.unwrap();
    assert!(cleared.recipe.description.is_none());
    assert!(cleared.recipe.category_id.is_none());
    assert!(cleared.category_name.is_none());
    assert_eq!(cleared.recipe.servings, 8);
}

#[tokio::test]
async fn test_repository_update_leaves_deleted_recipe_untouched() {
    let ctx = setup().await;
    let repo = &ctx.state.repositories.recipes;

    let id = repo.create(recipe("Stamppot", 20, 25)).await.unwrap().recipe.id;
    assert!(repo.delete(id).await.unwrap());

    let updated = repo
        .update(
            id,
            UpdateRecipe {
                title: Some("Hutspot".to_string()),
                servings: Some(6),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_none());

    let stored = repo.find_by_id(id, true).await.unwrap().unwrap();
    assert_eq!(stored.recipe.title, "Stamppot");
    assert_eq!(stored.recipe.servings, 1);
    assert!(stored.recipe.deleted_at.is_some());
}

#[tokio::test]
async fn test_category_reference_must_exist() {
    let ctx = setup().await;
    let services = &ctx.state.services;

    match services.recipes.create(cake(4242)).await {
        Err(AppError::Validation { field, .. }) => assert_eq!(field, "category_id"),
        other => panic!("Expected validation error, got {:?}", other),
    }

    let archived = services.categories.create(category("Archief")).await.unwrap();
    services.categories.delete(archived.category.id).await.unwrap();

    let created = services
        .recipes
        .create(cake(archived.category.id))
        .await
        .unwrap();
    assert_eq!(created.recipe.category_id, Some(archived.category.id));
    assert_eq!(created.category_name.as_deref(), Some("Archief"));
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_storage() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    let err = recipes.create(recipe("No", 0, 0)).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationErrors { .. }));

    let err = recipes
        .list(RecipeListOptions {
            limit: Some(500),
            ..list_options()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationErrors { .. }));

    assert_eq!(recipes.counts().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_hard_delete_removes_any_recipe() {
    let ctx = setup().await;
    let recipes = &ctx.state.services.recipes;

    let active = recipes.create(recipe("Active", 5, 5)).await.unwrap().recipe.id;
    let deleted = recipes.create(recipe("Deleted", 5, 5)).await.unwrap().recipe.id;
    recipes.delete(deleted).await.unwrap();

    recipes.hard_delete(active).await.unwrap();
    recipes.hard_delete(deleted).await.unwrap();

    assert!(recipes.get(active, true).await.is_err());
    assert!(recipes.get(deleted, true).await.is_err());
    assert!(matches!(
        recipes.hard_delete(active).await,
        Err(AppError::NotFound { .. })
    ));
    assert_eq!(recipes.counts().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_list_deleted_returns_most_recent_first() {
    let ctx = setup().await;
    let services = &ctx.state.services;

    let desserts = services.categories.create(category("Desserts")).await.unwrap();
    let first = services
        .recipes
        .create(cake(desserts.category.id))
        .await
        .unwrap()
        .recipe
        .id;
    let second = services.recipes.create(recipe("Soup", 10, 20)).await.unwrap().recipe.id;
    services.recipes.create(recipe("Kept", 10, 20)).await.unwrap();

    services.recipes.delete(first).await.unwrap();
    services.recipes.delete(second).await.unwrap();

    let deleted = services.recipes.list_deleted().await.unwrap();
    let ids: Vec<i32> = deleted.iter().map(|r| r.recipe.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(deleted[1].category_name.as_deref(), Some("Desserts"));

    let counts = services.recipes.counts().await.unwrap();
    assert_eq!(counts.active, 1);
    assert_eq!(counts.deleted, 2);
}
