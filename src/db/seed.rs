//! Sample categories and recipes for development databases.
//!
//! Categories are matched by name, so seeding twice refreshes their
//! descriptions instead of duplicating them. Recipes are only inserted into
//! an empty `recipes` table.

use std::collections::HashMap;

use validator::Validate;

use crate::error::AppResult;
use crate::models::{Difficulty, NewCategory, NewRecipe, UpdateCategory};
use crate::repositories::Repositories;

const CATEGORIES: &[(&str, &str)] = &[
    ("Ontbijt", "Recepten voor een gezond ontbijt"),
    ("Lunch", "Snelle en makkelijke lunch recepten"),
    ("Diner", "Hoofdgerechten voor het avondeten"),
    ("Dessert", "Zoete lekkernijen en nagerechten"),
    ("Vegetarisch", "Vleesvrije gerechten"),
    ("Vegan", "Volledig plantaardig"),
];

struct SeedRecipe {
    title: &'static str,
    description: &'static str,
    ingredients: &'static str,
    instructions: &'static str,
    prep_time: i32,
    cook_time: i32,
    servings: i32,
    difficulty: Difficulty,
    category: &'static str,
}

const RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        title: "Pannenkoeken",
        description: "Heerlijke Nederlandse pannenkoeken",
        ingredients: "250g bloem, 2 eieren, 500ml melk, snufje zout, boter",
        instructions: "1. Mix alle ingrediënten tot een glad beslag. 2. Laat 10 minuten rusten. 3. Bak in een hete pan met boter.",
        prep_time: 10,
        cook_time: 15,
        servings: 4,
        difficulty: Difficulty::Easy,
        category: "Ontbijt",
    },
    SeedRecipe {
        title: "Overnight Oats",
        description: "Kant-en-klaar havermout ontbijt",
        ingredients: "100g havermout, 200ml amandelmelk, 1 el chiazaad, honing, vers fruit",
        instructions: "1. Mix havermout, melk en chiazaad. 2. Laat een nacht in de koelkast staan. 3. Top met vers fruit.",
        prep_time: 5,
        cook_time: 0,
        servings: 2,
        difficulty: Difficulty::Easy,
        category: "Ontbijt",
    },
    SeedRecipe {
        title: "Tomatensoep",
        description: "Romige soep met verse tomaten",
        ingredients: "1kg tomaten, 1 ui, 2 teentjes knoflook, basilicum, room, bouillon",
        instructions: "1. Bak ui en knoflook. 2. Voeg tomaten en bouillon toe. 3. Kook 20 minuten. 4. Pureer en voeg room toe.",
        prep_time: 10,
        cook_time: 25,
        servings: 4,
        difficulty: Difficulty::Easy,
        category: "Lunch",
    },
    SeedRecipe {
        title: "Griekse Salade",
        description: "Frisse salade met feta en olijven",
        ingredients: "2 komkommers, 4 tomaten, 1 rode ui, 200g feta, olijven, oregano, olijfolie",
        instructions: "1. Snijd alle groenten in stukken. 2. Verkruimel de feta. 3. Besprenkel met olijfolie.",
        prep_time: 15,
        cook_time: 0,
        servings: 4,
        difficulty: Difficulty::Easy,
        category: "Lunch",
    },
    SeedRecipe {
        title: "Spaghetti Bolognese",
        description: "Klassieke Italiaanse pasta",
        ingredients: "400g spaghetti, 500g gehakt, 400g tomaten, ui, knoflook, wortel, selderij",
        instructions: "1. Bak het gehakt met ui en knoflook. 2. Voeg tomaten toe en laat 30 min sudderen. 3. Kook de pasta.",
        prep_time: 15,
        cook_time: 45,
        servings: 4,
        difficulty: Difficulty::Easy,
        category: "Diner",
    },
    SeedRecipe {
        title: "Beef Bourguignon",
        description: "Franse stoofschotel met rode wijn",
        ingredients: "1kg rundvlees, 750ml rode wijn, 200g spekblokjes, champignons, wortels",
        instructions: "1. Braad het vlees aan. 2. Bak spek en groenten. 3. Voeg wijn en kruiden toe. 4. Stoof 2-3 uur.",
        prep_time: 30,
        cook_time: 180,
        servings: 6,
        difficulty: Difficulty::Hard,
        category: "Diner",
    },
    SeedRecipe {
        title: "Tiramisu",
        description: "Italiaans koffiedessert",
        ingredients: "500g mascarpone, 4 eieren, 100g suiker, lange vingers, espresso, cacaopoeder",
        instructions: "1. Maak de mascarponecrème. 2. Dip koekjes in koffie. 3. Bouw lagen op. 4. Laat 4 uur koelen.",
        prep_time: 30,
        cook_time: 0,
        servings: 8,
        difficulty: Difficulty::Medium,
        category: "Dessert",
    },
    SeedRecipe {
        title: "Crème Brûlée",
        description: "Franse room met karamelkorst",
        ingredients: "500ml room, 6 eidooiers, 100g suiker, vanillestok",
        instructions: "1. Verwarm room met vanille. 2. Mix met eidooiers en suiker. 3. Bak au bain-marie. 4. Karameliseer de top.",
        prep_time: 15,
        cook_time: 45,
        servings: 6,
        difficulty: Difficulty::Hard,
        category: "Dessert",
    },
    SeedRecipe {
        title: "Shakshuka",
        description: "Midden-Oosterse gepocheerde eieren",
        ingredients: "400g tomaten, 4 eieren, paprika, ui, knoflook, komijn, feta",
        instructions: "1. Bak ui, paprika en knoflook. 2. Voeg tomaten en kruiden toe. 3. Pocheer de eieren in de saus.",
        prep_time: 10,
        cook_time: 20,
        servings: 2,
        difficulty: Difficulty::Easy,
        category: "Vegetarisch",
    },
    SeedRecipe {
        title: "Aubergine Parmigiana",
        description: "Italiaanse aubergine ovenschotel",
        ingredients: "2 aubergines, 400g tomatensaus, 250g mozzarella, parmezaan, basilicum",
        instructions: "1. Snijd en gril de aubergine. 2. Bouw lagen met saus en kaas. 3. Bak 40 minuten.",
        prep_time: 25,
        cook_time: 40,
        servings: 4,
        difficulty: Difficulty::Medium,
        category: "Vegetarisch",
    },
    SeedRecipe {
        title: "Vegan Curry",
        description: "Romige kokoscurry met groenten",
        ingredients: "400ml kokosmelk, 400g kikkererwten, spinazie, currypasta, gember, rijst",
        instructions: "1. Fruit de pasta met gember. 2. Voeg kokosmelk en kikkererwten toe. 3. Serveer met rijst.",
        prep_time: 10,
        cook_time: 20,
        servings: 4,
        difficulty: Difficulty::Easy,
        category: "Vegan",
    },
    SeedRecipe {
        title: "Falafel Wrap",
        description: "Krokante falafel met hummus",
        ingredients: "Kikkererwten, ui, knoflook, koriander, komijn, tortillas, hummus, salade",
        instructions: "1. Maal kikkererwten met kruiden. 2. Vorm balletjes en bak ze. 3. Serveer in wrap met hummus.",
        prep_time: 20,
        cook_time: 15,
        servings: 4,
        difficulty: Difficulty::Medium,
        category: "Vegan",
    },
];

/// What a seed run changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories_created: usize,
    pub categories_updated: usize,
    pub recipes_created: usize,
}

/// Inserts the sample data.
///
/// Existing active categories with a sample name get the sample
/// description. Recipes are skipped entirely when any recipe row exists,
/// deleted ones included.
pub async fn seed(repos: &Repositories) -> AppResult<SeedReport> {
    let mut report = SeedReport::default();
    let mut category_ids = HashMap::with_capacity(CATEGORIES.len());

    for (name, description) in CATEGORIES {
        let id = match repos.categories.find_by_name(name).await? {
            Some(existing) => {
                let changes = UpdateCategory {
                    name: None,
                    description: Some(Some(description.to_string())),
                };
                repos.categories.update(existing.id, changes).await?;
                report.categories_updated += 1;
                existing.id
            }
            None => {
                let new_category = NewCategory {
                    name: name.to_string(),
                    description: Some(description.to_string()),
                };
                new_category.validate()?;
                report.categories_created += 1;
                repos.categories.create(new_category).await?.category.id
            }
        };
        category_ids.insert(*name, id);
    }

    if repos.recipes.counts().await?.total() > 0 {
        tracing::info!("Recipes already present, skipping recipe seed");
        return Ok(report);
    }

    for recipe in RECIPES {
        let new_recipe = NewRecipe {
            title: recipe.title.to_string(),
            description: Some(recipe.description.to_string()),
            ingredients: recipe.ingredients.to_string(),
            instructions: recipe.instructions.to_string(),
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: Some(recipe.servings),
            difficulty: Some(recipe.difficulty),
            category_id: category_ids.get(recipe.category).copied(),
        };
        new_recipe.validate()?;
        repos.recipes.create(new_recipe).await?;
        report.recipes_created += 1;
    }

    tracing::info!(
        categories_created = report.categories_created,
        categories_updated = report.categories_updated,
        recipes_created = report.recipes_created,
        "Seed data inserted"
    );

    Ok(report)
}
