//! FieldChain tests: transitions, invalidation and generation tagging.

use fipe_sdk::{CatalogKey, Field, FieldChain, FieldState, FipeError, Lookup, Resolution};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn key_of(lookups: &[Lookup], field: Field) -> &CatalogKey {
    &lookups.iter().find(|l| l.field == field).unwrap().key
}

/// A chain with Fiat / Uno / 2020 / Flex fully selected and every list ready.
fn complete_chain() -> FieldChain {
    let mut chain = FieldChain::new();
    for lookup in chain.set_brand("Fiat") {
        chain.resolve(&lookup, Ok(strings(&["Uno", "2020"])));
    }
    for lookup in chain.set_model("Uno").unwrap() {
        chain.resolve(&lookup, Ok(strings(&["2020"])));
    }
    for lookup in chain.set_year("2020").unwrap() {
        chain.resolve(&lookup, Ok(strings(&["Flex"])));
    }
    chain.set_fuel_type("Flex").unwrap();
    chain
}

// ---------------------------------------------------------------------------
// set_brand
// ---------------------------------------------------------------------------

#[test]
fn set_brand_issues_years_and_models_lookups() {
    let mut chain = FieldChain::new();
    let lookups = chain.set_brand("Fiat");

    assert_eq!(lookups.len(), 2);
    assert_eq!(
        key_of(&lookups, Field::Year),
        &CatalogKey::YearsForBrand { brand: "Fiat".into() }
    );
    assert_eq!(
        key_of(&lookups, Field::Model),
        &CatalogKey::ModelsForBrand { brand: "Fiat".into() }
    );
    assert_eq!(chain.state(Field::Model), Some(&FieldState::Loading));
    assert_eq!(chain.state(Field::Year), Some(&FieldState::Loading));
    assert_eq!(chain.state(Field::FuelType), Some(&FieldState::Empty));
}

#[test]
fn set_brand_resets_all_downstream_values() {
    let mut chain = complete_chain();
    assert!(chain.is_complete());

    chain.set_brand("VW");
    assert_eq!(chain.value(Field::Brand), "VW");
    assert_eq!(chain.value(Field::Model), "");
    assert_eq!(chain.value(Field::Year), "");
    assert_eq!(chain.value(Field::FuelType), "");
    assert!(chain.options(Field::FuelType).is_empty());
    assert!(!chain.is_complete());
}

#[test]
fn empty_brand_clears_without_lookups() {
    let mut chain = complete_chain();
    let lookups = chain.set_brand("");
    assert!(lookups.is_empty());
    assert_eq!(chain.state(Field::Model), Some(&FieldState::Empty));
    assert_eq!(chain.state(Field::Year), Some(&FieldState::Empty));
    assert!(!chain.is_enabled(Field::Model));
}

// ---------------------------------------------------------------------------
// set_model
// ---------------------------------------------------------------------------

#[test]
fn set_model_requires_brand() {
    let mut chain = FieldChain::new();
    let err = chain.set_model("Uno").unwrap_err();
    assert!(matches!(err, FipeError::FieldDisabled(Field::Model)));
}

#[test]
fn set_model_resets_fuel_and_year_but_keeps_brand() {
    let mut chain = complete_chain();
    let lookups = chain.set_model("Palio").unwrap();

    assert_eq!(chain.value(Field::Brand), "Fiat");
    assert_eq!(chain.value(Field::Model), "Palio");
    assert_eq!(chain.value(Field::Year), "");
    assert_eq!(chain.value(Field::FuelType), "");
    assert_eq!(chain.state(Field::FuelType), Some(&FieldState::Empty));
    assert_eq!(lookups.len(), 1);
    assert_eq!(chain.state(Field::Year), Some(&FieldState::Loading));
}

#[test]
fn year_lookup_switches_once_model_is_set() {
    let mut chain = FieldChain::new();
    let brand_lookups = chain.set_brand("Fiat");
    assert_eq!(
        key_of(&brand_lookups, Field::Year),
        &CatalogKey::YearsForBrand { brand: "Fiat".into() }
    );

    let model_lookups = chain.set_model("Uno").unwrap();
    assert_eq!(
        key_of(&model_lookups, Field::Year),
        &CatalogKey::YearsForModel {
            brand: "Fiat".into(),
            model: "Uno".into()
        }
    );
}

// ---------------------------------------------------------------------------
// set_year / set_fuel_type
// ---------------------------------------------------------------------------

#[test]
fn set_year_without_model_narrows_models() {
    let mut chain = FieldChain::new();
    chain.set_brand("Fiat");
    let lookups = chain.set_year("2020").unwrap();

    assert_eq!(lookups.len(), 1);
    assert_eq!(
        key_of(&lookups, Field::Model),
        &CatalogKey::ModelsForYear {
            brand: "Fiat".into(),
            year: "2020".into()
        }
    );
    assert_eq!(chain.value(Field::Year), "2020");
}

#[test]
fn set_year_with_model_loads_fuel_types() {
    let mut chain = FieldChain::new();
    chain.set_brand("Fiat");
    chain.set_model("Uno").unwrap();
    let lookups = chain.set_year("2020").unwrap();

    assert_eq!(
        key_of(&lookups, Field::FuelType),
        &CatalogKey::FuelTypes {
            brand: "Fiat".into(),
            model: "Uno".into(),
            year: "2020".into()
        }
    );
    assert!(chain.is_enabled(Field::FuelType));
}

#[test]
fn set_year_resets_fuel_type() {
    let mut chain = complete_chain();
    chain.set_year("2019").unwrap();
    assert_eq!(chain.value(Field::FuelType), "");
    assert_eq!(chain.value(Field::Model), "Uno");
    assert_eq!(chain.state(Field::FuelType), Some(&FieldState::Loading));
}

#[test]
fn fuel_type_requires_all_upstream_fields() {
    let mut chain = FieldChain::new();
    chain.set_brand("Fiat");
    chain.set_model("Uno").unwrap();
    assert!(!chain.is_enabled(Field::FuelType));
    assert!(matches!(
        chain.set_fuel_type("Flex"),
        Err(FipeError::FieldDisabled(Field::FuelType))
    ));
}

#[test]
fn set_fuel_type_issues_no_lookups() {
    let mut chain = complete_chain();
    let lookups = chain.set(Field::FuelType, "Gasolina").unwrap();
    assert!(lookups.is_empty());
    assert_eq!(chain.vehicle().fuel_type, "Gasolina");
}

// ---------------------------------------------------------------------------
// resolve / staleness
// ---------------------------------------------------------------------------

#[test]
fn resolve_populates_option_list() {
    let mut chain = FieldChain::new();
    let lookups = chain.set_brand("Fiat");
    let models = lookups.iter().find(|l| l.field == Field::Model).unwrap();

    let resolution = chain.resolve(models, Ok(strings(&["Uno", "Argo"])));
    assert_eq!(resolution, Resolution::Applied);
    assert_eq!(chain.options(Field::Model), strings(&["Uno", "Argo"]).as_slice());
    assert_eq!(chain.state(Field::Year), Some(&FieldState::Loading));
}

#[test]
fn empty_result_is_ready_not_error() {
    let mut chain = FieldChain::new();
    let lookups = chain.set_brand("Fiat");
    chain.resolve(&lookups[0], Ok(Vec::new()));
    assert_eq!(chain.state(lookups[0].field), Some(&FieldState::Ready(Vec::new())));
}

#[test]
fn failed_lookup_sets_error_and_leaves_other_fields_editable() {
    let mut chain = FieldChain::new();
    let lookups = chain.set_brand("Fiat");
    let years = lookups.iter().find(|l| l.field == Field::Year).unwrap();
    let models = lookups.iter().find(|l| l.field == Field::Model).unwrap();

    let resolution = chain.resolve(years, Err(FipeError::NotFound("anos".into())));
    assert_eq!(resolution, Resolution::Failed);
    assert!(matches!(chain.state(Field::Year), Some(FieldState::Error(_))));
    assert!(chain.options(Field::Year).is_empty());

    assert_eq!(chain.resolve(models, Ok(strings(&["Uno"]))), Resolution::Applied);
    assert!(chain.set_model("Uno").is_ok());
}

#[test]
fn late_response_for_superseded_brand_is_discarded() {
    let mut chain = FieldChain::new();
    let fiat = chain.set_brand("Fiat");
    let vw = chain.set_brand("VW");

    for lookup in &vw {
        assert_eq!(chain.resolve(lookup, Ok(strings(&["Gol"]))), Resolution::Applied);
    }
    // Fiat's responses arrive after VW's.
    for lookup in &fiat {
        assert_eq!(chain.resolve(lookup, Ok(strings(&["Uno"]))), Resolution::Stale);
    }

    assert_eq!(chain.options(Field::Model), strings(&["Gol"]).as_slice());
    assert_eq!(chain.options(Field::Year), strings(&["Gol"]).as_slice());
}

#[test]
fn rapid_brand_changes_keep_only_last_brand_options() {
    let mut chain = FieldChain::new();
    let first = chain.set_brand("Fiat");
    let second = chain.set_brand("Ford");
    let third = chain.set_brand("VW");

    // Deliver in scrambled order.
    for lookup in second.iter().chain(third.iter()).chain(first.iter()) {
        let brand = match &lookup.key {
            CatalogKey::ModelsForBrand { brand } | CatalogKey::YearsForBrand { brand } => brand.clone(),
            other => panic!("unexpected key {other:?}"),
        };
        chain.resolve(lookup, Ok(vec![brand]));
    }

    assert_eq!(chain.options(Field::Model), strings(&["VW"]).as_slice());
    assert_eq!(chain.options(Field::Year), strings(&["VW"]).as_slice());
}

#[test]
fn stale_failure_does_not_overwrite_ready_list() {
    let mut chain = FieldChain::new();
    let old = chain.set_brand("Fiat");
    let new = chain.set_brand("VW");
    for lookup in &new {
        chain.resolve(lookup, Ok(strings(&["Gol"])));
    }
    for lookup in &old {
        let resolution = chain.resolve(lookup, Err(FipeError::NotFound("gone".into())));
        assert_eq!(resolution, Resolution::Stale);
    }
    assert_eq!(chain.options(Field::Model), strings(&["Gol"]).as_slice());
}

#[test]
fn fuel_lookup_is_stale_after_model_change() {
    let mut chain = FieldChain::new();
    chain.set_brand("Fiat");
    chain.set_model("Uno").unwrap();
    let fuel = chain.set_year("2020").unwrap();

    chain.set_model("Argo").unwrap();
    assert_eq!(chain.resolve(&fuel[0], Ok(strings(&["Flex"]))), Resolution::Stale);
    assert_eq!(chain.state(Field::FuelType), Some(&FieldState::Empty));
}
