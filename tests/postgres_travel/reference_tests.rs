//! Reference data stored in `PostgreSQL`.

use super::helpers::{TestDatabase, database, unique};
use rstest::rstest;
use std::sync::Arc;
use travelprep::reference::{
    adapters::postgres::PostgresCountryCatalog,
    domain::{CountryName, CountrySeed, ReferenceSeed, UnionSeed, VaccineSeed},
    ports::CountryCatalog,
    services::ReferenceDataService,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn imported_country_is_found_case_insensitively(#[future] database: TestDatabase) {
    let db = database.await;
    let catalog = Arc::new(PostgresCountryCatalog::new(db.pool().clone()));
    let name = unique("Ruritania");
    let neighbour = unique("Grand Fenwick");
    let seed = ReferenceSeed {
        countries: vec![CountrySeed {
            name: name.clone(),
            malaria_presence: true,
            advisory_level: Some(2),
            vaccines: vec![VaccineSeed {
                category: "Rabies".to_owned(),
                note: None,
            }],
        }],
        climates: Vec::new(),
        unions: vec![UnionSeed {
            name: unique("Alliance"),
            members: vec![name.clone(), neighbour],
            visa_required_between_members: false,
            common_visa: true,
        }],
    };

    let summary = ReferenceDataService::new(Arc::clone(&catalog))
        .import(&seed)
        .await
        .expect("seed imported");
    let lookup = CountryName::new(name.to_uppercase()).expect("valid name");
    let country = catalog
        .find_country(&lookup)
        .await
        .expect("lookup succeeds")
        .expect("country exists");
    let unions = catalog.unions_for(&lookup).await.expect("unions listed");

    assert_eq!(summary.countries, 1);
    assert_eq!(country.name().as_str(), name);
    assert!(country.malaria_presence());
    assert_eq!(country.vaccines().len(), 1);
    assert_eq!(unions.len(), 1);
    assert!(catalog
        .find_climate(&lookup)
        .await
        .expect("lookup succeeds")
        .is_none());
}
