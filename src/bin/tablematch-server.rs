//! tablematch HTTP server binary

use std::sync::Arc;
use tablematch::server::run_server;
use tablematch::{
    Catalog, DatasetLocation, DatasetSource, EncodedTable, HttpSource, JsonFileSource, Recommender,
    Restaurant, ServerConfig, StaticSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    println!("tablematch restaurant recommender");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let config = ServerConfig::from_env()?;

    let source: Box<dyn DatasetSource> = match &config.dataset {
        DatasetLocation::Demo => {
            println!("✓ Mode: DEMO dataset");
            println!("   (unset --demo to load real datasets)");
            Box::new(demo_source()?)
        }
        DatasetLocation::Http(url) => {
            println!("✓ Dataset service: {}", url);
            let source = HttpSource::new(url.clone());
            match source.health_check().await {
                Ok(true) => println!("✓ Dataset service is healthy"),
                Ok(false) => eprintln!("⚠️  Dataset service health check did not succeed"),
                Err(e) => {
                    eprintln!("❌ Failed to connect to dataset service: {}", e);
                    return Err(e);
                }
            }
            Box::new(source)
        }
        DatasetLocation::Files { restaurants, encoded } => {
            println!("✓ Restaurants: {}", restaurants.display());
            println!("✓ Encoded features: {}", encoded.display());
            Box::new(JsonFileSource::new(restaurants.clone(), encoded.clone()))
        }
    };

    let catalog = Catalog::load(source.as_ref()).await?;
    println!(
        "✓ Catalog loaded: {} restaurants, {} cities, {} cuisines",
        catalog.len(),
        catalog.cities().len(),
        catalog.cuisines().len()
    );

    let recommender = Recommender::new(Arc::new(catalog));

    println!("✓ Starting HTTP server on port {}...", config.port);
    println!();

    run_server(recommender, config.port).await?;

    Ok(())
}

/// Small built-in dataset for trying the server without data files
fn demo_source() -> anyhow::Result<StaticSource> {
    let rows: [(&str, &str, &str, f64, f64, f64, &str); 10] = [
        ("Bombay Canteen", "Mumbai", "Indian", 4.6, 900.0, 35.0, "Lower Parel"),
        ("Ling's Pavilion", "Mumbai", "Chinese", 4.3, 800.0, 40.0, "Colaba"),
        ("Mainland China", "Mumbai", "Chinese", 4.1, 700.0, 30.0, "Andheri West"),
        ("Britannia & Co", "Mumbai", "Indian", 4.4, 500.0, 45.0, "Ballard Estate"),
        ("Toit", "Bangalore", "Continental", 4.5, 1200.0, 50.0, "Indiranagar"),
        ("Vidyarthi Bhavan", "Bangalore", "Indian", 4.7, 150.0, 25.0, "Basavanagudi"),
        ("Chung Wah", "Bangalore", "Chinese", 3.9, 600.0, 35.0, "Richmond Town"),
        ("Karim's", "Delhi", "Indian", 4.2, 400.0, 40.0, "Jama Masjid"),
        ("Yum Yum Cha", "Delhi", "Chinese", 4.0, 1100.0, 30.0, "Connaught Place"),
        ("Big Chill", "Delhi", "Continental", 4.5, 900.0, 45.0, "Khan Market"),
    ];

    let cuisines = ["Chinese", "Continental", "Indian"];
    let mut columns: Vec<String> = vec!["cost".into(), "delivery_time".into(), "rating".into()];
    columns.extend(cuisines.iter().map(|c| c.to_string()));

    let mut restaurants = Vec::with_capacity(rows.len());
    let mut encoded = Vec::with_capacity(rows.len());

    for (name, city, cuisine, rating, cost, delivery_time, address) in rows {
        restaurants.push(Restaurant {
            name: name.to_string(),
            city: Some(city.to_string()),
            cuisine: Some(cuisine.to_string()),
            rating: Some(rating),
            cost: Some(cost),
            delivery_time: Some(delivery_time),
            address: Some(address.to_string()),
        });

        let mut row = vec![Some(cost), Some(delivery_time), Some(rating)];
        row.extend(cuisines.iter().map(|c| Some(if *c == cuisine { 1.0 } else { 0.0 })));
        encoded.push(row);
    }

    Ok(StaticSource::new(restaurants, EncodedTable::new(columns, encoded)?))
}
