use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

const CUSTOMERS: [&str; 8] = [
    "Alice Archer", "Bob Brook", "Carol Chen", "Dave Diaz",
    "Erin Egan", "Frank Field", "Grace Gill", "Hank Hale"
];

const PRODUCTS: [(&str, f64, f64); 6] = [
    ("Widget", 3.00, 5.00),
    ("Gadget", 10.00, 20.00),
    ("Doohickey", 1.50, 2.50),
    ("Gizmo", 7.25, 12.75),
    ("Contraption", 22.00, 39.99),
    ("Sprocket", 0.80, 1.95)
];

struct GeneratorConfig {
    num_records: usize,
    output_path: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(50);

        Self {
            num_records,
            output_path: "samples/generated.csv".to_string()
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!("Generating {} sales records in {}...", config.num_records, config.output_path);

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = io::BufWriter::new(file);

    writeln!(writer, "sale_date,customer_name,product_name,product_quantity,product_unit_buy_price,product_unit_sale_price")?;

    let mut rng = rand::rng();
    let mut dates: Vec<NaiveDate> = (0..config.num_records)
        .filter_map(|_| {
            let offset = rng.random_range(0..365);
            NaiveDate::from_ymd_opt(2024, 1, 1).map(|start| start + chrono::Days::new(offset))
        })
        .collect();
    dates.sort();

    for date in dates {
        let customer = CUSTOMERS.choose(&mut rng).copied().unwrap_or("Alice Archer");
        let (product, buy, sale) = PRODUCTS.choose(&mut rng).copied().unwrap_or(PRODUCTS[0]);
        let quantity: u32 = rng.random_range(1..=12);

        // Jitter prices a little so aggregates are not perfectly uniform.
        let buy_price = jitter(&mut rng, buy);
        let sale_price = jitter(&mut rng, sale);

        writeln!(
            writer,
            "{},{},{},{},{},{}",
            date.format("%Y-%m-%d"), customer, product, quantity, buy_price, sale_price
        )?;
    }

    println!("Generation complete.");

    Ok(())
}

fn jitter<R: Rng>(rng: &mut R, base: f64) -> Decimal {
    let factor = rng.random_range(0.9..1.1);

    Decimal::from_f64(base * factor).unwrap_or_default().round_dp(2)
}
