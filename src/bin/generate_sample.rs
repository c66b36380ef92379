use std::path::PathBuf;

use anyhow::{Context, Result};

use county_report::data::model::{Number, Record, POPULATION_KEY};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[low, high)`.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// A percentage rounded to one decimal place, like the published tables.
fn percent(rng: &mut SimpleRng, low: f64, high: f64) -> Number {
    Number::Float((rng.range(low, high) * 10.0).round() / 10.0)
}

fn generate_county(rng: &mut SimpleRng, county: String, state: &str) -> Record {
    let mut record = Record::new(county, state);

    // Log-uniform head-count between ~1k and ~1M.
    let population = 10f64.powf(rng.range(3.0, 6.0)).round() as i64;
    record
        .population
        .insert(POPULATION_KEY.to_owned(), Number::Int(population));

    let under_5 = rng.range(3.0, 9.0);
    let under_18 = under_5 + rng.range(12.0, 22.0);
    record.age.insert("< 5".to_owned(), Number::Float((under_5 * 10.0).round() / 10.0));
    record.age.insert("< 18".to_owned(), Number::Float((under_18 * 10.0).round() / 10.0));
    record.age.insert("> 65".to_owned(), percent(rng, 8.0, 30.0));

    let high_school = rng.range(70.0, 97.0);
    record.education.insert(
        "High School or Higher".to_owned(),
        Number::Float((high_school * 10.0).round() / 10.0),
    );
    record.education.insert(
        "Bachelor's Degree or Higher".to_owned(),
        percent(rng, 8.0, high_school * 0.6),
    );

    for (key, low, high) in [
        ("American Indian and Alaska Native Alone", 0.0, 5.0),
        ("Asian Alone", 0.0, 15.0),
        ("Black Alone", 0.0, 40.0),
        ("Hispanic or Latino", 0.0, 50.0),
        ("Native Hawaiian and Other Pacific Islander Alone", 0.0, 1.0),
        ("Two or More Races", 0.5, 5.0),
        ("White Alone", 40.0, 98.0),
        ("White Alone, not Hispanic or Latino", 20.0, 95.0),
    ] {
        record.ethnicities.insert(key.to_owned(), percent(rng, low, high));
    }

    record.income.insert(
        "Median Household Income".to_owned(),
        Number::Int(rng.range(25_000.0, 110_000.0).round() as i64),
    );
    record.income.insert(
        "Per Capita Income".to_owned(),
        Number::Int(rng.range(15_000.0, 60_000.0).round() as i64),
    );
    record
        .income
        .insert("Persons Below Poverty Level".to_owned(), percent(rng, 4.0, 35.0));

    record
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("sample_counties.json"), PathBuf::from);

    let mut rng = SimpleRng::new(42);

    let states = ["AL", "CA", "CO", "ID", "NY", "TX", "WY"];
    let names = ["Adams", "Franklin", "Jackson", "Lincoln", "Madison", "Washington"];

    let mut records = Vec::with_capacity(states.len() * names.len());
    for state in states {
        for name in names {
            records.push(generate_county(&mut rng, format!("{name} County"), state));
        }
    }

    let json = serde_json::to_string_pretty(&records).context("serializing sample counties")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {} counties across {} states to {}",
        records.len(),
        states.len(),
        output_path.display()
    );
    Ok(())
}
