//! Writes a deterministic demo set of the three dashboard inputs:
//! `boiler_ml_anomalies.csv`, `efficiency_predictions.csv` and
//! `feature_importance.csv`.
//!
//! Usage: `generate_sample [OUTPUT_DIR] [DAYS]` (defaults: `.` and 365).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One simulated day of boiler operation.
struct Day {
    date: NaiveDate,
    fuel_flow: f64,
    steam_flow: f64,
    feedwater_temp: f64,
    flue_gas_temp: f64,
    o2_level: f64,
    efficiency: f64,
    anomalous: bool,
}

const ANOMALY_RATE: f64 = 0.05;

const FEATURES: [(&str, f64); 5] = [
    ("Flue_Gas_Temp", 0.34),
    ("O2_Level", 0.27),
    ("Fuel_Flow", 0.18),
    ("Steam_Flow", 0.13),
    ("Feedwater_Temp", 0.08),
];

fn simulate(start: NaiveDate, days: u64, rng: &mut SimpleRng) -> Vec<Day> {
    (0..days)
        .filter_map(|i| {
            let date = start.checked_add_days(Days::new(i))?;
            // Yearly load cycle.
            let season = (2.0 * std::f64::consts::PI * i as f64 / 365.0).sin();

            let fuel_flow = 1200.0 + 80.0 * season + rng.gauss(0.0, 15.0);
            let steam_flow = fuel_flow * 9.5 + rng.gauss(0.0, 60.0);
            let feedwater_temp = 105.0 + rng.gauss(0.0, 2.0);
            let mut flue_gas_temp = 180.0 - 6.0 * season + rng.gauss(0.0, 3.0);
            let mut o2_level = 3.5 + rng.gauss(0.0, 0.3);

            let anomalous = rng.next_f64() < ANOMALY_RATE;
            if anomalous {
                flue_gas_temp += 25.0 + rng.gauss(0.0, 5.0);
                o2_level += 1.5;
            }

            let efficiency = 88.0 - 0.08 * (flue_gas_temp - 180.0) - 0.9 * (o2_level - 3.5)
                + 0.02 * (feedwater_temp - 105.0)
                + rng.gauss(0.0, 0.4);

            Some(Day {
                date,
                fuel_flow,
                steam_flow,
                feedwater_temp,
                flue_gas_temp,
                o2_level,
                efficiency,
                anomalous,
            })
        })
        .collect()
}

fn write_observations(path: &Path, days: &[Day]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record([
        "Date",
        "Fuel_Flow",
        "Steam_Flow",
        "Feedwater_Temp",
        "Flue_Gas_Temp",
        "O2_Level",
        "Efficiency",
        "anomaly",
    ])?;
    for d in days {
        w.write_record([
            d.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", d.fuel_flow),
            format!("{:.2}", d.steam_flow),
            format!("{:.2}", d.feedwater_temp),
            format!("{:.2}", d.flue_gas_temp),
            format!("{:.3}", d.o2_level),
            format!("{:.3}", d.efficiency),
            if d.anomalous { "-1" } else { "1" }.to_string(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_predictions(path: &Path, days: &[Day], rng: &mut SimpleRng) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Date", "Actual_Efficiency", "Predicted_Efficiency"])?;
    // The upstream model was evaluated on the last fifth of the period.
    let holdout = days.len() - days.len() / 5;
    for d in &days[holdout..] {
        let predicted = d.efficiency + rng.gauss(0.0, 0.6);
        w.write_record([
            d.date.format("%Y-%m-%d").to_string(),
            format!("{:.3}", d.efficiency),
            format!("{predicted:.3}"),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_features(path: &Path) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["Feature", "Importance"])?;
    for (name, importance) in FEATURES {
        w.write_record([name.to_string(), importance.to_string()])?;
    }
    w.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let days: u64 = match args.next() {
        Some(n) => n.parse().with_context(|| format!("'{n}' is not a day count"))?,
        None => 365,
    };

    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;
    let simulated = simulate(start, days, &mut rng);

    write_observations(&out_dir.join("boiler_ml_anomalies.csv"), &simulated)?;
    write_predictions(&out_dir.join("efficiency_predictions.csv"), &simulated, &mut rng)?;
    write_features(&out_dir.join("feature_importance.csv"))?;

    let anomalies = simulated.iter().filter(|d| d.anomalous).count();
    println!(
        "Wrote {} days ({anomalies} anomalies) to {}",
        simulated.len(),
        out_dir.display()
    );
    Ok(())
}
