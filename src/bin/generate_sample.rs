use chrono::{Duration, NaiveDate};

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

/// Header as the model export writes it: Latin-1, with four columns titled
/// `kt` (10 m, 50 m, 100 m wind, then gust) and a raw degree byte.
const HEADER: [&[u8]; 7] = [
    b"W. Europe Daylight Time",
    b"kt",
    b"Wind10m \xB0",
    b"kt",
    b"kt",
    b"kt",
    b"hPa",
];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_wind.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(HEADER)?;

    let start = NaiveDate::from_ymd_opt(2025, 7, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| anyhow::anyhow!("invalid start date"))?;

    let hours = 72;
    for h in 0..hours {
        let t = start + Duration::hours(h);
        let phase = h as f64 / 24.0 * 2.0 * std::f64::consts::PI;

        // Sea-breeze cycle: stronger in the afternoon, backing overnight.
        let tws = (12.0 + 6.0 * (phase - 2.0).sin() + rng.gauss(0.0, 1.0)).max(0.0);
        let twd = (200.0 + 40.0 * phase.cos() + rng.gauss(0.0, 8.0)).rem_euclid(360.0);
        let gust = tws * 1.35 + rng.gauss(0.0, 1.0).abs();
        let pressure = 1013.0 + rng.gauss(0.0, 1.5);

        let mut row = vec![
            t.format("%Y-%m-%d %H:%M").to_string(),
            format!("{tws:.1}"),
            format!("{twd:.0}"),
            format!("{:.1}", tws * 1.1),
            format!("{:.1}", tws * 1.2),
            format!("{gust:.1}"),
            format!("{pressure:.1}"),
        ];

        // A few broken rows, as real exports have.
        match h {
            5 => row[0] = String::new(),
            17 => row[1] = "n/a".to_string(),
            30 => row[5] = String::new(),
            41 => row[0] = "--".to_string(),
            _ => {}
        }

        writer.write_record(&row)?;
    }
    writer.flush()?;

    println!("Wrote {hours} hourly rows to {output_path}");
    Ok(())
}
