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

/// Per-50m baseline and jitter for each metric code.
fn metric_profile(code: &str) -> (f64, f64) {
    match code {
        "T15 (1)" | "T15 (2)" => (7.5, 0.3),
        "T25 (1)" | "T25 (2)" => (13.5, 0.4),
        "T TOTAL" => (29.5, 0.8),
        "# de BRZ 1" | "# de BRZ 2" => (18.0, 1.5),
        "BRZ TOTAL" => (36.0, 2.5),
        "DIST x BRZ" => (1.4, 0.1),
        "V1" | "V2" => (1.8, 0.08),
        "V promedio" => (1.75, 0.08),
        "F1" | "F2" => (9.0, 1.0),
        "F promedio" => (9.0, 0.8),
        "DIST sin F" => (41.0, 1.5),
        _ => (1.0, 0.1),
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let swimmers = [
        "Ana Garcia",
        "Luis Perez",
        "Eva Ruiz",
        "Mia Torres",
        "Leo Castillo",
    ];
    let styles = ["Libre", "Espalda", "Pecho", "Mariposa"];
    let distances = [50u32, 100];
    // Raw spellings on purpose, so a fresh load exercises normalization.
    let phases = [("PRE-ELIMINAR", 1u32), ("Semi-Final", 2), ("FINAL", 3)];
    let metric_codes = [
        "T15 (1)", "T25 (1)", "T15 (2)", "T25 (2)", "T TOTAL", "# de BRZ 1", "# de BRZ 2",
        "BRZ TOTAL", "DIST x BRZ", "V1", "V2", "V promedio", "F1", "F2", "F promedio",
        "DIST sin F",
    ];

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Nadador",
            "Estilo",
            "Distancia",
            "Cat_Prueba",
            "Parametro",
            "Valor",
            "Competencia",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for swimmer in &swimmers {
        // Each swimmer has a stable ability offset.
        let ability = rng.gauss(0.0, 0.03);

        for style in &styles {
            for &distance in &distances {
                let scale = distance as f64 / 50.0;

                for (phase, round) in &phases {
                    for code in &metric_codes {
                        let (base, spread) = metric_profile(code);
                        // Times drop slightly round over round; velocities rise.
                        let progress = 1.0 - 0.01 * (*round as f64 - 1.0);
                        let mut value =
                            rng.gauss(base * scale * (1.0 + ability), spread) * progress;
                        if value < 0.0 {
                            value = 0.0;
                        }

                        // A few missing marks, as real timing sheets have.
                        let cell = if rng.next_f64() < 0.02 {
                            "NT".to_string()
                        } else {
                            format!("{value:.2}")
                        };

                        let distance_cell = distance.to_string();
                        writer
                            .write_record([
                                *swimmer,
                                *style,
                                distance_cell.as_str(),
                                *phase,
                                *code,
                                cell.as_str(),
                                "Nacional 2026",
                            ])
                            .expect("Failed to write row");
                        rows += 1;
                    }
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {rows} rows to {output_path}");
}
