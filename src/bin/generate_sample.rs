use std::error::Error;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const REGIONS: [&str; 4] = ["Central", "East", "South", "West"];
const SEGMENTS: [&str; 3] = ["Consumer", "Corporate", "Home Office"];
const DISCOUNTS: [f64; 6] = [0.0, 0.0, 0.1, 0.2, 0.3, 0.5];

/// (category, sub-category, typical unit price)
const PRODUCTS: [(&str, &str, f64); 17] = [
    ("Furniture", "Bookcases", 180.0),
    ("Furniture", "Chairs", 150.0),
    ("Furniture", "Furnishings", 30.0),
    ("Furniture", "Tables", 250.0),
    ("Office Supplies", "Appliances", 90.0),
    ("Office Supplies", "Art", 8.0),
    ("Office Supplies", "Binders", 20.0),
    ("Office Supplies", "Envelopes", 15.0),
    ("Office Supplies", "Fasteners", 4.0),
    ("Office Supplies", "Labels", 5.0),
    ("Office Supplies", "Paper", 12.0),
    ("Office Supplies", "Storage", 60.0),
    ("Office Supplies", "Supplies", 25.0),
    ("Technology", "Accessories", 55.0),
    ("Technology", "Copiers", 600.0),
    ("Technology", "Machines", 400.0),
    ("Technology", "Phones", 120.0),
];

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);
    let output_path = "SampleSuperstore.csv";
    let rows = 2_000;

    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "Ship Mode",
        "Segment",
        "Region",
        "Category",
        "Sub-Category",
        "Sales",
        "Quantity",
        "Discount",
        "Profit",
    ])?;

    for _ in 0..rows {
        let ship_mode = *rng.pick(&["Standard Class", "Second Class", "First Class", "Same Day"]);
        let segment = *rng.pick(&SEGMENTS);
        let region = *rng.pick(&REGIONS);
        let &(category, sub_category, price) = rng.pick(&PRODUCTS);

        let quantity = 1 + rng.next_u64() % 9;
        let discount = *rng.pick(&DISCOUNTS);
        let unit = price * (0.5 + rng.next_f64());
        let sales = unit * quantity as f64 * (1.0 - discount);
        let margin = 0.25 - discount * 0.9 + (rng.next_f64() - 0.5) * 0.2;
        let profit = sales * margin;

        writer.write_record([
            ship_mode.to_string(),
            segment.to_string(),
            region.to_string(),
            category.to_string(),
            sub_category.to_string(),
            format!("{sales:.4}"),
            quantity.to_string(),
            format!("{discount:.1}"),
            format!("{profit:.4}"),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} orders to {output_path}");
    Ok(())
}
