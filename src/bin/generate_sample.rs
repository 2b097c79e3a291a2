//! Writes a synthetic employee table to `EA.csv` and `EA.parquet`.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const EMPLOYEES: usize = 1470;

const DEPARTMENTS: [(&str, &[&str]); 3] = [
    ("Sales", &["Sales Executive", "Sales Representative", "Manager"]),
    (
        "Research & Development",
        &["Research Scientist", "Laboratory Technician", "Research Director", "Manager"],
    ),
    ("Human Resources", &["Human Resources", "Manager"]),
];
const GENDERS: [&str; 2] = ["Female", "Male"];
const MARITAL: [&str; 3] = ["Single", "Married", "Divorced"];

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a, T: ?Sized>(&mut self, items: &[&'a T]) -> &'a T {
        items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

#[derive(Default)]
struct Columns {
    id: Vec<i64>,
    department: Vec<String>,
    gender: Vec<String>,
    age: Vec<i64>,
    years_at_company: Vec<i64>,
    attrition: Vec<i64>,
    job_role: Vec<String>,
    education: Vec<i64>,
    marital_status: Vec<String>,
    monthly_income: Vec<i64>,
    over_time: Vec<String>,
    job_satisfaction: Vec<i64>,
    environment_satisfaction: Vec<i64>,
    num_companies_worked: Vec<i64>,
    years_since_last_promotion: Vec<i64>,
    years_in_current_role: Vec<i64>,
}

impl Columns {
    fn generate(rng: &mut SimpleRng, n: usize) -> Self {
        let mut c = Columns::default();
        for i in 0..n {
            let (dept, roles) = DEPARTMENTS[rng.range(0, 2) as usize];
            let role = rng.pick(roles);
            let age = rng.gauss(37.0, 9.0).round().clamp(18.0, 60.0) as i64;
            let years = rng.range(0, (age - 18).min(40));
            let in_role = rng.range(0, years);
            let since_promotion = rng.range(0, in_role);
            let education = rng.range(1, 5);
            let income = (2000.0 + 120.0 * age as f64 + 250.0 * years as f64
                + 600.0 * education as f64
                + rng.gauss(0.0, 1500.0))
            .max(1000.0) as i64;
            let marital = rng.pick(&MARITAL);
            let over_time = rng.chance(0.28);
            let job_sat = rng.range(1, 4);
            let env_sat = rng.range(1, 4);

            // Younger, single, overtime-heavy, unsatisfied staff leave more often.
            let mut p = 0.08;
            if age < 30 {
                p += 0.10;
            }
            if over_time {
                p += 0.15;
            }
            if marital == "Single" {
                p += 0.07;
            }
            if job_sat == 1 || env_sat == 1 {
                p += 0.08;
            }

            c.id.push(i as i64 + 1);
            c.department.push(dept.to_string());
            c.gender.push(rng.pick(&GENDERS).to_string());
            c.age.push(age);
            c.years_at_company.push(years);
            c.attrition.push(i64::from(rng.chance(p)));
            c.job_role.push(role.to_string());
            c.education.push(education);
            c.marital_status.push(marital.to_string());
            c.monthly_income.push(income);
            c.over_time.push(if over_time { "Yes" } else { "No" }.to_string());
            c.job_satisfaction.push(job_sat);
            c.environment_satisfaction.push(env_sat);
            c.num_companies_worked.push(rng.range(0, 9));
            c.years_since_last_promotion.push(since_promotion);
            c.years_in_current_role.push(in_role);
        }
        c
    }

    fn batch(&self) -> Result<RecordBatch> {
        let ints = |v: &[i64]| -> ArrayRef { Arc::new(Int64Array::from(v.to_vec())) };
        let strs = |v: &[String]| -> ArrayRef {
            Arc::new(StringArray::from(v.iter().map(String::as_str).collect::<Vec<_>>()))
        };
        let columns: Vec<(&str, ArrayRef)> = vec![
            ("ID", ints(&self.id)),
            ("Age", ints(&self.age)),
            ("Attrition", ints(&self.attrition)),
            ("Department", strs(&self.department)),
            ("Education", ints(&self.education)),
            ("EnvironmentSatisfaction", ints(&self.environment_satisfaction)),
            ("Gender", strs(&self.gender)),
            ("JobRole", strs(&self.job_role)),
            ("JobSatisfaction", ints(&self.job_satisfaction)),
            ("MaritalStatus", strs(&self.marital_status)),
            ("MonthlyIncome", ints(&self.monthly_income)),
            ("NumCompaniesWorked", ints(&self.num_companies_worked)),
            ("OverTime", strs(&self.over_time)),
            ("YearsAtCompany", ints(&self.years_at_company)),
            ("YearsInCurrentRole", ints(&self.years_in_current_role)),
            ("YearsSinceLastPromotion", ints(&self.years_since_last_promotion)),
        ];

        let schema = Arc::new(Schema::new(
            columns
                .iter()
                .map(|(name, array)| Field::new(*name, array.data_type().clone(), false))
                .collect::<Vec<_>>(),
        ));
        let arrays = columns.into_iter().map(|(_, array)| array).collect();
        RecordBatch::try_new(schema, arrays).context("building record batch")
    }
}

fn write_parquet(batch: &RecordBatch, path: &str) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn write_csv(batch: &RecordBatch, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    let schema = batch.schema();
    writer.write_record(schema.fields().iter().map(|f| f.name().as_str()))?;

    for row in 0..batch.num_rows() {
        let record = batch.columns().iter().map(|array| match array.data_type() {
            DataType::Utf8 => array
                .as_any()
                .downcast_ref::<StringArray>()
                .map(|a| a.value(row).to_string())
                .unwrap_or_default(),
            _ => array
                .as_any()
                .downcast_ref::<Int64Array>()
                .map(|a| a.value(row).to_string())
                .unwrap_or_default(),
        });
        writer.write_record(record.collect::<Vec<_>>())?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let columns = Columns::generate(&mut rng, EMPLOYEES);
    let batch = columns.batch()?;

    write_csv(&batch, "EA.csv")?;
    write_parquet(&batch, "EA.parquet")?;

    let left = columns.attrition.iter().filter(|&&a| a == 1).count();
    println!(
        "Wrote {} employees ({left} left, {:.2}%) to EA.csv and EA.parquet",
        batch.num_rows(),
        100.0 * left as f64 / batch.num_rows() as f64
    );
    Ok(())
}
