use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// Synthetic career outcomes dataset
// ---------------------------------------------------------------------------
//
// Writes a deterministic sample table (seeded RNG) as both CSV and Parquet,
// so the dashboard has something to open out of the box.

const ROWS: usize = 500;
const OUT_CSV: &str = "data/student_career_outcomes.csv";
const OUT_PARQUET: &str = "data/student_career_outcomes.parquet";

const HEADER: &[&str] = &[
    "Field_of_Study",
    "University_GPA",
    "Starting_Salary",
    "Years_to_Promotion",
    "Networking_Score",
    "Job_Offers",
    "Gender",
    "Career_Satisfaction",
    "WorkLifeBalance_Score",
    "Current_Job_Level",
    "Certifications",
];

/// (field, base starting salary, base work-life balance score)
const FIELDS: &[(&str, f64, f64)] = &[
    ("Arts", 42_000.0, 7.2),
    ("Biology", 52_000.0, 6.8),
    ("Business", 61_000.0, 5.9),
    ("Computer Science", 78_000.0, 6.1),
    ("Engineering", 74_000.0, 5.8),
    ("Law", 70_000.0, 5.2),
    ("Mathematics", 66_000.0, 6.4),
    ("Medicine", 82_000.0, 4.9),
];

struct Graduate {
    field: &'static str,
    gpa: Option<f64>,
    salary: i64,
    years_to_promotion: i64,
    networking: i64,
    offers: i64,
    gender: &'static str,
    satisfaction: Option<f64>,
    work_life: f64,
    job_level: &'static str,
    certifications: i64,
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    fs::create_dir_all("data").context("creating data directory")?;

    let graduates = generate(&mut rng);
    write_csv(&graduates).context("writing CSV sample")?;
    write_parquet(&graduates).context("writing Parquet sample")?;

    println!(
        "Wrote {} graduates to {OUT_CSV} and {OUT_PARQUET}",
        graduates.len()
    );
    Ok(())
}

fn generate(rng: &mut StdRng) -> Vec<Graduate> {
    (0..ROWS)
        .map(|_| {
            let (field, base_salary, base_wlb) = FIELDS[rng.gen_range(0..FIELDS.len())];

            let gpa_value = gauss(rng, 3.05, 0.4).clamp(2.0, 4.0);
            // A couple of percent of cells are left blank, like real survey data.
            let gpa = (!rng.gen_bool(0.02)).then(|| round2(gpa_value));

            let networking = rng.gen_range(1..=10);
            let salary = (base_salary + (gpa_value - 3.0) * 9_000.0 + gauss(rng, 0.0, 4_500.0))
                .max(24_000.0);
            let years_to_promotion = (6.5 - gpa_value - networking as f64 * 0.18
                + gauss(rng, 0.0, 0.9))
            .round()
            .clamp(1.0, 6.0) as i64;
            let offers =
                (networking as f64 * 0.45 + gauss(rng, 0.0, 0.8)).round().clamp(0.0, 8.0) as i64;

            let satisfaction =
                (!rng.gen_bool(0.02)).then(|| round1(gauss(rng, 6.5, 1.6).clamp(1.0, 10.0)));
            let work_life = round1(gauss(rng, base_wlb, 1.4).clamp(1.0, 10.0));

            let job_level = match rng.gen::<f64>() {
                r if r < 0.40 => "Entry",
                r if r < 0.75 => "Mid",
                r if r < 0.95 => "Senior",
                _ => "Executive",
            };
            let gender = match rng.gen::<f64>() {
                r if r < 0.48 => "Female",
                r if r < 0.96 => "Male",
                _ => "Non-binary",
            };

            Graduate {
                field,
                gpa,
                salary: (salary / 100.0).round() as i64 * 100,
                years_to_promotion,
                networking,
                offers,
                gender,
                satisfaction,
                work_life,
                job_level,
                certifications: rng.gen_range(0..=5),
            }
        })
        .collect()
}

/// Box-Muller transform for normal draws on top of the uniform generator.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen::<f64>();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

fn write_csv(graduates: &[Graduate]) -> Result<()> {
    let mut writer = csv::Writer::from_path(OUT_CSV)?;
    writer.write_record(HEADER)?;

    for g in graduates {
        writer.write_record(&[
            g.field.to_string(),
            g.gpa.map(|v| format!("{v:.2}")).unwrap_or_default(),
            g.salary.to_string(),
            g.years_to_promotion.to_string(),
            g.networking.to_string(),
            g.offers.to_string(),
            g.gender.to_string(),
            g.satisfaction.map(|v| format!("{v:.1}")).unwrap_or_default(),
            format!("{:.1}", g.work_life),
            g.job_level.to_string(),
            g.certifications.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(graduates: &[Graduate]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Field_of_Study", DataType::Utf8, false),
        Field::new("University_GPA", DataType::Float64, true),
        Field::new("Starting_Salary", DataType::Int64, false),
        Field::new("Years_to_Promotion", DataType::Int64, false),
        Field::new("Networking_Score", DataType::Int64, false),
        Field::new("Job_Offers", DataType::Int64, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("Career_Satisfaction", DataType::Float64, true),
        Field::new("WorkLifeBalance_Score", DataType::Float64, false),
        Field::new("Current_Job_Level", DataType::Utf8, false),
        Field::new("Certifications", DataType::Int64, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            graduates.iter().map(|g| g.field).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            graduates.iter().map(|g| g.gpa).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            graduates.iter().map(|g| g.salary).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            graduates
                .iter()
                .map(|g| g.years_to_promotion)
                .collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            graduates.iter().map(|g| g.networking).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            graduates.iter().map(|g| g.offers).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            graduates.iter().map(|g| g.gender).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            graduates.iter().map(|g| g.satisfaction).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(
            graduates.iter().map(|g| g.work_life).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            graduates.iter().map(|g| g.job_level).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from(
            graduates
                .iter()
                .map(|g| g.certifications)
                .collect::<Vec<_>>(),
        )),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns)?;
    let file = fs::File::create(OUT_PARQUET)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
