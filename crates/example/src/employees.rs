use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

const FIRST_NAMES: &[&str] = &["João", "Maria", "Pedro", "Ana", "Paulo"];
const LAST_NAMES: &[&str] = &["Silva", "Santos", "Oliveira", "Souza", "Lima"];
const POSITIONS: &[&str] = &["Manager", "Analyst", "Developer", "Tester", "Architect"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "Identification")]
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    #[serde(rename = "Active")]
    pub is_active: bool,
    #[serde(skip)]
    pub salary: f64,
}

/// Generates `count` employees with random names, positions and salaries.
pub fn random_employees(count: u32) -> Vec<Employee> {
    let mut rng = rand::thread_rng();
    (1..=count)
        .map(|id| {
            let salary: f64 = rng.gen_range(1000.0..10000.0);
            Employee {
                id,
                first_name: pick(&mut rng, FIRST_NAMES),
                last_name: pick(&mut rng, LAST_NAMES),
                position: pick(&mut rng, POSITIONS),
                is_active: rng.gen_bool(0.5),
                salary: (salary * 100.0).round() / 100.0,
            }
        })
        .collect()
}

fn pick(rng: &mut impl Rng, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_owned()
}
