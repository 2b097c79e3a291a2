//! Shared test data: small hand-built employee tables.

use super::loader::{ID_COLUMN, REQUIRED_COLUMNS};
use super::model::{CellValue, Dataset};

#[derive(Debug, Clone)]
pub struct Emp {
    pub department: &'static str,
    pub gender: &'static str,
    pub age: i64,
    pub years: i64,
    pub attrition: i64,
    pub job_role: &'static str,
    pub marital: &'static str,
    pub income: i64,
}

impl Emp {
    pub fn new(department: &'static str, gender: &'static str, age: i64, years: i64, attrition: i64) -> Self {
        Self {
            department,
            gender,
            age,
            years,
            attrition,
            job_role: "Manager",
            marital: "Single",
            income: 1000 + age * 100 + years * 37,
        }
    }

    pub fn role(mut self, job_role: &'static str) -> Self {
        self.job_role = job_role;
        self
    }

    pub fn marital(mut self, marital: &'static str) -> Self {
        self.marital = marital;
        self
    }

    pub fn income(mut self, income: i64) -> Self {
        self.income = income;
        self
    }

    /// Cells in `REQUIRED_COLUMNS` order.
    pub fn cells(&self) -> Vec<CellValue> {
        let s = |v: &str| CellValue::String(v.to_string());
        vec![
            s(self.department),
            s(self.gender),
            CellValue::Integer(self.age),
            CellValue::Integer(self.years),
            CellValue::Integer(self.attrition),
            s(self.job_role),
            CellValue::Integer(self.age % 5 + 1),
            s(self.marital),
            CellValue::Integer(self.income),
            s(if self.attrition == 1 { "Yes" } else { "No" }),
            CellValue::Integer(self.age % 4 + 1),
            CellValue::Integer(self.years % 4 + 1),
            CellValue::Integer(self.age % 7),
            CellValue::Integer(self.years / 2),
            CellValue::Integer(self.years / 3 + self.age % 2),
        ]
    }
}

pub fn columns() -> Vec<String> {
    REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
}

pub fn dataset(rows: &[Emp]) -> Dataset {
    Dataset::from_rows(columns(), rows.iter().map(Emp::cells).collect())
}

/// Ten employees across three departments.
pub fn sample_rows() -> Vec<Emp> {
    vec![
        Emp::new("Sales", "Female", 41, 6, 1).role("Sales Executive"),
        Emp::new("Research & Development", "Male", 49, 10, 0).role("Research Scientist").marital("Married"),
        Emp::new("Research & Development", "Male", 37, 0, 1).role("Laboratory Technician"),
        Emp::new("Research & Development", "Female", 33, 8, 0).role("Research Scientist").marital("Married"),
        Emp::new("Sales", "Male", 27, 2, 0).role("Sales Executive").marital("Married"),
        Emp::new("Human Resources", "Female", 32, 7, 0).role("Manager").marital("Divorced"),
        Emp::new("Sales", "Male", 59, 1, 1).role("Manager").marital("Married"),
        Emp::new("Research & Development", "Male", 30, 1, 0).role("Laboratory Technician").marital("Divorced"),
        Emp::new("Human Resources", "Male", 38, 9, 0).role("Manager"),
        Emp::new("Sales", "Female", 36, 7, 0).role("Sales Executive").marital("Married"),
    ]
}

/// 100 employees, 30 attrited; Sales holds 20 of them with 8 attrited.
pub fn hundred_rows() -> Vec<Emp> {
    let mut rows = Vec::with_capacity(100);
    for i in 0..20 {
        rows.push(Emp::new("Sales", "Female", 25 + i, i % 10, i64::from(i < 8)));
    }
    for i in 0..80 {
        let gender = if i % 2 == 0 { "Male" } else { "Female" };
        rows.push(Emp::new("Research & Development", gender, 22 + i % 40, i % 15, i64::from(i < 22)));
    }
    rows
}

/// CSV text with a leading `ID` column, the way the source file ships.
pub fn csv_text(rows: &[Emp]) -> String {
    let mut out = String::new();
    out.push_str(ID_COLUMN);
    for c in REQUIRED_COLUMNS {
        out.push(',');
        out.push_str(c);
    }
    out.push('\n');
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&(i + 1).to_string());
        for cell in row.cells() {
            out.push(',');
            out.push_str(&cell.to_field());
        }
        out.push('\n');
    }
    out
}
