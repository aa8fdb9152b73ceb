use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database employee model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub document_number: i64,
    pub hired_on: Option<NaiveDate>,
    pub address_id: i64,
    pub branch_id: i64,
    pub document_type_id: i64,
}

impl Employee {
    /// Whole years of service as of `today`. The year difference is reduced
    /// by one until the hiring anniversary has passed in the current year.
    pub fn seniority(&self, today: NaiveDate) -> i64 {
        seniority_years(self.hired_on, today)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub fn seniority_years(hired_on: Option<NaiveDate>, today: NaiveDate) -> i64 {
    let Some(hired) = hired_on else {
        return 0;
    };

    let mut years = i64::from(today.year() - hired.year());
    if (today.month(), today.day()) < (hired.month(), hired.day()) {
        years -= 1;
    }
    years
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub first_name: String,
    pub last_name: String,
    pub document_number: i64,
    pub hired_on: Option<NaiveDate>,
    pub address_id: i64,
    pub branch_id: i64,
    pub document_type_id: i64,
}

/// Employee as shown on admin listings, with the derived seniority column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    pub seniority_years: i64,
}

impl EmployeeView {
    pub fn at(employee: Employee, today: NaiveDate) -> Self {
        let seniority_years = employee.seniority(today);
        Self {
            employee,
            seniority_years,
        }
    }
}

/// Database client model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub document_number: i64,
    pub document_type_id: i64,
    pub address_id: i64,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDto {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub document_number: i64,
    pub document_type_id: i64,
    pub address_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seniority_before_anniversary() {
        let today = date(2025, 6, 28);
        assert_eq!(seniority_years(Some(date(2020, 7, 1)), today), 4);
    }

    #[test]
    fn seniority_after_anniversary() {
        let today = date(2025, 6, 28);
        assert_eq!(seniority_years(Some(date(2020, 6, 1)), today), 5);
    }

    #[test]
    fn seniority_on_anniversary_counts_full_year() {
        let today = date(2025, 6, 28);
        assert_eq!(seniority_years(Some(date(2020, 6, 28)), today), 5);
    }

    #[test]
    fn seniority_without_hire_date_is_zero() {
        assert_eq!(seniority_years(None, date(2025, 6, 28)), 0);
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let employee = Employee {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Gomez".to_string(),
            document_number: 30111222,
            hired_on: None,
            address_id: 1,
            branch_id: 1,
            document_type_id: 1,
        };
        assert_eq!(employee.full_name(), "Ana Gomez");

        let client = Client {
            id: 1,
            first_name: "Luis".to_string(),
            last_name: "Perez".to_string(),
            phone: None,
            document_number: 27888999,
            document_type_id: 1,
            address_id: 1,
        };
        assert_eq!(client.full_name(), "Luis Perez");
    }
}
