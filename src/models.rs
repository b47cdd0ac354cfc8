use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::{
    self, BusinessTravel, Department, EducationField, Gender, JobRole, MaritalStatus,
};
use crate::temporal;

/// Static employee master record. Immutable once created; the collection
/// only ever grows by appending new employees.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    #[serde(rename = "id")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub department: Department,
    pub job_role: JobRole,
    pub education_field: EducationField,
    pub education: i32,
    pub job_level: i32,
    pub monthly_income: i32,
    pub num_companies_worked: i32,
    pub percent_salary_hike: i32,
    pub contract_start_date: NaiveDate,
    pub current_role_start_date: NaiveDate,
    pub last_promotion_date: NaiveDate,
    pub last_manager_change_date: NaiveDate,
    pub total_working_years: i64,
    pub years_with_curr_manager: i64,
}

/// Employee fields as supplied at creation. Tenure summaries are derived
/// here, not accepted as input, so they always agree with the anchors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub marital_status: MaritalStatus,
    pub department: Department,
    pub job_role: JobRole,
    pub education_field: EducationField,
    pub education: i32,
    pub job_level: i32,
    pub monthly_income: i32,
    pub num_companies_worked: i32,
    pub percent_salary_hike: i32,
    pub contract_start_date: NaiveDate,
    pub current_role_start_date: NaiveDate,
    pub last_promotion_date: NaiveDate,
    pub last_manager_change_date: NaiveDate,
}

impl EmployeeRecord {
    /// Builds the stored record from creation input: validates every date
    /// against `today`, checks the level codes, and precomputes the two
    /// tenure summaries the encoder later copies verbatim.
    pub fn create(
        id: i64,
        new: NewEmployee,
        today: NaiveDate,
    ) -> Result<Self, crate::error::PipelineError> {
        schema::check_level("Education", new.education)?;
        schema::check_level("JobLevel", new.job_level)?;

        for (field, date) in [
            ("BirthDate", new.birth_date),
            ("ContractStartDate", new.contract_start_date),
            ("CurrentRoleStartDate", new.current_role_start_date),
            ("LastPromotionDate", new.last_promotion_date),
            ("LastManagerChangeDate", new.last_manager_change_date),
        ] {
            temporal::check_not_future(field, date, today)?;
        }

        Ok(EmployeeRecord {
            id,
            total_working_years: temporal::years_between(new.contract_start_date, today),
            years_with_curr_manager: temporal::years_between(new.last_manager_change_date, today),
            first_name: new.first_name,
            last_name: new.last_name,
            birth_date: new.birth_date,
            gender: new.gender,
            marital_status: new.marital_status,
            department: new.department,
            job_role: new.job_role,
            education_field: new.education_field,
            education: new.education,
            job_level: new.job_level,
            monthly_income: new.monthly_income,
            num_companies_worked: new.num_companies_worked,
            percent_salary_hike: new.percent_salary_hike,
            contract_start_date: new.contract_start_date,
            current_role_start_date: new.current_role_start_date,
            last_promotion_date: new.last_promotion_date,
            last_manager_change_date: new.last_manager_change_date,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One workday evaluation as submitted by the employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailySurvey {
    #[serde(rename = "employee_id")]
    pub employee_id: i64,
    #[serde(rename = "date")]
    pub date: NaiveDate,
    pub environment_satisfaction: i32,
    pub job_involvement: i32,
    pub job_satisfaction: i32,
    pub over_time: i32,
    pub performance_rating: i32,
    pub work_life_balance: i32,
    pub business_travel: BusinessTravel,
}

impl DailySurvey {
    /// Checks every ordinal code against its declared closed set and the
    /// survey date against `today`. All-or-nothing: no survey that fails
    /// here is ever encoded.
    pub fn validate(&self, today: NaiveDate) -> Result<(), crate::error::PipelineError> {
        schema::check_rating("EnvironmentSatisfaction", self.environment_satisfaction)?;
        schema::check_rating("JobInvolvement", self.job_involvement)?;
        schema::check_rating("JobSatisfaction", self.job_satisfaction)?;
        schema::check_flag("OverTime", self.over_time)?;
        schema::check_rating("PerformanceRating", self.performance_rating)?;
        schema::check_rating("WorkLifeBalance", self.work_life_balance)?;
        temporal::check_not_future("SurveyDate", self.date, today)?;
        Ok(())
    }
}

/// One classifier outcome for one employee on one date. Append-only:
/// records are never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub attrition_probability: f64,
}

impl ScoreRecord {
    /// Satisfaction reported as the complement of attrition risk, in percent.
    pub fn satisfaction_pct(&self) -> f64 {
        (1.0 - self.attrition_probability) * 100.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{PipelineError, SchemaError, TemporalError};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn sample_new_employee() -> NewEmployee {
        NewEmployee {
            first_name: "Dana".to_string(),
            last_name: "Okafor".to_string(),
            birth_date: day(1990, 5, 14),
            gender: Gender::Female,
            marital_status: MaritalStatus::Single,
            department: Department::Sales,
            job_role: JobRole::Manager,
            education_field: EducationField::Medical,
            education: 3,
            job_level: 2,
            monthly_income: 5200,
            num_companies_worked: 2,
            percent_salary_hike: 13,
            contract_start_date: day(2018, 3, 1),
            current_role_start_date: day(2021, 6, 1),
            last_promotion_date: day(2021, 6, 1),
            last_manager_change_date: day(2023, 1, 9),
        }
    }

    pub(crate) fn sample_survey(employee_id: i64, date: NaiveDate) -> DailySurvey {
        DailySurvey {
            employee_id,
            date,
            environment_satisfaction: 3,
            job_involvement: 2,
            job_satisfaction: 4,
            over_time: 1,
            performance_rating: 3,
            work_life_balance: 2,
            business_travel: BusinessTravel::TravelRarely,
        }
    }

    #[test]
    fn create_precomputes_tenure_summaries() {
        let today = day(2026, 8, 29);
        let employee = EmployeeRecord::create(1, sample_new_employee(), today).unwrap();
        assert_eq!(employee.total_working_years, 8);
        assert_eq!(employee.years_with_curr_manager, 3);
    }

    #[test]
    fn create_rejects_future_anchor_dates() {
        let today = day(2026, 8, 29);
        let mut new = sample_new_employee();
        new.last_promotion_date = day(2027, 1, 1);
        let err = EmployeeRecord::create(1, new, today).unwrap_err();
        assert_eq!(
            err,
            PipelineError::Temporal(TemporalError::FutureDate {
                field: "LastPromotionDate",
                date: day(2027, 1, 1),
                today,
            })
        );
    }

    #[test]
    fn create_rejects_out_of_range_levels() {
        let today = day(2026, 8, 29);
        let mut new = sample_new_employee();
        new.education = 9;
        assert!(EmployeeRecord::create(1, new, today).is_err());
    }

    #[test]
    fn survey_validation_covers_each_ordinal() {
        let today = day(2026, 8, 29);
        let survey = sample_survey(1, today);
        assert!(survey.validate(today).is_ok());

        let mut bad = survey.clone();
        bad.work_life_balance = 0;
        assert_eq!(
            bad.validate(today).unwrap_err(),
            PipelineError::Schema(SchemaError::CodeOutOfRange {
                field: "WorkLifeBalance",
                value: 0,
                allowed: "1..=4",
            })
        );

        let mut future = survey;
        future.date = day(2027, 1, 1);
        assert!(matches!(
            future.validate(today),
            Err(PipelineError::Temporal(_))
        ));
    }

    #[test]
    fn satisfaction_is_the_probability_complement_in_percent() {
        let record = ScoreRecord {
            employee_id: 7,
            date: day(2026, 8, 1),
            attrition_probability: 0.3,
        };
        assert!((record.satisfaction_pct() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn employee_json_uses_the_original_field_names() {
        let json = r#"{
            "FirstName": "Dana",
            "LastName": "Okafor",
            "BirthDate": "1990-05-14",
            "Gender": "Female",
            "MaritalStatus": "Single",
            "Department": "Sales",
            "JobRole": "Manager",
            "EducationField": "Medical",
            "Education": 3,
            "JobLevel": 2,
            "MonthlyIncome": 5200,
            "NumCompaniesWorked": 2,
            "PercentSalaryHike": 13,
            "ContractStartDate": "2018-03-01",
            "CurrentRoleStartDate": "2021-06-01",
            "LastPromotionDate": "2021-06-01",
            "LastManagerChangeDate": "2023-01-09"
        }"#;
        let new: NewEmployee = serde_json::from_str(json).unwrap();
        assert_eq!(new.department, Department::Sales);
        assert_eq!(new.monthly_income, 5200);

        let unknown = json.replace("\"Sales\"", "\"Engineering\"");
        assert!(serde_json::from_str::<NewEmployee>(&unknown).is_err());
    }
}
