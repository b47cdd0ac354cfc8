//! From (employee record, daily survey) to the classifier's input vector.
//!
//! `encode` produces the named feature map, `assemble` projects it onto
//! the fixed column order from [`crate::schema`], and `run` ties the whole
//! submission pipeline together. Encoding is pure: the same inputs and the
//! same `today` always yield the same vector.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{PipelineError, SchemaError};
use crate::models::{DailySurvey, EmployeeRecord, ScoreRecord};
use crate::predict::{Prediction, Predictor};
use crate::schema::{
    col, Department, EducationField, JobRole, MaritalStatus, DISTANCE_FROM_HOME_PLACEHOLDER,
    FEATURE_COLUMNS, FEATURE_COUNT,
};
use crate::temporal::years_between;

/// Builds the named feature map: static copies from the employee, dynamic
/// copies from the survey, four year-count derivations, and drop-first
/// dummy expansion. Unknown categories cannot reach this point; the closed
/// enums reject them at decode time, so an all-zero dummy group always
/// means the genuine dropped reference category.
pub fn encode(
    employee: &EmployeeRecord,
    daily: &DailySurvey,
    today: NaiveDate,
) -> HashMap<&'static str, f64> {
    let mut features: HashMap<&'static str, f64> = HashMap::with_capacity(FEATURE_COUNT);

    features.insert(col::AGE, years_between(employee.birth_date, today) as f64);
    features.insert(col::BUSINESS_TRAVEL, daily.business_travel.code() as f64);
    // Known gap: the survey has no distance input yet, so the encoder pins
    // the value the model was trained against.
    features.insert(col::DISTANCE_FROM_HOME, DISTANCE_FROM_HOME_PLACEHOLDER);
    features.insert(col::EDUCATION, employee.education as f64);
    features.insert(
        col::ENVIRONMENT_SATISFACTION,
        daily.environment_satisfaction as f64,
    );
    features.insert(col::GENDER, employee.gender.code() as f64);
    features.insert(col::JOB_INVOLVEMENT, daily.job_involvement as f64);
    features.insert(col::JOB_LEVEL, employee.job_level as f64);
    features.insert(col::JOB_SATISFACTION, daily.job_satisfaction as f64);
    features.insert(col::MONTHLY_INCOME, employee.monthly_income as f64);
    features.insert(
        col::NUM_COMPANIES_WORKED,
        employee.num_companies_worked as f64,
    );
    features.insert(col::OVER_TIME, daily.over_time as f64);
    features.insert(
        col::PERCENT_SALARY_HIKE,
        employee.percent_salary_hike as f64,
    );
    features.insert(col::PERFORMANCE_RATING, daily.performance_rating as f64);
    features.insert(
        col::TOTAL_WORKING_YEARS,
        employee.total_working_years as f64,
    );
    features.insert(col::WORK_LIFE_BALANCE, daily.work_life_balance as f64);
    features.insert(
        col::YEARS_AT_COMPANY,
        years_between(employee.contract_start_date, today) as f64,
    );
    features.insert(
        col::YEARS_IN_CURRENT_ROLE,
        years_between(employee.current_role_start_date, today) as f64,
    );
    features.insert(
        col::YEARS_SINCE_LAST_PROMOTION,
        years_between(employee.last_promotion_date, today) as f64,
    );
    features.insert(
        col::YEARS_WITH_CURR_MANAGER,
        employee.years_with_curr_manager as f64,
    );

    insert_dummies(
        &mut features,
        &Department::DUMMY_COLUMNS,
        employee.department.dummy_column(),
    );
    insert_dummies(
        &mut features,
        &EducationField::DUMMY_COLUMNS,
        employee.education_field.dummy_column(),
    );
    insert_dummies(
        &mut features,
        &JobRole::DUMMY_COLUMNS,
        employee.job_role.dummy_column(),
    );
    insert_dummies(
        &mut features,
        &MaritalStatus::DUMMY_COLUMNS,
        employee.marital_status.dummy_column(),
    );

    features
}

/// Writes a full dummy group: the active column gets 1, every other column
/// 0, so exactly one column per group is set unless the value is the
/// dropped reference category (`active == None`).
fn insert_dummies(
    features: &mut HashMap<&'static str, f64>,
    columns: &[&'static str],
    active: Option<&'static str>,
) {
    for &column in columns {
        features.insert(column, if active == Some(column) { 1.0 } else { 0.0 });
    }
}

/// Projects the named map onto the classifier's column order. Rejects both
/// a missing column and a surplus one; the encoder and this projection
/// must stay in lockstep, and a failure here means they have drifted.
pub fn assemble(features: &HashMap<&'static str, f64>) -> Result<Vec<f64>, SchemaError> {
    if features.len() != FEATURE_COUNT {
        return Err(SchemaError::UnexpectedColumns {
            expected: FEATURE_COUNT,
            actual: features.len(),
        });
    }

    FEATURE_COLUMNS
        .iter()
        .map(|&name| {
            features
                .get(name)
                .copied()
                .ok_or(SchemaError::MissingColumn(name))
        })
        .collect()
}

/// One survey submission, end to end: validate, derive, encode, assemble,
/// predict. Validation is all-or-nothing; the predictor never sees a
/// partial vector. The returned [`ScoreRecord`] is what the caller appends
/// to the employee's history.
pub fn run(
    employee: &EmployeeRecord,
    daily: &DailySurvey,
    predictor: &dyn Predictor,
    today: NaiveDate,
) -> Result<(Prediction, ScoreRecord), PipelineError> {
    if daily.employee_id != employee.id {
        return Err(SchemaError::UnknownEmployee(daily.employee_id).into());
    }
    daily.validate(today)?;

    let named = encode(employee, daily, today);
    let vector = assemble(&named)?;
    let prediction = predictor.predict(&vector)?;

    let record = ScoreRecord {
        employee_id: employee.id,
        date: daily.date,
        attrition_probability: prediction.probability,
    };
    Ok((prediction, record))
}
