//! Form Validator - synchronous field-level validation
//!
//! Pure functions from raw form values to a field → message map; an empty
//! map means the form may be submitted. Dates are compared as ISO
//! `YYYY-MM-DD` strings, which sort lexically in calendar order. The
//! "not in the past" rule applies to the creation form only; editing an
//! existing record keeps its original dates valid.

use std::collections::BTreeMap;

/// Raw field values of the leave create/edit form
#[derive(Debug, Clone, Default)]
pub struct LeaveFormData {
    pub leave_id: String,
    pub staff_id: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

/// Field errors keyed by field name; empty means valid
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Validate the creation form against today's date
pub fn validate_create(form: &LeaveFormData) -> FieldErrors {
    validate_create_at(form, &today_iso())
}

/// Validate the edit form (no staff/leave id, no past-date rule)
pub fn validate_update(form: &LeaveFormData) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "leave_type", &form.leave_type, "Leave type is required");
    require(&mut errors, "start_date", &form.start_date, "Start date is required");
    require(&mut errors, "end_date", &form.end_date, "End date is required");
    require(&mut errors, "reason", &form.reason, "Reason is required");
    check_date_order(&mut errors, form);
    errors
}

fn validate_create_at(form: &LeaveFormData, today: &str) -> FieldErrors {
    let mut errors = validate_update(form);
    require(&mut errors, "staff_id", &form.staff_id, "Staff ID is required");
    require(&mut errors, "leave_id", &form.leave_id, "Leave ID is required");

    if !form.start_date.trim().is_empty()
        && !errors.contains_key("start_date")
        && form.start_date.as_str() < today
    {
        errors.insert("start_date", "Start date cannot be in the past".to_string());
    }
    errors
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

fn check_date_order(errors: &mut FieldErrors, form: &LeaveFormData) {
    if form.start_date.trim().is_empty() || form.end_date.trim().is_empty() {
        return;
    }
    // Lexical comparison is calendar order for ISO dates.
    if form.end_date < form.start_date {
        errors.insert(
            "end_date",
            "End date cannot be before start date".to_string(),
        );
    }
}

/// Today as an ISO date, time of day zeroed by construction
fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
