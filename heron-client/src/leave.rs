//! Resource List Controller for leave records
//!
//! Owns the Local List State behind the leave screens: the last fetched
//! collection, the result caption, the transient/persistent banners, the
//! confirmation state machine for destructive actions, and the request
//! sequencing that keeps a stale list response from overwriting a newer
//! one. One controller instance per mounted screen; the instance owns its
//! list exclusively.

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::validate::{self, LeaveFormData};
use shared::client::UserInfo;
use shared::models::{
    days_inclusive, LeaveCreate, LeaveRecord, LeaveStatus, LeaveType, LeaveUpdate, StaffMember,
    StatusChange,
};
use tokio::time::{Duration, Instant};

/// How long a success banner stays visible
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);

/// Operation outcome banner.
///
/// Success banners expire after [`SUCCESS_BANNER_TTL`]; error banners stay
/// until the next attempted operation replaces or clears them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success { message: String, expires_at: Instant },
    Error { message: String },
}

impl Banner {
    /// Banner text
    pub fn message(&self) -> &str {
        match self {
            Banner::Success { message, .. } | Banner::Error { message } => message,
        }
    }
}

/// Destructive action awaiting explicit user confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    Approve {
        leave_id: String,
    },
    Reject {
        leave_id: String,
    },
    Remove {
        leave_id: String,
        staff_name: String,
        leave_type: LeaveType,
    },
}

/// List controller for leave records and leave requests
#[derive(Debug)]
pub struct LeaveListController {
    http: HttpClient,
    /// The signed-in user; stamped into approve/reject calls
    actor: UserInfo,
    records: Vec<LeaveRecord>,
    caption: Option<String>,
    banner: Option<Banner>,
    loading: bool,
    /// Monotonic id of the most recently issued list-affecting request.
    /// A response that does not carry this id is stale and gets dropped.
    issued: u64,
    pending: Option<PendingAction>,
}

impl LeaveListController {
    /// Create a controller for the given backend client and signed-in user
    pub fn new(http: HttpClient, actor: UserInfo) -> Self {
        Self {
            http,
            actor,
            records: Vec::new(),
            caption: None,
            banner: None,
            loading: false,
            issued: 0,
            pending: None,
        }
    }

    // ========== State accessors ==========

    /// The Local List State: last successful fetch, optimistically patched
    pub fn records(&self) -> &[LeaveRecord] {
        &self.records
    }

    /// Human-readable result caption ("N record(s) found")
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Whether a list request is outstanding
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Currently visible banner; expired success banners read as none
    pub fn banner(&self) -> Option<&Banner> {
        match &self.banner {
            Some(Banner::Success { expires_at, .. }) if *expires_at <= Instant::now() => None,
            other => other.as_ref(),
        }
    }

    /// The action awaiting confirmation, if any
    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    // ========== List operations ==========

    /// Fetch the full collection and replace the Local List State
    pub async fn load_all(&mut self) {
        let req = self.begin_list_request();
        let outcome = self.http.list_leaves(None, None).await;
        self.apply_list_outcome(req, outcome);
    }

    /// Fetch with status/leave-type filters; absent values stay out of the
    /// query string entirely
    pub async fn filter(
        &mut self,
        status: Option<LeaveStatus>,
        leave_type: Option<LeaveType>,
    ) {
        let req = self.begin_list_request();
        let outcome = self
            .http
            .list_leaves(status.map(|s| s.as_str()), leave_type.map(|t| t.as_str()))
            .await;
        self.apply_list_outcome(req, outcome);
    }

    /// Search by id or name.
    ///
    /// An all-digit term is a primary-key lookup against the backend; any
    /// other term is a case-insensitive substring match over the name and
    /// reason fields of the list already loaded, with no fetch. The
    /// asymmetry is inherited behavior the screens rely on.
    pub async fn search(&mut self, term: &str) {
        let term = term.trim();
        if term.is_empty() {
            self.load_all().await;
            return;
        }

        if term.chars().all(|c| c.is_ascii_digit()) {
            let req = self.begin_list_request();
            let outcome = self.http.get_leave(term).await;
            if !self.is_current(req) {
                tracing::debug!(req, "dropping stale search response");
                return;
            }
            self.loading = false;
            match outcome {
                Ok(record) => {
                    self.records = vec![record];
                    self.caption = Some("1 record(s) found".to_string());
                }
                Err(e) => self.set_error(e.user_message()),
            }
            return;
        }

        // Local filter over what is already loaded. Counts as a
        // list-affecting operation, so in-flight responses become stale.
        self.clear_error_banner();
        self.issued += 1;
        let needle = term.to_lowercase();
        self.records.retain(|r| {
            r.staff_name.to_lowercase().contains(&needle)
                || r.reason.to_lowercase().contains(&needle)
        });
        self.caption = Some(format!("{} record(s) found", self.records.len()));
    }

    // ========== Mutations ==========

    /// Validate and submit the creation form.
    ///
    /// On success the backend's record is appended optimistically and a
    /// full reload follows for an authoritative count; the reload replaces
    /// the list wholesale, so the provisional entry cannot survive as a
    /// duplicate.
    pub async fn create(&mut self, form: &LeaveFormData) -> ClientResult<()> {
        let errors = validate::validate_create(form);
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }
        let leave_type = parse_leave_type(&form.leave_type)?;
        self.clear_error_banner();

        let payload = LeaveCreate {
            leave_id: form.leave_id.trim().to_string(),
            staff_id: form.staff_id.trim().to_string(),
            leave_type,
            start_date: form.start_date.clone(),
            end_date: form.end_date.clone(),
            reason: form.reason.trim().to_string(),
        };

        match self.http.create_leave(&payload).await {
            Ok(record) => {
                self.records.push(record);
                self.set_success("Leave request submitted");
                self.load_all().await;
                Ok(())
            }
            Err(e) => {
                self.set_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Validate and submit the edit form, then patch the record in place.
    ///
    /// `days` is recomputed client-side from the edited dates; no refetch.
    pub async fn update(&mut self, leave_id: &str, form: &LeaveFormData) -> ClientResult<()> {
        let errors = validate::validate_update(form);
        if !errors.is_empty() {
            return Err(ClientError::Validation(errors));
        }
        let leave_type = parse_leave_type(&form.leave_type)?;
        self.clear_error_banner();

        let payload = LeaveUpdate {
            leave_type,
            start_date: form.start_date.clone(),
            end_date: form.end_date.clone(),
            reason: form.reason.trim().to_string(),
        };

        match self.http.update_leave(leave_id, &payload).await {
            Ok(()) => {
                if let Some(record) = self.records.iter_mut().find(|r| r.leave_id == leave_id) {
                    record.leave_type = payload.leave_type;
                    record.start_date = payload.start_date.clone();
                    record.end_date = payload.end_date.clone();
                    record.reason = payload.reason.clone();
                    if let Some(days) = days_inclusive(&record.start_date, &record.end_date) {
                        record.days = days;
                    }
                }
                self.set_success("Leave record updated");
                Ok(())
            }
            Err(e) => {
                self.set_error(e.user_message());
                Err(e)
            }
        }
    }

    // ========== Confirmation state machine ==========
    //
    // Idle -> ConfirmPending -> { confirm -> execute, cancel -> Idle }.
    // No backend call happens before the confirm step.

    /// Stage an approval for confirmation
    pub fn request_approve(&mut self, leave_id: &str) {
        if self.records.iter().any(|r| r.leave_id == leave_id) {
            self.pending = Some(PendingAction::Approve {
                leave_id: leave_id.to_string(),
            });
        }
    }

    /// Stage a rejection; the confirm step must supply a reason
    pub fn request_reject(&mut self, leave_id: &str) {
        if self.records.iter().any(|r| r.leave_id == leave_id) {
            self.pending = Some(PendingAction::Reject {
                leave_id: leave_id.to_string(),
            });
        }
    }

    /// Stage a deletion; the prompt names the affected staff member
    pub fn request_remove(&mut self, leave_id: &str) {
        if let Some(record) = self.records.iter().find(|r| r.leave_id == leave_id) {
            self.pending = Some(PendingAction::Remove {
                leave_id: leave_id.to_string(),
                staff_name: record.staff_name.clone(),
                leave_type: record.leave_type,
            });
        }
    }

    /// Prompt text for the staged action
    pub fn confirmation_prompt(&self) -> Option<String> {
        self.pending.as_ref().map(|pending| match pending {
            PendingAction::Approve { .. } => "Approve this leave request?".to_string(),
            PendingAction::Reject { .. } => {
                "Provide a reason for rejecting this leave request".to_string()
            }
            PendingAction::Remove {
                staff_name,
                leave_type,
                ..
            } => format!(
                "Delete {} leave for {}? This cannot be undone.",
                leave_type, staff_name
            ),
        })
    }

    /// Drop the staged action without a backend call
    pub fn cancel_confirmation(&mut self) {
        self.pending = None;
    }

    /// Execute the staged action.
    ///
    /// Rejection requires a non-blank `reason`; without one the action is
    /// dropped and no backend call is made. Approval passes `reason`
    /// through as an optional comment.
    pub async fn confirm(&mut self, reason: Option<&str>) -> ClientResult<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        self.clear_error_banner();

        match pending {
            PendingAction::Approve { leave_id } => {
                let payload = StatusChange {
                    approved_by: self.actor.name.clone(),
                    comments: reason
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                        .map(str::to_string),
                };
                match self.http.approve_leave(&leave_id, &payload).await {
                    Ok(()) => {
                        self.patch_status(&leave_id, LeaveStatus::Approved, payload.comments);
                        self.set_success("Leave request approved");
                        Ok(())
                    }
                    Err(e) => {
                        self.set_error(e.user_message());
                        Err(e)
                    }
                }
            }
            PendingAction::Reject { leave_id } => {
                let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
                    tracing::debug!(leave_id, "rejection abandoned without a reason");
                    return Ok(());
                };
                let payload = StatusChange {
                    approved_by: self.actor.name.clone(),
                    comments: Some(reason.to_string()),
                };
                match self.http.reject_leave(&leave_id, &payload).await {
                    Ok(()) => {
                        self.patch_status(&leave_id, LeaveStatus::Rejected, payload.comments);
                        self.set_success("Leave request rejected");
                        Ok(())
                    }
                    Err(e) => {
                        self.set_error(e.user_message());
                        Err(e)
                    }
                }
            }
            PendingAction::Remove { leave_id, .. } => {
                match self.http.delete_leave(&leave_id).await {
                    Ok(()) => {
                        self.records.retain(|r| r.leave_id != leave_id);
                        self.set_success("Leave record deleted");
                        Ok(())
                    }
                    Err(e) => {
                        self.set_error(e.user_message());
                        Err(e)
                    }
                }
            }
        }
    }

    // ========== Staff directory ==========

    /// Staff list for labelling ids on the submission form; failures
    /// degrade to an empty list
    pub async fn staff_directory(&self) -> Vec<StaffMember> {
        self.http.list_staff().await
    }

    // ========== Internals ==========

    fn begin_list_request(&mut self) -> u64 {
        self.clear_error_banner();
        self.loading = true;
        self.issued += 1;
        self.issued
    }

    fn is_current(&self, req: u64) -> bool {
        req == self.issued
    }

    fn apply_list_outcome(&mut self, req: u64, outcome: ClientResult<(Vec<LeaveRecord>, u64)>) {
        if !self.is_current(req) {
            tracing::debug!(req, latest = self.issued, "dropping stale list response");
            return;
        }
        self.loading = false;
        match outcome {
            Ok((records, count)) => {
                self.records = records;
                self.caption = Some(format!("{} record(s) found", count));
            }
            Err(e) => self.set_error(e.user_message()),
        }
    }

    fn patch_status(&mut self, leave_id: &str, status: LeaveStatus, comments: Option<String>) {
        if let Some(record) = self.records.iter_mut().find(|r| r.leave_id == leave_id) {
            record.status = status;
            record.approved_by = Some(self.actor.name.clone());
            record.approved_date = Some(today_iso());
            if comments.is_some() {
                record.comments = comments;
            }
        }
    }

    fn set_success(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner::Success {
            message: message.into(),
            expires_at: Instant::now() + SUCCESS_BANNER_TTL,
        });
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.banner = Some(Banner::Error {
            message: message.into(),
        });
    }

    fn clear_error_banner(&mut self) {
        if matches!(self.banner, Some(Banner::Error { .. })) {
            self.banner = None;
        }
    }
}

fn parse_leave_type(value: &str) -> ClientResult<LeaveType> {
    value.trim().parse().map_err(|_| {
        let mut errors = validate::FieldErrors::new();
        errors.insert("leave_type", format!("Unknown leave type: {}", value));
        ClientError::Validation(errors)
    })
}

fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientConfig;
    use shared::models::Role;

    fn controller() -> LeaveListController {
        // Points nowhere; these tests never send a request.
        let http = HttpClient::new(&ClientConfig::new("http://127.0.0.1:1"));
        let actor = UserInfo {
            id: "1".to_string(),
            name: "Hana Sato".to_string(),
            role: Role::Hr,
        };
        LeaveListController::new(http, actor)
    }

    fn record(id: &str, name: &str, reason: &str) -> LeaveRecord {
        LeaveRecord {
            leave_id: id.to_string(),
            staff_id: "7".to_string(),
            staff_name: name.to_string(),
            leave_type: LeaveType::Annual,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-05".to_string(),
            days: 5,
            reason: reason.to_string(),
            comments: None,
            status: LeaveStatus::Pending,
            applied_date: None,
            approved_by: None,
            approved_date: None,
        }
    }

    #[tokio::test]
    async fn test_stale_list_response_is_dropped() {
        let mut c = controller();
        let stale = c.begin_list_request();
        let fresh = c.begin_list_request();

        c.apply_list_outcome(fresh, Ok((vec![record("2", "Bea", "moving")], 1)));
        c.apply_list_outcome(
            stale,
            Ok((vec![record("1", "Abe", "trip"), record("3", "Cid", "rest")], 2)),
        );

        let ids: Vec<&str> = c.records().iter().map(|r| r.leave_id.as_str()).collect();
        assert_eq!(ids, vec!["2"]);
        assert_eq!(c.caption(), Some("1 record(s) found"));
        assert!(!c.is_loading());
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_clobber_fresh_result() {
        let mut c = controller();
        let stale = c.begin_list_request();
        let fresh = c.begin_list_request();

        c.apply_list_outcome(fresh, Ok((vec![record("2", "Bea", "moving")], 1)));
        c.apply_list_outcome(stale, Err(ClientError::Backend("boom".to_string())));

        assert!(c.banner().is_none());
        assert_eq!(c.records().len(), 1);
    }

    #[tokio::test]
    async fn test_textual_search_filters_locally() {
        let mut c = controller();
        let req = c.begin_list_request();
        c.apply_list_outcome(
            req,
            Ok((
                vec![
                    record("1", "Alice Wong", "Family trip"),
                    record("2", "Binh Tran", "surgery recovery"),
                    record("3", "Carol Diaz", "moving house"),
                ],
                3,
            )),
        );

        c.search("TRIP").await;
        assert_eq!(c.records().len(), 1);
        assert_eq!(c.records()[0].leave_id, "1");
        assert_eq!(c.caption(), Some("1 record(s) found"));
    }

    #[tokio::test]
    async fn test_textual_search_matches_name_and_reason() {
        let mut c = controller();
        let req = c.begin_list_request();
        c.apply_list_outcome(
            req,
            Ok((
                vec![
                    record("1", "Alice Wong", "Family trip"),
                    record("2", "Binh Tran", "surgery"),
                ],
                2,
            )),
        );

        c.search("tran").await;
        assert_eq!(c.records().len(), 1);
        assert_eq!(c.records()[0].leave_id, "2");
    }

    #[tokio::test]
    async fn test_create_validation_failure_reports_fields() {
        let mut c = controller();
        let mut form = LeaveFormData {
            leave_id: "42".to_string(),
            staff_id: "7".to_string(),
            leave_type: "annual".to_string(),
            start_date: "2099-01-01".to_string(),
            end_date: "2099-01-05".to_string(),
            reason: String::new(),
        };
        let err = c.create(&form).await.unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("reason"));
        // No banner either: validation failures render at field level.
        assert!(c.banner().is_none());

        form.leave_type = "sabbatical".to_string();
        form.reason = "rest".to_string();
        let err = c.create(&form).await.unwrap_err();
        assert!(err.field_errors().unwrap().contains_key("leave_type"));
    }

    #[tokio::test]
    async fn test_confirm_without_pending_is_a_no_op() {
        let mut c = controller();
        assert!(c.confirm(None).await.is_ok());
        assert!(c.pending_action().is_none());
    }

    #[tokio::test]
    async fn test_reject_without_reason_aborts_without_a_call() {
        let mut c = controller();
        let req = c.begin_list_request();
        c.apply_list_outcome(req, Ok((vec![record("1", "Alice Wong", "trip")], 1)));

        c.request_reject("1");
        assert!(c.pending_action().is_some());

        // A blank reason abandons the rejection entirely. The backend at
        // 127.0.0.1:1 is unreachable, so any attempted call would have
        // surfaced a connectivity banner.
        c.confirm(Some("   ")).await.unwrap();
        assert!(c.pending_action().is_none());
        assert!(c.banner().is_none());
        assert_eq!(c.records()[0].status, LeaveStatus::Pending);
    }

    #[tokio::test]
    async fn test_cancel_returns_to_idle() {
        let mut c = controller();
        let req = c.begin_list_request();
        c.apply_list_outcome(req, Ok((vec![record("1", "Alice Wong", "trip")], 1)));

        c.request_remove("1");
        assert_eq!(
            c.confirmation_prompt().unwrap(),
            "Delete annual leave for Alice Wong? This cannot be undone."
        );
        c.cancel_confirmation();
        assert!(c.pending_action().is_none());
        assert_eq!(c.records().len(), 1);
    }

    #[tokio::test]
    async fn test_staging_unknown_record_does_nothing() {
        let mut c = controller();
        c.request_approve("404");
        c.request_remove("404");
        assert!(c.pending_action().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_banner_expires() {
        let mut c = controller();
        c.set_success("Leave request approved");
        assert_eq!(c.banner().unwrap().message(), "Leave request approved");

        tokio::time::advance(SUCCESS_BANNER_TTL + Duration::from_millis(1)).await;
        assert!(c.banner().is_none());
    }

    #[tokio::test]
    async fn test_error_banner_clears_on_next_operation() {
        let mut c = controller();
        c.set_error("old failure");
        let _req = c.begin_list_request();
        assert!(c.banner().is_none());
    }
}
