//! End-to-end check recording.

use chrono::Utc;
use tracing::{debug, info, warn};

use gatepass_core::check::{CheckOutcome, CheckRequest, admit_fields, evaluate, lost_race};
use gatepass_core::entities::{User, VisitLog, VisitLogDetail};
use gatepass_core::errors::Rejection;
use gatepass_core::geo::round_to_cents;
use gatepass_core::responses::CheckReceipt;

use crate::error::CheckError;
use crate::service::GateService;

impl GateService {
    /// Validate, evaluate, and persist one check for `actor`.
    ///
    /// # Errors
    ///
    /// `CheckError::Rejected` carries the first rule the attempt broke;
    /// `CheckError::Database` means storage failed.
    pub async fn record_check(
        &self,
        actor: &User,
        request: &CheckRequest,
    ) -> Result<CheckReceipt, CheckError> {
        let result = self.try_record_check(actor, request).await;
        if let Err(CheckError::Rejected(ref rejection)) = result {
            warn!(
                student = %actor.id,
                gate = request.gate_code.as_deref().unwrap_or_default(),
                kind = ?rejection.kind(),
                distance = rejection.distance(),
                "check rejected: {rejection}"
            );
        }
        result
    }

    async fn try_record_check(
        &self,
        actor: &User,
        request: &CheckRequest,
    ) -> Result<CheckReceipt, CheckError> {
        let attempt = request.validate()?;
        admit_fields(actor, &attempt)?;

        let gate = self
            .find_active_gate_by_code(&attempt.gate_code)
            .await?
            .ok_or(Rejection::GateNotFound)?;

        let last = self.last_approved_log(&actor.id).await?;
        let outcome = evaluate(actor, &gate, &attempt, last.as_ref(), Utc::now())?;
        debug!(
            student = %actor.id,
            gate = %gate.code,
            distance_meters = outcome.distance_meters,
            prior = ?outcome.prior_direction,
            state_after = %outcome.state_after,
            "check admitted"
        );

        let log = self.commit(&outcome).await?;
        info!(student = %actor.id, gate = %gate.code, direction = %log.direction, log = %log.id, "check recorded");
        Ok(CheckReceipt {
            message: CheckReceipt::success_message(log.direction),
            distance: round_to_cents(outcome.distance_meters),
            log,
        })
    }

    /// Persist an admitted outcome unless another check for the same
    /// student landed after it was evaluated.
    async fn commit(&self, outcome: &CheckOutcome) -> Result<VisitLog, CheckError> {
        let draft = &outcome.draft;
        match self
            .insert_visit_log_guarded(draft, outcome.prior_direction)
            .await?
        {
            Some(log) => Ok(log),
            None => {
                let stored = self
                    .last_approved_log(&draft.student)
                    .await?
                    .map(|l| l.direction);
                Err(lost_race(stored, draft.direction).into())
            }
        }
    }

    /// Newest logs of the hostel a guard is posted at.
    ///
    /// # Errors
    ///
    /// `GuardUnassigned` when the guard has no hostel; `Database` on storage
    /// failure.
    pub async fn guard_logs(&self, guard: &User) -> Result<Vec<VisitLogDetail>, CheckError> {
        let hostel = guard.assigned_hostel.ok_or(Rejection::GuardUnassigned)?;
        Ok(self
            .list_hostel_logs(hostel, self.limits().guard_log_limit)
            .await?)
    }
}
