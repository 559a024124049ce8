use anyhow::Context;
use gatepass_core::check::CheckRequest;
use gatepass_core::errors::Rejection;
use gatepass_core::responses::CheckReceipt;
use gatepass_db::error::CheckError;
use gatepass_db::service::GateService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &CheckArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let receipt = match attempt(&ctx.service, args).await {
        Ok(receipt) => receipt,
        Err(err) => match err.rejection() {
            Some(rejection) => anyhow::bail!(describe(rejection)),
            None => return Err(err).context("failed to record check"),
        },
    };
    output(&receipt, flags.format)
}

/// Record a check on behalf of the student named by `--student`.
async fn attempt(service: &GateService, args: &CheckArgs) -> Result<CheckReceipt, CheckError> {
    let Some(student) = service.find_user(&args.student).await? else {
        return Err(Rejection::StudentNotFound.into());
    };

    let request = CheckRequest {
        gate_code: Some(args.gate.clone()),
        direction: Some(args.direction.clone()),
        lat: Some(args.lat.into()),
        lng: Some(args.lng.into()),
        reason: args.reason.clone(),
    };
    service.record_check(&student, &request).await
}

fn describe(rejection: &Rejection) -> String {
    let status = rejection.status_code();
    match rejection.distance() {
        Some(distance) => format!("check rejected ({status}): {rejection} (distance {distance} m)"),
        None => format!("check rejected ({status}): {rejection}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatepass_db::test_support::{GATE_CODE, GATE_LAT, GATE_LNG, seeded_service};
    use pretty_assertions::assert_eq;

    fn args(student: &str, direction: &str) -> CheckArgs {
        CheckArgs {
            student: student.into(),
            gate: GATE_CODE.into(),
            direction: direction.into(),
            lat: GATE_LAT,
            lng: GATE_LNG,
            reason: Some("Pharmacy".into()),
        }
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let seeded = seeded_service().await.unwrap();
        let err = attempt(&seeded.service, &args("usr-missing", "OUT"))
            .await
            .unwrap_err();
        let rejection = err.rejection().cloned();
        assert_eq!(rejection, Some(Rejection::StudentNotFound));
        assert_eq!(
            describe(&Rejection::StudentNotFound),
            "check rejected (404): Student not found"
        );
    }

    #[tokio::test]
    async fn known_student_checks_out() {
        let seeded = seeded_service().await.unwrap();
        let receipt = attempt(&seeded.service, &args(&seeded.student.id, "OUT"))
            .await
            .unwrap();
        assert_eq!(receipt.message, "Check OUT successful");
    }
}
