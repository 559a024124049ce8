use gatepass_core::enums::{Direction, HostelType};
use gatepass_core::responses::LogsResponse;
use gatepass_db::repos::visit_log::LogFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LogsArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{DayBound, parse_flag, parse_time_bound};
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &LogsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(None, flags.limit, ctx.config.general.query_log_limit);
    let filter = build_filter(args, limit)?;
    let logs = ctx.service.query_logs(&filter).await?;
    output(&LogsResponse { logs }, flags.format)
}

fn build_filter(args: &LogsArgs, limit: u32) -> anyhow::Result<LogFilter> {
    let filter = LogFilter {
        student: args.student.clone(),
        gate: args.gate.clone(),
        hostel: args
            .hostel
            .as_deref()
            .map(|value| parse_flag::<HostelType>(value, "hostel"))
            .transpose()?,
        direction: args
            .direction
            .as_deref()
            .map(|value| parse_flag::<Direction>(value, "direction"))
            .transpose()?,
        from: args
            .from
            .as_deref()
            .map(|value| parse_time_bound(value, DayBound::Start, "from"))
            .transpose()?,
        to: args
            .to
            .as_deref()
            .map(|value| parse_time_bound(value, DayBound::End, "to"))
            .transpose()?,
        limit: Some(limit),
    };

    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        anyhow::ensure!(from <= to, "--from must not be after --to");
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_filter_from_flags() {
        let args = LogsArgs {
            hostel: Some("Girls".into()),
            direction: Some("in".into()),
            from: Some("2026-03-01".into()),
            to: Some("2026-03-31".into()),
            ..LogsArgs::default()
        };
        let filter = build_filter(&args, 25).unwrap();
        assert_eq!(filter.hostel, Some(HostelType::Girls));
        assert_eq!(filter.direction, Some(Direction::In));
        assert_eq!(filter.limit, Some(25));
        assert!(filter.from < filter.to);
    }

    #[test]
    fn rejects_inverted_window() {
        let args = LogsArgs {
            from: Some("2026-03-31".into()),
            to: Some("2026-03-01".into()),
            ..LogsArgs::default()
        };
        assert!(build_filter(&args, 10).is_err());
    }

    #[test]
    fn rejects_unknown_direction() {
        let args = LogsArgs {
            direction: Some("sideways".into()),
            ..LogsArgs::default()
        };
        let err = build_filter(&args, 10).unwrap_err();
        assert!(err.to_string().contains("invalid direction"));
    }
}
