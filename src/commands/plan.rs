//! Implementation of the one-shot `planloop plan` and `planloop run` commands.

use crate::agent::reflect;
use crate::cli::{PlanArgs, RunArgs};
use crate::context::AppContext;
use crate::error::{PlanloopError, Result};
use crate::session::{Session, render_plan, render_reflections, render_solutions};
use std::io::Write;

/// Execute the `planloop plan` command.
pub fn cmd_plan(ctx: &AppContext, args: PlanArgs) -> Result<()> {
    let mut session = ctx.session();
    let stdout = std::io::stdout();
    plan_to(&mut session, &args.query_text(), &mut stdout.lock())
}

/// Execute the `planloop run` command.
pub fn cmd_run(ctx: &AppContext, args: RunArgs) -> Result<()> {
    let mut session = ctx.session();
    let stdout = std::io::stdout();
    run_to(&mut session, &args.query_text(), args.reflect, &mut stdout.lock())
}

fn plan_to<W: Write>(session: &mut Session, query: &str, out: &mut W) -> Result<()> {
    let plan = session.decompose(query)?;
    if plan.is_empty() {
        eprintln!("Warning: the generator returned no subtasks.");
        return Ok(());
    }
    writeln!(out, "{}", render_plan(plan)).map_err(write_error)
}

fn run_to<W: Write>(session: &mut Session, query: &str, with_reflection: bool, out: &mut W) -> Result<()> {
    plan_to(session, query, out)?;

    let results = session.solve_all();
    if results.is_empty() {
        return Ok(());
    }

    writeln!(out).map_err(write_error)?;
    writeln!(out, "{}", render_solutions(&results)).map_err(write_error)?;

    if with_reflection {
        writeln!(out).map_err(write_error)?;
        writeln!(out, "{}", render_reflections(&reflect(&results))).map_err(write_error)?;
    }

    let failed = results.iter().filter(|r| r.solution.is_err()).count();
    if failed > 0 {
        eprintln!(
            "Warning: {} of {} subtask(s) could not be solved.",
            failed,
            results.len()
        );
    }

    Ok(())
}

fn write_error(e: std::io::Error) -> PlanloopError {
    PlanloopError::UserError(format!("failed to write output: {}", e))
}
